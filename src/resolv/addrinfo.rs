//! Turning a response into addresses and canonical names.
//!
//! This is the parser behind host name lookups. It collects the A and AAAA
//! records for the queried name and the CNAME records leading there into
//! an [`AddrInfo`] owned by the caller.

use super::error::Error;
use crate::base::iana::{Class, Rtype};
use crate::base::name::NameMode;
use crate::base::record::{AnswerRecord, Response};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use tracing::{debug, trace};

//------------ AddrInfo ------------------------------------------------------

/// The result of one or more host name lookups.
///
/// Successful calls to [`parse_into_addrinfo`] append their addresses and
/// canonical names to the value. A failed call leaves it untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AddrInfo {
    name: Option<String>,
    nodes: Vec<AddrInfoNode>,
    cnames: Vec<AddrInfoCname>,
}

impl AddrInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the queried name.
    ///
    /// This is `None` until a response was parsed successfully.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the addresses in the order they appeared in the responses.
    pub fn nodes(&self) -> &[AddrInfoNode] {
        &self.nodes
    }

    /// Returns the canonical name records in response order.
    pub fn cnames(&self) -> &[AddrInfoCname] {
        &self.cnames
    }

    /// Returns the socket addresses of all nodes.
    pub fn socket_addrs(&self) -> impl Iterator<Item = SocketAddr> + '_ {
        self.nodes.iter().map(AddrInfoNode::socket_addr)
    }
}

//------------ AddrInfoNode --------------------------------------------------

/// A single address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AddrInfoNode {
    addr: IpAddr,
    port: u16,
    ttl: u32,
}

impl AddrInfoNode {
    pub fn new(addr: IpAddr, port: u16, ttl: u32) -> Self {
        AddrInfoNode { addr, port, ttl }
    }

    /// Creates a node from an A or AAAA record.
    ///
    /// Returns `None` if the record is of a different type or if the
    /// length of its data doesn’t match the address size.
    fn from_record(record: &AnswerRecord, port: u16) -> Option<Self> {
        let addr = match record.rtype() {
            Rtype::A => {
                IpAddr::V4(Ipv4Addr::from(<[u8; 4]>::try_from(record.data()).ok()?))
            }
            Rtype::AAAA => IpAddr::V6(Ipv6Addr::from(
                <[u8; 16]>::try_from(record.data()).ok()?,
            )),
            _ => return None,
        };
        Some(AddrInfoNode::new(addr, port, record.ttl()))
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the TTL of the record the address was taken from.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn is_ipv4(&self) -> bool {
        self.addr.is_ipv4()
    }

    pub fn is_ipv6(&self) -> bool {
        self.addr.is_ipv6()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.port)
    }
}

//------------ AddrInfoCname -------------------------------------------------

/// A canonical name record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddrInfoCname {
    ttl: u32,
    alias: String,
    name: String,
}

impl AddrInfoCname {
    pub fn new(ttl: u32, alias: String, name: String) -> Self {
        AddrInfoCname { ttl, alias, name }
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Returns the owner of the CNAME record.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns the canonical name the alias points to.
    pub fn name(&self) -> &str {
        &self.name
    }
}

//------------ parse_into_addrinfo -------------------------------------------

/// Parses a response to an A or AAAA query into `ai`.
///
/// Address records are only accepted if they are of class IN, their data
/// has the exact size of an address, and their owner matches the active
/// name ignoring ASCII case. The active name starts out as the question
/// name. Each CNAME record of class IN replaces it with its target. This
/// makes the result depend on the order of records in the answer: an
/// address record for the canonical name is only accepted if it appears
/// after the CNAME record leading there.
///
/// Every address receives `port`. If the answer contains neither
/// addresses nor CNAME records, or only CNAME records while
/// `cname_only_is_nodata` is set, fails with [`Error::NoData`]. Framing
/// errors fail with [`Error::BadResponse`].
///
/// On success, the name of `ai` is set to the question name unless it
/// already equals it ignoring ASCII case, and the new addresses and
/// canonical names are appended. On failure, `ai` is left unchanged.
pub fn parse_into_addrinfo(
    msg: &[u8],
    cname_only_is_nodata: bool,
    port: u16,
    ai: &mut AddrInfo,
) -> Result<(), Error> {
    let response = Response::parse(msg, NameMode::Any).map_err(|err| {
        debug!("rejecting response: {}", err);
        Error::from(err)
    })?;

    let mut nodes = Vec::new();
    let mut cnames = Vec::new();
    let mut active_name = response.question().qname().to_owned();

    for record in response.answers() {
        let record = record.map_err(|err| {
            debug!("rejecting response to {}: {}", active_name, err);
            Error::from(err)
        })?;
        if record.class() != Class::IN {
            trace!("skipping {} record of class {}", record.rtype(), record.class());
            continue;
        }
        if record.rtype() == Rtype::CNAME {
            let target = record.data_name(0, NameMode::Hostname)?;
            trace!("following CNAME {} -> {}", record.owner(), target);
            active_name.clone_from(&target);
            cnames.try_reserve(1).map_err(|_| Error::NoMemory)?;
            cnames.push(AddrInfoCname {
                ttl: record.ttl(),
                alias: record.into_owner(),
                name: target,
            });
        } else if record.owner().eq_ignore_ascii_case(&active_name) {
            if let Some(node) = AddrInfoNode::from_record(&record, port) {
                nodes.try_reserve(1).map_err(|_| Error::NoMemory)?;
                nodes.push(node);
            } else {
                trace!("skipping {} record for {}", record.rtype(), record.owner());
            }
        } else {
            trace!(
                "skipping {} record for {}, expected {}",
                record.rtype(),
                record.owner(),
                active_name
            );
        }
    }

    if nodes.is_empty() && (cnames.is_empty() || cname_only_is_nodata) {
        debug!(
            "no addresses for {} ({} CNAME records)",
            response.question().qname(),
            cnames.len()
        );
        return Err(Error::NoData);
    }

    // Reserve everything before touching `ai` so it stays unchanged if we
    // fail.
    ai.nodes
        .try_reserve(nodes.len())
        .map_err(|_| Error::NoMemory)?;
    ai.cnames
        .try_reserve(cnames.len())
        .map_err(|_| Error::NoMemory)?;
    let qname = response.into_question().into_qname();
    match ai.name {
        Some(ref name) if name.eq_ignore_ascii_case(&qname) => {}
        _ => ai.name = Some(qname),
    }
    ai.nodes.append(&mut nodes);
    ai.cnames.append(&mut cnames);
    Ok(())
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::testing::ResponseBuilder;

    const V4: [u8; 4] = [192, 0, 2, 1];
    const V6: [u8; 16] = [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];

    fn parse(msg: &[u8], cname_only_is_nodata: bool) -> Result<AddrInfo, Error> {
        let mut ai = AddrInfo::new();
        parse_into_addrinfo(msg, cname_only_is_nodata, 53, &mut ai)?;
        Ok(ai)
    }

    #[test]
    fn addresses() {
        let mut builder = ResponseBuilder::new("www.example.com", Rtype::A);
        for i in 0..3u8 {
            builder.push(
                ResponseBuilder::QNAME,
                Rtype::A,
                Class::IN,
                100 + u32::from(i),
                &[192, 0, 2, i],
            );
        }
        builder.push(ResponseBuilder::QNAME, Rtype::AAAA, Class::IN, 7, &V6);
        let ai = parse(&builder.finish(), false).unwrap();
        assert_eq!(ai.name(), Some("www.example.com"));
        assert!(ai.cnames().is_empty());
        assert_eq!(ai.nodes().len(), 4);
        for (i, node) in ai.nodes()[..3].iter().enumerate() {
            assert!(node.is_ipv4());
            assert_eq!(node.addr(), IpAddr::from([192, 0, 2, i as u8]));
            assert_eq!(node.port(), 53);
            assert_eq!(node.ttl(), 100 + i as u32);
        }
        assert!(ai.nodes()[3].is_ipv6());
        assert_eq!(ai.nodes()[3].addr(), IpAddr::from(V6));
        assert_eq!(ai.nodes()[3].ttl(), 7);
        assert_eq!(
            ai.socket_addrs().next(),
            Some("192.0.2.0:53".parse().unwrap())
        );
    }

    #[test]
    fn skipped_records() {
        let mut builder = ResponseBuilder::new("www.example.com", Rtype::A);
        // Wrong class, wrong length, wrong owner, wrong type.
        builder.push(ResponseBuilder::QNAME, Rtype::A, Class::CH, 60, &V4);
        builder.push(ResponseBuilder::QNAME, Rtype::A, Class::IN, 60, &V6);
        builder.push(ResponseBuilder::QNAME, Rtype::AAAA, Class::IN, 60, &V4);
        builder.push_name("other.example.com", Rtype::A, Class::IN, 60, &V4);
        builder.push(ResponseBuilder::QNAME, Rtype::TXT, Class::IN, 60, b"\x01x");
        // Owner matches ignoring case.
        builder.push_name("WWW.Example.COM", Rtype::A, Class::IN, 60, &V4);
        let ai = parse(&builder.finish(), false).unwrap();
        assert_eq!(ai.nodes().len(), 1);
        assert_eq!(ai.nodes()[0].addr(), IpAddr::from(V4));
    }

    #[test]
    fn cname_chain() {
        let mut builder = ResponseBuilder::new("www.example.com", Rtype::A);
        builder.push_cname(ResponseBuilder::QNAME, 300, "web.example.net");
        builder.push_name("web.example.net", Rtype::A, Class::IN, 60, &V4);
        let ai = parse(&builder.finish(), true).unwrap();
        assert_eq!(ai.name(), Some("www.example.com"));
        assert_eq!(
            ai.cnames(),
            &[AddrInfoCname::new(
                300,
                "www.example.com".into(),
                "web.example.net".into()
            )]
        );
        assert_eq!(ai.nodes().len(), 1);
    }

    #[test]
    fn cname_order_matters() {
        // The address for the canonical name precedes its CNAME record
        // and thus doesn’t match the active name yet.
        let mut builder = ResponseBuilder::new("www.example.com", Rtype::A);
        builder.push_name("web.example.net", Rtype::A, Class::IN, 60, &V4);
        builder.push_cname(ResponseBuilder::QNAME, 300, "web.example.net");
        let msg = builder.finish();
        assert_eq!(parse(&msg, true), Err(Error::NoData));
        let ai = parse(&msg, false).unwrap();
        assert!(ai.nodes().is_empty());
        assert_eq!(ai.cnames().len(), 1);

        // Once a CNAME was seen, the question name doesn’t match anymore.
        let mut builder = ResponseBuilder::new("www.example.com", Rtype::A);
        builder.push_cname(ResponseBuilder::QNAME, 300, "web.example.net");
        builder.push(ResponseBuilder::QNAME, Rtype::A, Class::IN, 60, &V4);
        let ai = parse(&builder.finish(), false).unwrap();
        assert!(ai.nodes().is_empty());
    }

    #[test]
    fn cname_only() {
        let mut builder = ResponseBuilder::new("www.example.com", Rtype::A);
        builder.push_cname(ResponseBuilder::QNAME, 300, "web.example.net");
        let msg = builder.finish();
        assert_eq!(parse(&msg, true), Err(Error::NoData));
        let ai = parse(&msg, false).unwrap();
        assert_eq!(ai.name(), Some("www.example.com"));
        assert_eq!(ai.cnames()[0].name(), "web.example.net");
        assert_eq!(ai.cnames()[0].alias(), "www.example.com");
    }

    #[test]
    fn no_answers() {
        let msg = ResponseBuilder::new("www.example.com", Rtype::A).finish();
        assert_eq!(parse(&msg, false), Err(Error::NoData));
    }

    #[test]
    fn bad_cname_target() {
        let mut builder = ResponseBuilder::new("www.example.com", Rtype::A);
        builder.push(
            ResponseBuilder::QNAME,
            Rtype::CNAME,
            Class::IN,
            60,
            b"\x04we b\0",
        );
        assert_eq!(parse(&builder.finish(), false), Err(Error::BadResponse));
    }

    #[test]
    fn truncated_leaves_target_alone() {
        let mut builder = ResponseBuilder::new("www.example.com", Rtype::A);
        builder.push(ResponseBuilder::QNAME, Rtype::A, Class::IN, 60, &V4);
        builder.push(ResponseBuilder::QNAME, Rtype::A, Class::IN, 60, &V4);
        let msg = builder.finish();

        let mut ai = AddrInfo::new();
        parse_into_addrinfo(&msg, false, 80, &mut ai).unwrap();
        let before = ai.clone();
        for len in 0..msg.len() {
            assert_eq!(
                parse_into_addrinfo(&msg[..len], false, 80, &mut ai),
                Err(Error::BadResponse)
            );
            assert_eq!(ai, before);
        }
    }

    #[test]
    fn merge() {
        let mut builder = ResponseBuilder::new("www.example.com", Rtype::A);
        builder.push(ResponseBuilder::QNAME, Rtype::A, Class::IN, 60, &V4);
        let v4 = builder.finish();
        let mut builder = ResponseBuilder::new("WWW.example.com", Rtype::AAAA);
        builder.push(ResponseBuilder::QNAME, Rtype::AAAA, Class::IN, 60, &V6);
        let v6 = builder.finish();
        let mut builder = ResponseBuilder::new("other.example.com", Rtype::A);
        builder.push(ResponseBuilder::QNAME, Rtype::A, Class::IN, 60, &V4);
        let other = builder.finish();

        let mut ai = AddrInfo::new();
        parse_into_addrinfo(&v4, false, 0, &mut ai).unwrap();
        parse_into_addrinfo(&v6, false, 0, &mut ai).unwrap();
        // Same name ignoring case: the first spelling is kept.
        assert_eq!(ai.name(), Some("www.example.com"));
        assert_eq!(ai.nodes().len(), 2);
        assert!(ai.nodes()[0].is_ipv4());
        assert!(ai.nodes()[1].is_ipv6());

        parse_into_addrinfo(&other, false, 0, &mut ai).unwrap();
        assert_eq!(ai.name(), Some("other.example.com"));
        assert_eq!(ai.nodes().len(), 3);
    }
}
