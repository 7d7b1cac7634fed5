use domain_stub::resolv::{
    free_data, parse_caa_reply, parse_into_addrinfo, AddrInfo, Error,
};
use std::net::IpAddr;

/// A response for www.example.com A with a CNAME to web.example.com and two
/// addresses for the latter, all owners compressed.
const CNAME_RESPONSE: &[u8] = b"\
    \x12\x34\x81\x80\x00\x01\x00\x03\x00\x00\x00\x00\
    \x03www\x07example\x03com\x00\x00\x01\x00\x01\
    \xc0\x0c\x00\x05\x00\x01\x00\x00\x01\x2c\x00\x06\x03web\xc0\x10\
    \xc0\x2d\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\xc0\x00\x02\x01\
    \xc0\x2d\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\xc0\x00\x02\x02";

/// A response for example.com CAA with one record whose value contains a
/// zero octet.
const CAA_RESPONSE: &[u8] = b"\
    \x00\x01\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00\
    \x07example\x03com\x00\x01\x01\x00\x01\
    \xc0\x0c\x01\x01\x00\x01\x00\x00\x0e\x10\x00\x0a\
    \x00\x05issuea\x00b";

#[test]
fn addrinfo_through_cname() {
    let mut ai = AddrInfo::new();
    parse_into_addrinfo(CNAME_RESPONSE, true, 8080, &mut ai).unwrap();
    assert_eq!(ai.name(), Some("www.example.com"));
    assert_eq!(ai.cnames().len(), 1);
    assert_eq!(ai.cnames()[0].alias(), "www.example.com");
    assert_eq!(ai.cnames()[0].name(), "web.example.com");
    assert_eq!(ai.cnames()[0].ttl(), 300);
    let addrs: Vec<_> = ai.nodes().iter().map(|node| node.addr()).collect();
    assert_eq!(
        addrs,
        [IpAddr::from([192, 0, 2, 1]), IpAddr::from([192, 0, 2, 2])]
    );
    assert!(ai.nodes().iter().all(|node| node.port() == 8080));
    assert!(ai.nodes().iter().all(|node| node.ttl() == 60));
}

#[test]
fn addrinfo_truncated() {
    let mut ai = AddrInfo::new();
    for len in 0..CNAME_RESPONSE.len() {
        assert_eq!(
            parse_into_addrinfo(&CNAME_RESPONSE[..len], false, 0, &mut ai),
            Err(Error::BadResponse),
            "len {}",
            len
        );
    }
    assert_eq!(ai, AddrInfo::new());
}

#[test]
fn caa_with_zero_octet() {
    let chain = parse_caa_reply(CAA_RESPONSE).unwrap();
    assert_eq!(chain.len(), 1);
    let caa = chain.head().unwrap().payload().as_caa().unwrap();
    assert_eq!(caa.critical(), 0);
    assert_eq!(caa.property(), b"issue");
    assert_eq!(caa.value(), b"a\x00b");
    assert!(free_data(chain).is_none());
}
