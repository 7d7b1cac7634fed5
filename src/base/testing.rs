//! Helpers for assembling response messages in tests.

use super::iana::{Class, Rtype};

/// Encodes a dotted name into uncompressed wire format.
///
/// The name must not contain escapes. The empty string is the root.
pub fn encode_name(name: &str) -> Vec<u8> {
    let mut res = Vec::new();
    for label in name.split('.').filter(|label| !label.is_empty()) {
        res.push(label.len() as u8);
        res.extend_from_slice(label.as_bytes());
    }
    res.push(0);
    res
}

/// Assembles a response with a single question and an answer section.
pub struct ResponseBuilder {
    buf: Vec<u8>,
    ancount: u16,
}

impl ResponseBuilder {
    /// A compression pointer to the question name.
    pub const QNAME: u16 = 0xC00C;

    /// Starts a response for a question of class IN.
    pub fn new(qname: &str, qtype: Rtype) -> Self {
        Self::with_class(qname, qtype, Class::IN)
    }

    /// Starts a response with the given question.
    pub fn with_class(qname: &str, qtype: Rtype, qclass: Class) -> Self {
        let mut buf = vec![0x12, 0x34, 0x81, 0x80, 0, 1, 0, 0, 0, 0, 0, 0];
        buf.extend_from_slice(&encode_name(qname));
        buf.extend_from_slice(&qtype.to_int().to_be_bytes());
        buf.extend_from_slice(&qclass.to_int().to_be_bytes());
        ResponseBuilder { buf, ancount: 0 }
    }

    /// Appends a record whose owner is a compression pointer.
    pub fn push(
        &mut self,
        owner: u16,
        rtype: Rtype,
        class: Class,
        ttl: u32,
        data: &[u8],
    ) {
        let owner = owner.to_be_bytes();
        self.push_raw(&owner, rtype, class, ttl, data)
    }

    /// Appends a record with an uncompressed owner name.
    pub fn push_name(
        &mut self,
        owner: &str,
        rtype: Rtype,
        class: Class,
        ttl: u32,
        data: &[u8],
    ) {
        let owner = encode_name(owner);
        self.push_raw(&owner, rtype, class, ttl, data)
    }

    /// Appends a CNAME record of class IN with an uncompressed target.
    pub fn push_cname(&mut self, owner: u16, ttl: u32, target: &str) {
        let target = encode_name(target);
        self.push(owner, Rtype::CNAME, Class::IN, ttl, &target)
    }

    /// Appends a record with an owner name given in wire format.
    pub fn push_raw(
        &mut self,
        owner: &[u8],
        rtype: Rtype,
        class: Class,
        ttl: u32,
        data: &[u8],
    ) {
        self.buf.extend_from_slice(owner);
        self.buf.extend_from_slice(&rtype.to_int().to_be_bytes());
        self.buf.extend_from_slice(&class.to_int().to_be_bytes());
        self.buf.extend_from_slice(&ttl.to_be_bytes());
        self.buf.extend_from_slice(&(data.len() as u16).to_be_bytes());
        self.buf.extend_from_slice(data);
        self.ancount += 1;
    }

    /// Finishes the message, filling in the answer count.
    pub fn finish(mut self) -> Vec<u8> {
        self.buf[6..8].copy_from_slice(&self.ancount.to_be_bytes());
        self.buf
    }
}
