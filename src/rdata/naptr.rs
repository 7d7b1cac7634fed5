//! Record data from [RFC 3403]: NAPTR records.
//!
//! [RFC 3403]: https://www.rfc-editor.org/info/rfc3403

use super::{fmt_quoted, parse_char_str};
use crate::base::iana::Rtype;
use crate::base::name::NameMode;
use crate::base::record::AnswerRecord;
use crate::base::wire::Parse;
use crate::resolv::error::Error;
use core::fmt;

//------------ NaptrReply ----------------------------------------------------

/// The data of a NAPTR record.
///
/// A NAPTR record describes one rewrite rule of the Dynamic Delegation
/// Discovery System. The flags, services, and regular expression are kept
/// as the octets of their character strings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NaptrReply {
    order: u16,
    preference: u16,
    flags: Vec<u8>,
    service: Vec<u8>,
    regexp: Vec<u8>,
    replacement: String,
}

impl NaptrReply {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::NAPTR;

    /// Creates a new value from its components.
    pub fn new(
        order: u16,
        preference: u16,
        flags: Vec<u8>,
        service: Vec<u8>,
        regexp: Vec<u8>,
        replacement: String,
    ) -> Self {
        NaptrReply {
            order,
            preference,
            flags,
            service,
            regexp,
            replacement,
        }
    }

    /// Parses the data of `record`.
    pub fn parse(record: &AnswerRecord) -> Result<Self, Error> {
        let mut parser = record.data_parser();
        let order = u16::parse(&mut parser)?;
        let preference = u16::parse(&mut parser)?;
        let flags = parse_char_str(&mut parser)?;
        let service = parse_char_str(&mut parser)?;
        let regexp = parse_char_str(&mut parser)?;
        let replacement =
            record.parse_data_name(&mut parser, NameMode::Any)?;
        Ok(NaptrReply {
            order,
            preference,
            flags,
            service,
            regexp,
            replacement,
        })
    }

    /// Records are processed in increasing order.
    pub fn order(&self) -> u16 {
        self.order
    }

    /// The preference among records with the same order.
    pub fn preference(&self) -> u16 {
        self.preference
    }

    /// The flags controlling the interpretation of the other fields.
    pub fn flags(&self) -> &[u8] {
        &self.flags
    }

    /// The service parameters applicable to this delegation path.
    pub fn service(&self) -> &[u8] {
        &self.service
    }

    /// The substitution expression.
    pub fn regexp(&self) -> &[u8] {
        &self.regexp
    }

    /// The next name to query for.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

//--- Display

impl fmt::Display for NaptrReply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ", self.order, self.preference)?;
        fmt_quoted(&self.flags, f)?;
        f.write_str(" ")?;
        fmt_quoted(&self.service, f)?;
        f.write_str(" ")?;
        fmt_quoted(&self.regexp, f)?;
        write!(f, " {}.", self.replacement)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Class;
    use crate::base::record::Response;
    use crate::base::testing::{encode_name, ResponseBuilder};
    use rstest::rstest;

    fn parse(data: &[u8]) -> Result<NaptrReply, Error> {
        let mut builder = ResponseBuilder::new("example.com", Rtype::NAPTR);
        builder.push(ResponseBuilder::QNAME, Rtype::NAPTR, Class::IN, 60, data);
        let msg = builder.finish();
        let response = Response::parse(&msg, NameMode::Hostname).unwrap();
        let record = response.answers().next().unwrap().unwrap();
        NaptrReply::parse(&record)
    }

    fn naptr_data() -> Vec<u8> {
        let mut data = b"\x00\x64\x00\x0a\x01s\x07SIP+D2U\x00".to_vec();
        data.extend_from_slice(&encode_name("_sip._udp.example.com"));
        data
    }

    #[test]
    fn parse_good() {
        let naptr = parse(&naptr_data()).unwrap();
        assert_eq!(naptr.order(), 100);
        assert_eq!(naptr.preference(), 10);
        assert_eq!(naptr.flags(), b"s");
        assert_eq!(naptr.service(), b"SIP+D2U");
        assert_eq!(naptr.regexp(), b"");
        assert_eq!(naptr.replacement(), "_sip._udp.example.com");
        assert_eq!(
            naptr.to_string(),
            "100 10 \"s\" \"SIP+D2U\" \"\" _sip._udp.example.com."
        );
    }

    #[rstest]
    #[case::integers_only(b"\x00\x64\x00\x0a")]
    #[case::string_overrun(b"\x00\x64\x00\x0a\x01s\x09SIP+D2U")]
    #[case::no_replacement(b"\x00\x64\x00\x0a\x01s\x07SIP+D2U\x00")]
    fn malformed(#[case] data: &[u8]) {
        assert_eq!(parse(data), Err(Error::BadResponse));
    }
}
