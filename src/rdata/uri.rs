//! Record data from [RFC 7553]: URI records.
//!
//! [RFC 7553]: https://www.rfc-editor.org/info/rfc7553

use super::{copy_octets, fmt_quoted};
use crate::base::iana::Rtype;
use crate::base::record::AnswerRecord;
use crate::base::wire::Parse;
use crate::resolv::error::Error;
use core::fmt;
use tracing::debug;

//------------ UriReply ------------------------------------------------------

/// The data of a URI record.
///
/// The target URI takes up the remainder of the record data. Unlike most
/// other strings in DNS it isn’t preceded by a length octet. The TTL of
/// the record is kept alongside.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UriReply {
    priority: u16,
    weight: u16,
    uri: Vec<u8>,
    ttl: u32,
}

impl UriReply {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::URI;

    pub fn new(priority: u16, weight: u16, uri: Vec<u8>, ttl: u32) -> Self {
        UriReply {
            priority,
            weight,
            uri,
            ttl,
        }
    }

    /// Parses the data of `record`.
    ///
    /// An empty target is malformed.
    pub fn parse(record: &AnswerRecord) -> Result<Self, Error> {
        let mut parser = record.data_parser();
        let priority = u16::parse(&mut parser)?;
        let weight = u16::parse(&mut parser)?;
        let uri = parser.peek_all();
        if uri.is_empty() {
            debug!("URI record without a target");
            return Err(Error::BadResponse);
        }
        Ok(UriReply {
            priority,
            weight,
            uri: copy_octets(uri)?,
            ttl: record.ttl(),
        })
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    pub fn weight(&self) -> u16 {
        self.weight
    }

    /// Returns the octets of the target URI.
    pub fn uri(&self) -> &[u8] {
        &self.uri
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }
}

//--- Display

impl fmt::Display for UriReply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ", self.priority, self.weight)?;
        fmt_quoted(&self.uri, f)
    }
}

//============ Testing =======================================================
