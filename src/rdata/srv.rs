//! Record data from [RFC 2782]: SRV records.
//!
//! [RFC 2782]: https://tools.ietf.org/html/rfc2782

use crate::base::iana::Rtype;
use crate::base::name::NameMode;
use crate::base::record::AnswerRecord;
use crate::base::wire::Parse;
use crate::resolv::error::Error;
use core::fmt;

//------------ SrvReply ------------------------------------------------------

/// The data of an SRV record.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SrvReply {
    priority: u16,
    weight: u16,
    port: u16,
    host: String,
}

impl SrvReply {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::SRV;

    pub fn new(priority: u16, weight: u16, port: u16, host: String) -> Self {
        SrvReply {
            priority,
            weight,
            port,
            host,
        }
    }

    /// Parses the data of `record`.
    ///
    /// The three integer fields need six octets. The target follows and
    /// may be compressed.
    pub fn parse(record: &AnswerRecord) -> Result<Self, Error> {
        let mut parser = record.data_parser();
        let priority = u16::parse(&mut parser)?;
        let weight = u16::parse(&mut parser)?;
        let port = u16::parse(&mut parser)?;
        let host = record.data_name(parser.pos(), NameMode::Any)?;
        Ok(SrvReply {
            priority,
            weight,
            port,
            host,
        })
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    pub fn weight(&self) -> u16 {
        self.weight
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

//--- Display

impl fmt::Display for SrvReply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}.",
            self.priority, self.weight, self.port, self.host
        )
    }
}

//============ Testing =======================================================
