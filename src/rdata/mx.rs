//! Record data from [RFC 1035]: MX records.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use crate::base::iana::Rtype;
use crate::base::name::NameMode;
use crate::base::record::AnswerRecord;
use crate::base::wire::Parse;
use crate::resolv::error::Error;
use core::fmt;

//------------ MxReply -------------------------------------------------------

/// The data of an MX record.
///
/// The MX record specifies a host willing to serve as a mail exchange for
/// the owner name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MxReply {
    priority: u16,
    host: String,
}

impl MxReply {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::MX;

    /// Creates a new value from its components.
    pub fn new(priority: u16, host: String) -> Self {
        MxReply { priority, host }
    }

    /// Parses the data of `record`.
    pub fn parse(record: &AnswerRecord) -> Result<Self, Error> {
        let mut parser = record.data_parser();
        let priority = u16::parse(&mut parser)?;
        let host = record.data_name(parser.pos(), NameMode::Any)?;
        Ok(MxReply { priority, host })
    }

    /// The preference for this record.
    ///
    /// Defines an order if there are several MX records for the same
    /// owner. Lower values are preferred.
    pub fn priority(&self) -> u16 {
        self.priority
    }

    /// The name of the host that is the exchange.
    pub fn host(&self) -> &str {
        &self.host
    }
}

//--- Display

impl fmt::Display for MxReply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}.", self.priority, self.host)
    }
}

//============ Testing =======================================================
