//! Record data from [RFC 8659]: CAA records.
//!
//! [RFC 8659]: https://www.rfc-editor.org/info/rfc8659

use super::{copy_octets, fmt_quoted};
use crate::base::iana::Rtype;
use crate::base::record::AnswerRecord;
use crate::resolv::error::Error;
use core::fmt;
use tracing::debug;

//------------ CaaReply ------------------------------------------------------

/// The data of a CAA record.
///
/// The property tag and the value are kept as octets with their exact
/// lengths. The value in particular may contain arbitrary octets including
/// zero.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CaaReply {
    critical: u8,
    property: Vec<u8>,
    value: Vec<u8>,
}

impl CaaReply {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::CAA;

    /// The issuer critical flag within the flags octet.
    pub const CRITICAL_FLAG: u8 = 0x80;

    /// Creates a new value from its components.
    pub fn new(critical: u8, property: Vec<u8>, value: Vec<u8>) -> Self {
        CaaReply {
            critical,
            property,
            value,
        }
    }

    /// Parses the data of `record`.
    ///
    /// The data needs to contain the flags octet, a non-empty property
    /// tag, and a non-empty value. Otherwise the record is malformed.
    pub fn parse(record: &AnswerRecord) -> Result<Self, Error> {
        let data = record.data();
        if data.len() < 2 {
            debug!("CAA record data too short: {} octets", data.len());
            return Err(Error::BadResponse);
        }
        let critical = data[0];
        let plen = usize::from(data[1]);
        if plen == 0 || plen >= data.len() - 2 {
            debug!(
                "bad CAA property length {} for {} octets of data",
                plen,
                data.len()
            );
            return Err(Error::BadResponse);
        }
        let (property, value) = data[2..].split_at(plen);
        Ok(CaaReply {
            critical,
            property: copy_octets(property)?,
            value: copy_octets(value)?,
        })
    }

    /// Returns the raw flags octet.
    pub fn critical(&self) -> u8 {
        self.critical
    }

    /// Returns whether the issuer critical flag is set.
    pub fn is_critical(&self) -> bool {
        self.critical & Self::CRITICAL_FLAG != 0
    }

    /// Returns the property tag.
    pub fn property(&self) -> &[u8] {
        &self.property
    }

    /// Returns the property value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

//--- Display

impl fmt::Display for CaaReply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ", self.critical)?;
        for &ch in &self.property {
            write!(f, "{}", char::from(ch))?;
        }
        f.write_str(" ")?;
        fmt_quoted(&self.value, f)
    }
}

//============ Testing =======================================================
