//! Record data from [RFC 1035]: SOA records.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use crate::base::iana::Rtype;
use crate::base::name::NameMode;
use crate::base::record::AnswerRecord;
use crate::base::wire::Parse;
use crate::resolv::error::Error;
use core::fmt;

//------------ SoaReply ------------------------------------------------------

/// The data of an SOA record.
///
/// The SOA record marks the top of a zone and carries the parameters
/// secondary servers use to keep their copy of the zone current.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SoaReply {
    nsname: String,
    hostmaster: String,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    minttl: u32,
}

impl SoaReply {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::SOA;

    /// Creates a new value from its components.
    pub fn new(
        nsname: String,
        hostmaster: String,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minttl: u32,
    ) -> Self {
        SoaReply {
            nsname,
            hostmaster,
            serial,
            refresh,
            retry,
            expire,
            minttl,
        }
    }

    /// Parses the data of `record`.
    ///
    /// Both names may be compressed. The five integers have to follow
    /// within the record data.
    pub fn parse(record: &AnswerRecord) -> Result<Self, Error> {
        let mut parser = record.data_parser();
        let nsname = record.parse_data_name(&mut parser, NameMode::Any)?;
        let hostmaster = record.parse_data_name(&mut parser, NameMode::Any)?;
        Ok(SoaReply {
            nsname,
            hostmaster,
            serial: u32::parse(&mut parser)?,
            refresh: u32::parse(&mut parser)?,
            retry: u32::parse(&mut parser)?,
            expire: u32::parse(&mut parser)?,
            minttl: u32::parse(&mut parser)?,
        })
    }

    /// The primary name server for the zone.
    pub fn nsname(&self) -> &str {
        &self.nsname
    }

    /// The mailbox for the person responsible for this zone.
    pub fn hostmaster(&self) -> &str {
        &self.hostmaster
    }

    /// The serial number of the zone.
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// The time interval in seconds before the zone should be refreshed.
    pub fn refresh(&self) -> u32 {
        self.refresh
    }

    /// The time in seconds before a failed refresh is retried.
    pub fn retry(&self) -> u32 {
        self.retry
    }

    /// The upper limit of time in seconds the zone is authoritative.
    pub fn expire(&self) -> u32 {
        self.expire
    }

    /// The TTL for negative answers from this zone.
    pub fn minttl(&self) -> u32 {
        self.minttl
    }
}

//--- Display

impl fmt::Display for SoaReply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}. {}. {} {} {} {} {}",
            self.nsname,
            self.hostmaster,
            self.serial,
            self.refresh,
            self.retry,
            self.expire,
            self.minttl
        )
    }
}

//============ Testing =======================================================
