//! The header of a DNS message.
//!
//! Each DNS message starts with a twelve octet long header section
//! containing some general information related to the message as well as
//! the number of records in each of the four sections that follow the
//! header. The response parser only ever looks at the message ID and the
//! section counts, so this module only provides access to those.

use super::wire::{Parse, ParseError};
use octseq::parse::Parser;

//------------ Header --------------------------------------------------------

/// The fixed-size header section of a DNS message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
    id: u16,
    flags: u16,
    qdcount: u16,
    ancount: u16,
    nscount: u16,
    arcount: u16,
}

impl Header {
    /// The length of the header in octets.
    pub const LEN: usize = 12;

    /// Parses a header from the beginning of `parser`.
    ///
    /// Fails with [`ParseError::ShortInput`] if there are less than
    /// [`Header::LEN`] octets left.
    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        parser.check_len(Self::LEN)?;
        Ok(Header {
            id: u16::parse(parser)?,
            flags: u16::parse(parser)?,
            qdcount: u16::parse(parser)?,
            ancount: u16::parse(parser)?,
            nscount: u16::parse(parser)?,
            arcount: u16::parse(parser)?,
        })
    }

    /// Returns the message ID.
    pub fn id(self) -> u16 {
        self.id
    }

    /// Returns the raw flags word including opcode and rcode.
    pub fn flags(self) -> u16 {
        self.flags
    }

    /// Returns the number of entries in the question section.
    pub fn qdcount(self) -> u16 {
        self.qdcount
    }

    /// Returns the number of records in the answer section.
    pub fn ancount(self) -> u16 {
        self.ancount
    }

    /// Returns the number of records in the authority section.
    pub fn nscount(self) -> u16 {
        self.nscount
    }

    /// Returns the number of records in the additional section.
    pub fn arcount(self) -> u16 {
        self.arcount
    }
}

//============ Testing =======================================================
