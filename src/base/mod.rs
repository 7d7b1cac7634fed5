//! Handling of DNS data on the wire.
//!
//! This module provides the low-level pieces the response parsers are
//! built from. All of them operate on a message given as a slice of octets
//! and use an [`octseq`] parser to keep track of their position. Nothing
//! in here allocates except for the decoded domain names.
//!
//! * [`header`] reads the fixed header of a message,
//! * [`name`] decompresses domain names into strings,
//! * [`record`] walks over the question and the answer section, and
//! * [`iana`] contains the record types and classes.

pub use self::header::Header;
pub use self::iana::{Class, Rtype};
pub use self::name::{expand_name, parse_name, NameError, NameMode};
pub use self::record::{AnswerRecord, AnswerScanner, Question, Response};
pub use self::wire::{FormError, Parse, ParseError};

pub mod header;
pub mod iana;
pub mod name;
pub mod record;
pub mod wire;

#[cfg(test)]
pub(crate) mod testing;
