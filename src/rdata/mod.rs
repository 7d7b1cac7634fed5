//! Record data produced from answer records.
//!
//! Each type in here is an owned copy of the interesting parts of one
//! record type’s data. The types are produced by the record-list query
//! functions in [`resolv::reply`][crate::resolv::reply] and handed to
//! callers inside a [`DataChain`][crate::resolv::data::DataChain].
//!
//! All of them are built from an [`AnswerRecord`] via their `parse`
//! function which checks the record data against the record’s data
//! length. Filtering records by class and type is left to the caller.
//!
//! [`AnswerRecord`]: crate::base::record::AnswerRecord

pub use self::caa::CaaReply;
pub use self::mx::MxReply;
pub use self::naptr::NaptrReply;
pub use self::soa::SoaReply;
pub use self::srv::SrvReply;
pub use self::txt::TxtReply;
pub use self::uri::UriReply;

pub mod caa;
pub mod mx;
pub mod naptr;
pub mod soa;
pub mod srv;
pub mod txt;
pub mod uri;

use crate::base::wire::ParseError;
use crate::resolv::error::Error;
use octseq::parse::Parser;

/// Copies `src` into a new vec, reporting allocation failure.
pub(crate) fn copy_octets(src: &[u8]) -> Result<Vec<u8>, Error> {
    let mut res = Vec::new();
    res.try_reserve_exact(src.len())
        .map_err(|_| Error::NoMemory)?;
    res.extend_from_slice(src);
    Ok(res)
}

/// Takes a character string from the beginning of `parser`.
///
/// A character string is a length octet followed by that many octets.
pub(crate) fn parse_char_str(
    parser: &mut Parser<'_, [u8]>,
) -> Result<Vec<u8>, Error> {
    let len = parser.parse_u8().map_err(ParseError::from)?;
    let octets = parser
        .parse_octets(usize::from(len))
        .map_err(ParseError::from)?;
    copy_octets(octets)
}

/// Formats octets as a quoted string with non-printable octets escaped.
fn fmt_quoted(octets: &[u8], f: &mut core::fmt::Formatter) -> core::fmt::Result {
    use core::fmt::Write;

    f.write_char('"')?;
    for &ch in octets {
        if ch == b'"' || ch == b'\\' {
            write!(f, "\\{}", char::from(ch))?;
        } else if (0x20..0x7f).contains(&ch) {
            f.write_char(char::from(ch))?;
        } else {
            write!(f, "\\{:03}", ch)?;
        }
    }
    f.write_char('"')
}
