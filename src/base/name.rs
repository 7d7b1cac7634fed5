//! Decompressing domain names.
//!
//! In an attempt to keep messages small, DNS uses a procedure called ‘name
//! compression.’ It tries to minimize the space used for repeatedly
//! appearing domain names by simply refering to the first occurence of the
//! name. This works not only for complete names but also for suffixes. In
//! this case, the first unique labels of the name are included and then a
//! pointer is included for the remainder of the name.
//!
//! The resolver hands names to its callers as owned strings in
//! presentation format, so this module reassembles a possibly compressed
//! name into a dotted string right away. Since the message is untrusted,
//! every label and every pointer is checked against the bounds of the
//! message before it is followed.

use super::wire::{FormError, ParseError};
use core::fmt;
use core::fmt::Write;
use octseq::parse::Parser;

//------------ Module Configuration ------------------------------------------

/// The maximum length of an uncompressed name in wire format.
const MAX_NAME_LEN: usize = 255;

/// The maximum number of compression pointers followed for a single name.
const MAX_POINTERS: usize = 128;

//------------ NameMode ------------------------------------------------------

/// How strictly the characters of a name are checked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameMode {
    /// Any octet is accepted and escaped in the result if necessary.
    Any,

    /// Only characters permissible in host names are accepted.
    ///
    /// This is used for names that later serve as comparison keys, such as
    /// the target of a CNAME.
    Hostname,
}

//------------ parse_name ----------------------------------------------------

/// Parses a possibly compressed domain name into a dotted string.
///
/// The name starts at the current position of `parser`. Compression
/// pointers are resolved against the full octets sequence of the parser
/// which therefore has to be the complete message. On success, the parser
/// is positioned right after the name as it appears at its original
/// position, i.e., after the first compression pointer if there is one.
///
/// The root name results in an empty string. There is no trailing dot.
pub fn parse_name(
    parser: &mut Parser<'_, [u8]>,
    mode: NameMode,
) -> Result<String, ParseError> {
    let mut res = String::new();
    let mut name_len = 0;
    let mut pointers = 0;

    // The parser we actually read labels from. It starts out as a copy of
    // `parser` and jumps around whenever we encounter a pointer. Once that
    // has happened, `parser` stays put right behind the first pointer.
    let mut labels = *parser;
    let mut compressed = false;

    loop {
        let header_pos = labels.pos();
        match LabelType::parse(&mut labels)? {
            LabelType::Normal(0) => {
                // Root label.
                name_len += 1;
                if name_len > MAX_NAME_LEN {
                    return Err(NameError::LongName.into());
                }
                if !compressed {
                    *parser = labels;
                }
                return Ok(res);
            }
            LabelType::Normal(label_len) => {
                let label = labels.parse_octets(label_len.into())?;
                name_len += label.len() + 1;
                if name_len > MAX_NAME_LEN {
                    return Err(NameError::LongName.into());
                }
                if !res.is_empty() {
                    res.push('.');
                }
                push_label(&mut res, label, mode)?;
            }
            LabelType::Compressed(ptr) => {
                // The pointer has to point backwards from the label header
                // so it can’t point to itself.
                if ptr >= header_pos {
                    return Err(NameError::BadCompression.into());
                }
                pointers += 1;
                if pointers > MAX_POINTERS {
                    return Err(NameError::BadCompression.into());
                }
                if !compressed {
                    *parser = labels;
                    compressed = true;
                }
                labels.seek(ptr)?;
            }
        }
    }
}

/// Expands the name starting at `pos` within the message `msg`.
///
/// Returns the name and the number of octets it occupies at `pos`.
/// Octets reached only through compression pointers don’t count.
pub fn expand_name(
    msg: &[u8],
    pos: usize,
    mode: NameMode,
) -> Result<(String, usize), ParseError> {
    let mut parser = Parser::from_ref(msg);
    parser.seek(pos)?;
    let name = parse_name(&mut parser, mode)?;
    Ok((name, parser.pos() - pos))
}

/// Appends the presentation format of a label to `target`.
fn push_label(
    target: &mut String,
    label: &[u8],
    mode: NameMode,
) -> Result<(), NameError> {
    for &ch in label {
        if mode == NameMode::Hostname && !is_hostname_char(ch) {
            return Err(NameError::BadHostname);
        }
        if !(0x20..0x7f).contains(&ch) {
            // Writing to a string can’t fail.
            let _ = write!(target, "\\{:03}", ch);
        } else if is_reserved_char(ch) {
            target.push('\\');
            target.push(char::from(ch));
        } else {
            target.push(char::from(ch));
        }
    }
    Ok(())
}

/// Returns whether `ch` may appear in a host name.
fn is_hostname_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, b'-' | b'.' | b'_' | b'/' | b'*')
}

/// Returns whether `ch` needs escaping in presentation format.
fn is_reserved_char(ch: u8) -> bool {
    matches!(ch, b'"' | b'.' | b';' | b'\\' | b'(' | b')' | b'@' | b'$')
}

//------------ LabelType -----------------------------------------------------

/// The type of a label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelType {
    /// A normal label with its size in octets.
    Normal(u8),

    /// A compressed label with the position of where to continue.
    Compressed(usize),
}

impl LabelType {
    /// Attempts to take a label type from the beginning of `parser`.
    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let ltype = parser.parse_u8()?;
        match ltype {
            0..=0x3F => Ok(LabelType::Normal(ltype)),
            0xC0..=0xFF => {
                let res = usize::from(parser.parse_u8()?);
                let res = res | ((usize::from(ltype) & 0x3F) << 8);
                Ok(LabelType::Compressed(res))
            }
            _ => Err(NameError::BadLabel.into()),
        }
    }
}

//------------ NameError -----------------------------------------------------

/// Decompressing a domain name failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// A label with an unknown or extended label type was encountered.
    BadLabel,

    /// The name is longer than the 255 octets allowed.
    LongName,

    /// A compression pointer points forward or there are too many of them.
    BadCompression,

    /// A character not allowed in host names was encountered.
    BadHostname,
}

impl From<NameError> for FormError {
    fn from(err: NameError) -> FormError {
        FormError::new(match err {
            NameError::BadLabel => "invalid label type",
            NameError::LongName => "long domain name",
            NameError::BadCompression => "invalid compression pointer",
            NameError::BadHostname => "invalid character in host name",
        })
    }
}

impl From<NameError> for ParseError {
    fn from(err: NameError) -> ParseError {
        ParseError::Form(err.into())
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        FormError::from(*self).fmt(f)
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    fn expand(msg: &[u8], pos: usize) -> Result<(String, usize), ParseError> {
        expand_name(msg, pos, NameMode::Any)
    }

    fn form(err: NameError) -> Result<(String, usize), ParseError> {
        Err(err.into())
    }

    #[test]
    fn flat() {
        assert_eq!(
            expand(b"\x03www\x07example\x03com\0", 0),
            Ok(("www.example.com".into(), 17))
        );
        assert_eq!(expand(b"\0", 0), Ok((String::new(), 1)));
    }

    #[test]
    fn compressed() {
        // "example.com" at 0, "www" + pointer to 0 at 13, a pointer to 13
        // at 19.
        let msg = b"\x07example\x03com\0\x03www\xc0\x00\xc0\x0d";
        assert_eq!(expand(msg, 13), Ok(("www.example.com".into(), 6)));
        assert_eq!(expand(msg, 19), Ok(("www.example.com".into(), 2)));
        // A pointer to a pointer.
        let msg = b"\x07example\x03com\0\xc0\x00\xc0\x0d";
        assert_eq!(expand(msg, 15), Ok(("example.com".into(), 2)));
    }

    #[test]
    fn parser_position() {
        let msg = b"\x03com\0\x07example\xc0\x00\x2a";
        let mut parser = Parser::from_ref(&msg[..]);
        parser.seek(5).unwrap();
        let name = parse_name(&mut parser, NameMode::Any).unwrap();
        assert_eq!(name, "example.com");
        assert_eq!(parser.parse_u8().ok(), Some(0x2a));
    }

    #[test]
    fn pointer_loops() {
        // Pointer to itself.
        assert_eq!(expand(b"\x03www\xc0\x04", 4), form(NameError::BadCompression));
        // Forward pointer.
        assert_eq!(
            expand(b"\x03www\xc0\x06\x00\x00", 0),
            form(NameError::BadCompression)
        );
        // Offset 0 points to 2 which points back to 0.
        assert_eq!(expand(b"\xc0\x02\xc0\x00", 0), form(NameError::BadCompression));
        assert_eq!(expand(b"\xc0\x02\xc0\x00", 2), form(NameError::BadCompression));
        // A label followed by a pointer back to it repeats until too long.
        assert_eq!(expand(b"\x01a\xc0\x00", 0), form(NameError::LongName));
    }

    #[test]
    fn out_of_bounds() {
        // Pointer beyond the end of the message.
        assert_eq!(
            expand(b"\x03www\xc0\xee\x00\x00", 4),
            form(NameError::BadCompression)
        );
        assert_eq!(expand(b"\x00\x03www\xc0", 1), Err(ParseError::ShortInput));
        // Label running past the end.
        assert_eq!(expand(b"\x03www\x07exam", 0), Err(ParseError::ShortInput));
        // Missing root label.
        assert_eq!(expand(b"\x03www", 0), Err(ParseError::ShortInput));
        // Start beyond the end.
        assert_eq!(expand(b"\x00", 2), Err(ParseError::ShortInput));
    }

    #[test]
    fn bad_label_type() {
        assert_eq!(expand(b"\x03www\x41foo\0", 0), form(NameError::BadLabel));
        assert_eq!(expand(b"\x80", 0), form(NameError::BadLabel));
    }

    #[test]
    fn long_name() {
        // 255 octets are fine.
        let mut buf = Vec::new();
        for _ in 0..4 {
            buf.push(62);
            buf.extend_from_slice(&[b'a'; 62]);
        }
        buf.push(1);
        buf.push(b'b');
        buf.push(0);
        assert_eq!(buf.len(), 255);
        assert_eq!(expand(&buf, 0).map(|(_, len)| len), Ok(255));

        // 256 are not.
        buf.truncate(252);
        buf.push(2);
        buf.extend_from_slice(b"bb");
        buf.push(0);
        assert_eq!(buf.len(), 256);
        assert_eq!(expand(&buf, 0), form(NameError::LongName));
    }

    #[test]
    fn escaping() {
        assert_eq!(
            expand(b"\x04a.b\\\x03\x01\x7f\xff\0", 0),
            Ok(("a\\.b\\\\.\\001\\127\\255".into(), 10))
        );
        assert_eq!(
            expand(b"\x05a;(@$\0", 0),
            Ok(("a\\;\\(\\@\\$".into(), 7))
        );
    }

    #[test]
    fn hostname_mode() {
        let good = b"\x05_srv-\x03a/*\0";
        assert_eq!(
            expand_name(good, 0, NameMode::Hostname),
            Ok(("_srv-.a/*".into(), 11))
        );
        let bad = b"\x04a b!\0";
        assert!(expand(bad, 0).is_ok());
        assert_eq!(
            expand_name(bad, 0, NameMode::Hostname),
            form(NameError::BadHostname)
        );
    }
}
