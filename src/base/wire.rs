//! Consuming data in wire format.

use core::fmt;
use octseq::parse::{Parser, ShortInput};

//------------ Parse ---------------------------------------------------------

/// A type that can extract a value from a parser.
///
/// This is implemented for the integer types that appear in fixed-size
/// parts of DNS messages so that header fields can be read generically.
pub trait Parse<'a>: Sized {
    /// Extracts a value from the beginning of `parser`.
    ///
    /// If parsing fails, the parser’s position is undefined.
    fn parse(parser: &mut Parser<'a, [u8]>) -> Result<Self, ParseError>;
}

impl<'a> Parse<'a> for u8 {
    fn parse(parser: &mut Parser<'a, [u8]>) -> Result<Self, ParseError> {
        parser.parse_u8().map_err(Into::into)
    }
}

impl<'a> Parse<'a> for u16 {
    fn parse(parser: &mut Parser<'a, [u8]>) -> Result<Self, ParseError> {
        parser.parse_u16_be().map_err(Into::into)
    }
}

impl<'a> Parse<'a> for u32 {
    fn parse(parser: &mut Parser<'a, [u8]>) -> Result<Self, ParseError> {
        parser.parse_u32_be().map_err(Into::into)
    }
}

//============ Error Types ===================================================

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An attempt was made to go beyond the end of the parser.
    ShortInput,

    /// A formatting error occurred.
    Form(FormError),
}

impl ParseError {
    /// Creates a new parse error as a form error with the given message.
    pub fn form_error(msg: &'static str) -> Self {
        FormError::new(msg).into()
    }
}

//--- From

impl From<ShortInput> for ParseError {
    fn from(_: ShortInput) -> Self {
        ParseError::ShortInput
    }
}

impl From<FormError> for ParseError {
    fn from(err: FormError) -> Self {
        ParseError::Form(err)
    }
}

//--- Display and Error

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::ShortInput => f.write_str("unexpected end of input"),
            ParseError::Form(ref err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}

//------------ FormError -----------------------------------------------------

/// A formatting error occured.
///
/// This is a generic error for all kinds of error cases that result in data
/// not being accepted. For diagnostics, the error is being given a static
/// string describing the error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormError(&'static str);

impl FormError {
    /// Creates a new form error value with the given diagnostics string.
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }
}

//--- Display and Error

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FormError {}

//============ Testing =======================================================
