//! Error type for the resolver.

#![warn(missing_docs)]

use crate::base::wire::ParseError;
use std::error;
use std::fmt::{Display, Formatter};

//------------ Error ---------------------------------------------------------

/// Error type for the resolver.
///
/// Each variant corresponds to one of the status codes callers of the
/// legacy interface expect. Use [`Error::to_code`] and
/// [`Error::from_code`] to convert between the two.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The response was malformed.
    BadResponse,

    /// The response did not contain the requested data.
    NoData,

    /// Allocating memory failed.
    NoMemory,

    /// A lookup or a join outside of parsing failed.
    NotFound,

    /// A wait ended because its deadline had passed.
    Timeout,

    /// An argument was invalid.
    FormErr,

    /// The operation needs thread support which is not available.
    NotImp,

    /// A platform object could not be created.
    ServFail,
}

impl Error {
    /// The legacy status code for success.
    pub const SUCCESS: i32 = 0;

    /// Returns the legacy integer status code for the error.
    pub fn to_code(self) -> i32 {
        match self {
            Error::NoData => 1,
            Error::FormErr => 2,
            Error::ServFail => 3,
            Error::NotFound => 4,
            Error::NotImp => 5,
            Error::BadResponse => 10,
            Error::Timeout => 12,
            Error::NoMemory => 15,
        }
    }

    /// Returns the error for a legacy status code.
    ///
    /// Returns `None` for [`Error::SUCCESS`] and for codes that have no
    /// corresponding variant.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Error::NoData),
            2 => Some(Error::FormErr),
            3 => Some(Error::ServFail),
            4 => Some(Error::NotFound),
            5 => Some(Error::NotImp),
            10 => Some(Error::BadResponse),
            12 => Some(Error::Timeout),
            15 => Some(Error::NoMemory),
            _ => None,
        }
    }

    /// Converts a result into a legacy status code.
    pub fn code_of<T>(res: &Result<T, Error>) -> i32 {
        match res {
            Ok(_) => Self::SUCCESS,
            Err(err) => err.to_code(),
        }
    }
}

//--- From

impl From<ParseError> for Error {
    fn from(_: ParseError) -> Self {
        Error::BadResponse
    }
}

//--- Display and Error

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::BadResponse => write!(f, "misformatted DNS reply"),
            Error::NoData => write!(f, "DNS server returned answer with no data"),
            Error::NoMemory => write!(f, "out of memory"),
            Error::NotFound => write!(f, "domain name not found"),
            Error::Timeout => write!(f, "timeout while contacting DNS servers"),
            Error::FormErr => write!(f, "invalid argument"),
            Error::NotImp => write!(f, "not implemented"),
            Error::ServFail => write!(f, "server failure"),
        }
    }
}

impl error::Error for Error {}

//============ Testing =======================================================
