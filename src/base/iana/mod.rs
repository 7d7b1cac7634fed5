//! IANA Definitions for DNS.
//!
//! This module contains types for the parameters defined in IANA
//! registries that the response parser needs to look at. Each type wraps
//! the raw integer value and provides associated constants for the
//! well-defined values. Values without a mnemonic are displayed using the
//! generic `TYPE` or `CLASS` prefix followed by the decimal value.

pub use self::class::Class;
pub use self::rtype::Rtype;

#[macro_use]
mod macros;

pub mod class;
pub mod rtype;

