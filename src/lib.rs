//! Response parsing and channel synchronization for a DNS stub resolver.
//!
//! This crate provides the part of a stub resolver that has to deal with
//! untrusted data and with concurrent callers: it decodes raw DNS response
//! messages into owned, typed results and it coordinates threads sharing a
//! single resolver channel. Sending queries, caching, and retrying are left
//! to the surrounding resolver. It is simply handed the octets of a
//! response and consumes the results through the types defined here.
//!
//! # Modules
//!
//! * [base] contains the wire-level building blocks: the header, domain
//!   name decompression, and a bounds-checked scanner over the answer
//!   section of a message,
//! * [rdata] contains the record data types produced from answers,
//! * [resolv] contains the functions turning a response into results,
//!   the generic result container, and the resolver channel with its
//!   query registry, and
//! * [sync] contains the thread primitives the channel is built upon.
//!
//! # Reference of Feature Flags
//!
//! * `threads`: enables the native thread primitives in [sync]. This
//!   feature is enabled by default. Without it, all locking operations are
//!   no-ops and all blocking operations fail with
//!   [`Error::NotImp`][resolv::Error::NotImp].

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod rdata;
pub mod resolv;
pub mod sync;
