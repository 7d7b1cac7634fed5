//! The resolver-facing layer.
//!
//! This module turns raw responses into the results handed to the callers
//! of a stub resolver and provides the [`Channel`] that coordinates the
//! threads sharing one resolver.
//!
//! * [`parse_into_addrinfo`] collects addresses and canonical names for
//!   host name lookups into an [`AddrInfo`],
//! * the functions in [`reply`] produce [`DataChain`]s for CAA, MX, NAPTR,
//!   SOA, SRV, TXT, and URI queries which are released via [`free_data`],
//!   and
//! * [`Channel`] tracks the queries in flight and the name servers to
//!   send them to.
//!
//! All fallible operations report an [`Error`]. Its
//! [`to_code`][Error::to_code] method provides the integer status codes of
//! the legacy interface.

pub use self::addrinfo::{
    parse_into_addrinfo, AddrInfo, AddrInfoCname, AddrInfoNode,
};
pub use self::channel::{queue_wait_empty, Channel, ChannelLock, QueryId};
pub use self::conf::Config;
pub use self::data::{free_data, DataChain, DataNode, DataPayload, DataType};
pub use self::error::Error;
pub use self::reply::{
    parse_caa_reply, parse_mx_reply, parse_naptr_reply, parse_soa_reply,
    parse_srv_reply, parse_txt_reply, parse_uri_reply, store_reply,
};
pub use self::servers::{AddrNode, AddrPortNode};

pub mod addrinfo;
pub mod channel;
pub mod conf;
pub mod data;
pub mod error;
pub mod reply;
pub mod servers;
