//! Thread primitives.
//!
//! This module provides a recursive mutex, a condition variable that works
//! with it, and a thread handle. With the `threads` feature enabled, these
//! are backed by native threads. Without it, locking and signalling are
//! no-ops while waiting and creating threads fail with
//! [`Error::NotImp`][crate::resolv::Error::NotImp].
//!
//! The mutex doesn’t wrap the data it protects. It guards state stored
//! elsewhere, typically behind its own short-lived lock, and serves as the
//! anchor for waiting on a [`ThreadCond`].

#[cfg(feature = "threads")]
pub use self::native::{threadsafety, Thread, ThreadCond, ThreadMutex};
#[cfg(not(feature = "threads"))]
pub use self::noop::{threadsafety, Thread, ThreadCond, ThreadMutex};

#[cfg(feature = "threads")]
mod native;
#[cfg(not(feature = "threads"))]
mod noop;
