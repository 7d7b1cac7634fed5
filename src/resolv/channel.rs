//! The resolver channel.
//!
//! A [`Channel`] is shared by all threads using the same resolver. It
//! keeps track of the queries currently in flight and allows a thread to
//! wait until all of them have finished via
//! [`queue_wait_empty`][Channel::queue_wait_empty].
//!
//! The channel also holds the list of name servers which is exchanged
//! with callers as a [`DataChain`] of address nodes.
//!
//! All access to the query registry happens through a [`ChannelLock`]
//! obtained from [`Channel::lock`]. The lock is recursive, so a thread
//! holding it may lock the channel again. It must only be held for short
//! periods. In particular, it isn’t held while a response is parsed.

use super::addrinfo::{parse_into_addrinfo, AddrInfo};
use super::conf::Config;
use super::data::{ChainBuilder, DataChain, DataPayload};
use super::error::Error;
use super::servers::{AddrNode, AddrPortNode};
use crate::base::iana::Rtype;
use crate::sync::{threadsafety, ThreadCond, ThreadMutex};
use core::marker::PhantomData;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

//------------ Module Configuration ------------------------------------------

/// How many random query IDs are tried before searching for a free one.
const RANDOM_ID_ATTEMPTS: usize = 16;

//------------ Channel -------------------------------------------------------

/// The state shared by all users of a resolver.
#[derive(Debug, Default)]
pub struct Channel {
    /// User configuration.
    config: Config,

    /// The channel lock.
    lock: ThreadMutex,

    /// Broadcast when the registry becomes empty.
    cond_empty: ThreadCond,

    /// The queries currently in flight.
    ///
    /// The inner mutex only makes the map shareable. Logically, the map
    /// belongs to whoever holds `lock`.
    queries: Mutex<HashMap<QueryId, PendingQuery>>,

    /// The name servers queries are sent to.
    servers: Mutex<Vec<AddrPortNode>>,
}

impl Channel {
    /// Creates a new channel with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new channel with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Channel {
            config,
            ..Default::default()
        }
    }

    /// Returns the configuration of the channel.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Acquires the channel lock.
    pub fn lock(&self) -> ChannelLock<'_> {
        self.lock.lock();
        ChannelLock {
            channel: self,
            marker: PhantomData,
        }
    }

    /// Waits until no more queries are in flight.
    ///
    /// A negative `timeout_ms` waits forever. Otherwise, fails with
    /// [`Error::Timeout`] if queries are still in flight after that many
    /// milliseconds. A timeout of zero thus only checks the registry.
    ///
    /// Fails with [`Error::NotImp`] if there is no thread support and
    /// with [`Error::FormErr`] if the current thread holds the channel
    /// lock.
    pub fn queue_wait_empty(&self, timeout_ms: i32) -> Result<(), Error> {
        if !threadsafety() {
            return Err(Error::NotImp);
        }
        if self.lock.is_held_by_current_thread() {
            warn!("waiting for an empty queue while holding the channel lock");
            return Err(Error::FormErr);
        }

        let deadline = u64::try_from(timeout_ms)
            .ok()
            .map(|ms| Instant::now() + Duration::from_millis(ms));

        let guard = self.lock();
        let mut res = Ok(());
        while guard.pending_queries() > 0 {
            match deadline {
                None => self.cond_empty.wait(&self.lock)?,
                Some(deadline) => {
                    let remaining =
                        deadline.saturating_duration_since(Instant::now());
                    res = if remaining.as_millis() == 0 {
                        Err(Error::Timeout)
                    } else {
                        self.cond_empty.timed_wait(&self.lock, remaining)
                    };
                    // Loop on anything but a timeout, the wakeup may have
                    // been spurious.
                    if res == Err(Error::Timeout) {
                        debug!(
                            "timeout with {} queries in flight",
                            guard.pending_queries()
                        );
                        break;
                    }
                }
            }
        }
        drop(guard);
        res
    }

    /// Returns the name servers as a chain of [`AddrNode`]s.
    pub fn servers(&self) -> Result<DataChain, Error> {
        let _lock = self.lock();
        let mut chain = ChainBuilder::new();
        for server in self.servers.lock().iter() {
            chain.push(AddrNode::new(server.addr()))?;
        }
        Ok(chain.finish())
    }

    /// Returns the name servers as a chain of [`AddrPortNode`]s.
    pub fn servers_ports(&self) -> Result<DataChain, Error> {
        let _lock = self.lock();
        let mut chain = ChainBuilder::new();
        chain.extend(self.servers.lock().iter().copied())?;
        Ok(chain.finish())
    }

    /// Replaces the name servers.
    ///
    /// The chain may contain [`AddrNode`]s, which use the default port, and
    /// [`AddrPortNode`]s. An empty chain removes all servers. Fails with
    /// [`Error::FormErr`] if the chain contains any other kind of node. The
    /// servers are left unchanged then.
    pub fn set_servers(&self, servers: &DataChain) -> Result<(), Error> {
        let mut new = Vec::new();
        new.try_reserve_exact(servers.len())
            .map_err(|_| Error::NoMemory)?;
        for payload in servers.iter() {
            new.push(match *payload {
                DataPayload::AddrNode(node) => node.into(),
                DataPayload::AddrPortNode(node) => node,
                ref other => {
                    debug!("{} node in server list", other.data_type());
                    return Err(Error::FormErr);
                }
            });
        }
        let _lock = self.lock();
        trace!("setting {} servers", new.len());
        *self.servers.lock() = new;
        Ok(())
    }

    /// Parses the response to a registered address query into `ai`.
    ///
    /// The response is parsed without holding the channel lock using the
    /// port and CNAME policy from the channel’s configuration. Afterwards,
    /// the query is removed from the registry whether parsing succeeded or
    /// not. Fails with [`Error::NotFound`] without parsing if `id` isn’t
    /// registered.
    pub fn process_addrinfo(
        &self,
        id: QueryId,
        msg: &[u8],
        ai: &mut AddrInfo,
    ) -> Result<(), Error> {
        if self.lock().query(id).is_none() {
            debug!("response for unknown query {}", id);
            return Err(Error::NotFound);
        }
        let res = parse_into_addrinfo(
            msg,
            self.config.cname_only_is_nodata(),
            self.config.port(),
            ai,
        );
        self.lock().complete_query(id);
        res
    }
}

/// Waits until no more queries are in flight on `channel`.
///
/// Fails with [`Error::NotImp`] if there is no thread support and with
/// [`Error::FormErr`] if no channel is given. See
/// [`Channel::queue_wait_empty`] for everything else.
pub fn queue_wait_empty(
    channel: Option<&Channel>,
    timeout_ms: i32,
) -> Result<(), Error> {
    if !threadsafety() {
        return Err(Error::NotImp);
    }
    channel.ok_or(Error::FormErr)?.queue_wait_empty(timeout_ms)
}

//------------ ChannelLock ---------------------------------------------------

/// The channel lock held by the current thread.
///
/// The lock is released when the value is dropped. Since only the thread
/// that acquired the lock can release it, the guard can’t be sent to
/// another thread:
///
/// ```compile_fail
/// use domain_stub::resolv::Channel;
///
/// fn send<T: Send>(_: T) {}
///
/// let channel = Channel::new();
/// send(channel.lock());
/// ```
pub struct ChannelLock<'a> {
    channel: &'a Channel,

    /// Keeps the guard on the thread that owns the lock.
    marker: PhantomData<*const ()>,
}

impl ChannelLock<'_> {
    /// Adds a query to the registry and returns its ID.
    ///
    /// The ID is picked at random among those not currently in use. Fails
    /// with [`Error::NoMemory`] if all of them are.
    pub fn register_query(
        &self,
        name: impl Into<String>,
        rtype: Rtype,
    ) -> Result<QueryId, Error> {
        let mut queries = self.channel.queries.lock();
        let id = (0..RANDOM_ID_ATTEMPTS)
            .map(|_| QueryId(rand::random()))
            .find(|id| !queries.contains_key(id))
            .or_else(|| {
                let start: u16 = rand::random();
                (0..=u16::MAX)
                    .map(|offset| QueryId(start.wrapping_add(offset)))
                    .find(|id| !queries.contains_key(id))
            });
        let id = match id {
            Some(id) => id,
            None => {
                warn!("no free query ID with {} queries in flight", queries.len());
                return Err(Error::NoMemory);
            }
        };
        let query = PendingQuery {
            name: name.into(),
            rtype,
        };
        trace!("registered query {} for {} {}", id, query.name, query.rtype);
        queries.insert(id, query);
        Ok(id)
    }

    /// Removes a query from the registry.
    ///
    /// Wakes up all threads waiting for an empty queue if this was the
    /// last query. Returns the query or `None` if it wasn’t registered.
    pub fn complete_query(&self, id: QueryId) -> Option<PendingQuery> {
        let query = self.channel.queries.lock().remove(&id);
        if query.is_some() {
            trace!("completed query {}", id);
        }
        self.notify_if_queue_empty();
        query
    }

    /// Wakes up all threads waiting for an empty queue if it is empty.
    pub fn notify_if_queue_empty(&self) {
        if self.pending_queries() == 0 {
            self.channel.cond_empty.broadcast();
        }
    }

    /// Returns the number of queries in flight.
    pub fn pending_queries(&self) -> usize {
        self.channel.queries.lock().len()
    }

    /// Returns a registered query.
    pub fn query(&self, id: QueryId) -> Option<PendingQuery> {
        self.channel.queries.lock().get(&id).cloned()
    }
}

impl Drop for ChannelLock<'_> {
    fn drop(&mut self) {
        self.channel.lock.unlock();
    }
}

//------------ QueryId -------------------------------------------------------

/// The identifier of a query in flight.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct QueryId(u16);

impl QueryId {
    pub fn to_int(self) -> u16 {
        self.0
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

//------------ PendingQuery --------------------------------------------------

/// A query in flight.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingQuery {
    name: String,
    rtype: Rtype,
}

impl PendingQuery {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rtype(&self) -> Rtype {
        self.rtype
    }
}

//============ Testing =======================================================
