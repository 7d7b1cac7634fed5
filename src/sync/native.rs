//! Thread primitives built on native threads.

use crate::resolv::error::Error;
use parking_lot::{Condvar, Mutex};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};
use tracing::warn;

/// Returns whether the thread primitives are functional.
pub fn threadsafety() -> bool {
    true
}

//------------ ThreadMutex ---------------------------------------------------

/// A recursive mutex.
///
/// The thread holding the mutex may lock it again. It is released once
/// [`unlock`][Self::unlock] has been called as often as
/// [`lock`][Self::lock].
///
/// The mutex doesn’t protect any data itself. It only provides mutual
/// exclusion and can be waited on through a [`ThreadCond`].
#[derive(Debug, Default)]
pub struct ThreadMutex {
    /// Who holds the mutex how often.
    state: Mutex<LockState>,

    /// Notified whenever the mutex becomes available.
    released: Condvar,
}

#[derive(Debug, Default)]
struct LockState {
    owner: Option<ThreadId>,
    depth: usize,
}

impl LockState {
    fn is_owned_by(&self, id: ThreadId) -> bool {
        self.owner == Some(id)
    }
}

impl ThreadMutex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the mutex, blocking until it is available.
    pub fn lock(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock();
        if state.is_owned_by(me) {
            state.depth += 1;
            return;
        }
        while state.owner.is_some() {
            self.released.wait(&mut state);
        }
        state.owner = Some(me);
        state.depth = 1;
    }

    /// Releases the mutex once.
    ///
    /// Unlocking a mutex not held by the current thread does nothing.
    pub fn unlock(&self) {
        let mut state = self.state.lock();
        if !state.is_owned_by(thread::current().id()) {
            warn!("attempt to unlock a mutex held by another thread");
            return;
        }
        state.depth -= 1;
        if state.depth == 0 {
            state.owner = None;
            self.released.notify_one();
        }
    }

    /// Returns whether the current thread holds the mutex.
    pub fn is_held_by_current_thread(&self) -> bool {
        self.state.lock().is_owned_by(thread::current().id())
    }
}

//------------ ThreadCond ----------------------------------------------------

/// A condition variable used together with a [`ThreadMutex`].
#[derive(Debug, Default)]
pub struct ThreadCond {
    cond: Condvar,
}

impl ThreadCond {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wakes up one waiting thread.
    pub fn signal(&self) {
        self.cond.notify_one();
    }

    /// Wakes up all waiting threads.
    pub fn broadcast(&self) {
        self.cond.notify_all();
    }

    /// Waits to be woken up.
    ///
    /// The current thread has to hold `mutex`. It is released while
    /// waiting, regardless of how often it has been locked, and reacquired
    /// to the same depth before returning. Wakeups may be spurious.
    ///
    /// Fails with [`Error::FormErr`] if the current thread doesn’t hold
    /// the mutex.
    pub fn wait(&self, mutex: &ThreadMutex) -> Result<(), Error> {
        self.wait_until(mutex, None)
    }

    /// Waits to be woken up for at most `timeout`.
    ///
    /// Behaves like [`wait`][Self::wait] but fails with
    /// [`Error::Timeout`] if the timeout passes without a wakeup. The
    /// mutex is held again in either case.
    pub fn timed_wait(
        &self,
        mutex: &ThreadMutex,
        timeout: Duration,
    ) -> Result<(), Error> {
        self.wait_until(mutex, Instant::now().checked_add(timeout))
    }

    fn wait_until(
        &self,
        mutex: &ThreadMutex,
        deadline: Option<Instant>,
    ) -> Result<(), Error> {
        let me = thread::current().id();
        let mut state = mutex.state.lock();
        if !state.is_owned_by(me) {
            warn!("attempt to wait on a condition without holding the mutex");
            return Err(Error::FormErr);
        }

        // Hand the mutex over while keeping the inner lock. Signalling
        // threads need the mutex, so they can only get to it once we are
        // parked on the condition and the inner lock has been released.
        let depth = state.depth;
        state.owner = None;
        state.depth = 0;
        mutex.released.notify_one();

        let timed_out = match deadline {
            Some(deadline) => {
                self.cond.wait_until(&mut state, deadline).timed_out()
            }
            None => {
                self.cond.wait(&mut state);
                false
            }
        };

        while state.owner.is_some() {
            mutex.released.wait(&mut state);
        }
        state.owner = Some(me);
        state.depth = depth;

        if timed_out {
            Err(Error::Timeout)
        } else {
            Ok(())
        }
    }
}

//------------ Thread --------------------------------------------------------

/// A thread of execution.
#[derive(Debug)]
pub struct Thread<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> Thread<T> {
    /// Starts a new thread running `func` with `arg`.
    ///
    /// Fails with [`Error::ServFail`] if the thread cannot be created.
    pub fn create<F, A>(func: F, arg: A) -> Result<Self, Error>
    where
        F: FnOnce(A) -> T + Send + 'static,
        A: Send + 'static,
    {
        thread::Builder::new()
            .spawn(move || func(arg))
            .map(|handle| Thread { handle })
            .map_err(|err| {
                warn!("failed to create thread: {}", err);
                Error::ServFail
            })
    }

    /// Waits for the thread to finish and returns its result.
    ///
    /// Fails with [`Error::NotFound`] if the thread panicked.
    pub fn join(self) -> Result<T, Error> {
        self.handle.join().map_err(|_| Error::NotFound)
    }
}

//============ Testing =======================================================
