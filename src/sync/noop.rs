//! Thread primitives for builds without thread support.
//!
//! Locking and signalling do nothing. Everything that would have to block
//! fails with [`Error::NotImp`].

use crate::resolv::error::Error;
use core::marker::PhantomData;
use std::time::Duration;

/// Returns whether the thread primitives are functional.
pub fn threadsafety() -> bool {
    false
}

//------------ ThreadMutex ---------------------------------------------------

#[derive(Debug, Default)]
pub struct ThreadMutex(());

impl ThreadMutex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) {}

    pub fn unlock(&self) {}

    /// Always returns `false` as there is nobody to hold the mutex.
    pub fn is_held_by_current_thread(&self) -> bool {
        false
    }
}

//------------ ThreadCond ----------------------------------------------------

#[derive(Debug, Default)]
pub struct ThreadCond(());

impl ThreadCond {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) {}

    pub fn broadcast(&self) {}

    pub fn wait(&self, _mutex: &ThreadMutex) -> Result<(), Error> {
        Err(Error::NotImp)
    }

    pub fn timed_wait(
        &self,
        _mutex: &ThreadMutex,
        _timeout: Duration,
    ) -> Result<(), Error> {
        Err(Error::NotImp)
    }
}

//------------ Thread --------------------------------------------------------

#[derive(Debug)]
pub struct Thread<T> {
    marker: PhantomData<T>,
}

impl<T: Send + 'static> Thread<T> {
    pub fn create<F, A>(_func: F, _arg: A) -> Result<Self, Error>
    where
        F: FnOnce(A) -> T + Send + 'static,
        A: Send + 'static,
    {
        Err(Error::NotImp)
    }

    pub fn join(self) -> Result<T, Error> {
        Err(Error::NotImp)
    }
}

//============ Testing =======================================================
