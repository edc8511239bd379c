//! Request Serializer
//!
//! A FIFO gate around the state a requester mutates. Only one exclusive
//! section runs at a time; waiters are admitted in arrival order because
//! tokio's `Mutex` is fair.

use std::future::Future;
use std::ops::{Deref, DerefMut};

use tokio::sync::{Mutex, MutexGuard};

// == Request Serializer ==
#[derive(Debug)]
pub struct RequestSerializer<S> {
    state: Mutex<S>,
}

// == Exclusive Section ==
/// Proof of exclusive access. Dropping it, on any path, admits the next waiter.
#[derive(Debug)]
pub struct ExclusiveSection<'a, S> {
    guard: MutexGuard<'a, S>,
}

impl<S> RequestSerializer<S> {
    pub fn new(state: S) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Waits for this caller's turn and returns the exclusive section.
    pub async fn enter(&self) -> ExclusiveSection<'_, S> {
        ExclusiveSection {
            guard: self.state.lock().await,
        }
    }

    /// Runs `critical_section` with exclusive access to the guarded state.
    ///
    /// The section is handed to the closure by value and must be moved into
    /// the future it returns. It is released when that future completes or is
    /// dropped, including when it resolves to an error.
    pub async fn with_exclusive_access<'a, F, Fut, R>(&'a self, critical_section: F) -> R
    where
        F: FnOnce(ExclusiveSection<'a, S>) -> Fut,
        Fut: Future<Output = R> + 'a,
    {
        let section = self.enter().await;
        critical_section(section).await
    }
}

impl<S> Deref for ExclusiveSection<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.guard
    }
}

impl<S> DerefMut for ExclusiveSection<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.guard
    }
}
