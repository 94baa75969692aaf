//! In-process lock service for testing and embedding.
//!
//! [`InMemoryLockService`] keeps the set of held ids behind a `Mutex` and
//! parks waiters on a `Condvar`. Every client that shares one instance (for
//! example through an `Arc`) observes the same per-id total order.

use std::collections::HashSet;
use std::sync::{Condvar, Mutex};

use tracing::trace;
use yfs_types::InodeId;

use crate::error::{LockError, Result};
use crate::traits::LockService;

/// An in-memory implementation of [`LockService`].
#[derive(Debug, Default)]
pub struct InMemoryLockService {
    held: Mutex<HashSet<InodeId>>,
    released: Condvar,
}

impl InMemoryLockService {
    /// Create a service with no locks held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the lock for `id` is currently held.
    pub fn is_locked(&self, id: InodeId) -> bool {
        self.held.lock().expect("lock poisoned").contains(&id)
    }

    /// Number of locks currently held.
    pub fn held_count(&self) -> usize {
        self.held.lock().expect("lock poisoned").len()
    }
}

impl LockService for InMemoryLockService {
    fn acquire(&self, id: InodeId) -> Result<()> {
        let mut held = self
            .held
            .lock()
            .map_err(|e| LockError::Unavailable(format!("lock poisoned: {e}")))?;
        while held.contains(&id) {
            held = self
                .released
                .wait(held)
                .map_err(|e| LockError::Unavailable(format!("lock poisoned: {e}")))?;
        }
        held.insert(id);
        trace!(%id, "lock granted");
        Ok(())
    }

    fn release(&self, id: InodeId) -> Result<()> {
        let mut held = self
            .held
            .lock()
            .map_err(|e| LockError::Unavailable(format!("lock poisoned: {e}")))?;
        if !held.remove(&id) {
            return Err(LockError::NotHeld(id));
        }
        drop(held);
        // Waiters for other ids recheck and go back to sleep.
        self.released.notify_all();
        trace!(%id, "lock released");
        Ok(())
    }
}
