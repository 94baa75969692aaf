//! Scoped lock ownership.
//!
//! A [`LockGuard`] holds the lock for one id from construction until it is
//! released explicitly or dropped. Explicit release surfaces the service's
//! error; the drop path can only log it.

use tracing::warn;
use yfs_types::InodeId;

use crate::error::Result;
use crate::traits::LockService;

/// Holds the lock for one id for as long as the guard lives.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a> {
    service: &'a dyn LockService,
    id: InodeId,
    released: bool,
}

impl<'a> LockGuard<'a> {
    /// Block until the lock for `id` is granted and wrap it in a guard.
    pub fn acquire(service: &'a dyn LockService, id: InodeId) -> Result<Self> {
        service.acquire(id)?;
        Ok(Self {
            service,
            id,
            released: false,
        })
    }

    /// The id this guard locks.
    pub fn id(&self) -> InodeId {
        self.id
    }

    /// Release the lock now and report the service's answer.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.service.release(self.id)
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.service.release(self.id) {
            warn!(id = %self.id, error = %e, "failed to release lock on drop");
        }
    }
}

impl std::fmt::Debug for LockGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard")
            .field("id", &self.id)
            .field("released", &self.released)
            .finish()
    }
}
