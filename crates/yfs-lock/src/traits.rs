use yfs_types::InodeId;

use crate::error::Result;

/// Exclusive, id-scoped lock service shared by every client.
///
/// For a given id, at most one holder exists at any time across all clients
/// using the same service. Holders are not tracked per caller: whoever
/// acquired the lock is expected to release it.
pub trait LockService: Send + Sync {
    /// Block until the lock for `id` is granted.
    fn acquire(&self, id: InodeId) -> Result<()>;

    /// Release the lock for `id`.
    fn release(&self, id: InodeId) -> Result<()>;
}
