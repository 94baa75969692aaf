use yfs_types::{InodeId, ObjectAttr, ObjectKind};

use crate::error::ExtentResult;

/// Keyed blob store holding the content and attributes of every object.
///
/// All implementations must satisfy these invariants:
/// - An id names at most one extent; its kind never changes after `create`.
/// - `put` replaces the whole content in one step. There is no partial write.
/// - The store never interprets content. Directory encoding belongs to the
///   client.
/// - The store performs no locking on behalf of callers; mutual exclusion
///   is the lock service's job.
/// - All failures are returned, never silently ignored.
pub trait ExtentStore: Send + Sync {
    /// Fetch the full content of an extent.
    fn get(&self, id: InodeId) -> ExtentResult<Vec<u8>>;

    /// Replace the full content of an existing extent.
    fn put(&self, id: InodeId, data: &[u8]) -> ExtentResult<()>;

    /// Allocate a new, empty extent of the given kind and return its id.
    fn create(&self, kind: ObjectKind) -> ExtentResult<InodeId>;

    /// Delete an extent and its content.
    fn remove(&self, id: InodeId) -> ExtentResult<()>;

    /// Fetch the attribute record of an extent.
    fn getattr(&self, id: InodeId) -> ExtentResult<ObjectAttr>;
}
