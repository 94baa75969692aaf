use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tracing::debug;
use yfs_types::{unix_now, InodeId, ObjectAttr, ObjectKind};

use crate::error::{ExtentError, ExtentResult};
use crate::extent::Extent;
use crate::traits::ExtentStore;

/// In-memory, HashMap-based extent store.
///
/// Intended for tests and embedding. All extents are held in memory behind a
/// `RwLock`. The root directory extent exists from construction; fresh ids
/// start right after the root and are never reused.
pub struct InMemoryExtentStore {
    extents: RwLock<HashMap<InodeId, Extent>>,
    next_id: AtomicU64,
}

impl InMemoryExtentStore {
    /// Create a store holding only the empty root directory.
    pub fn new() -> Self {
        let mut extents = HashMap::new();
        extents.insert(InodeId::ROOT, Extent::new(ObjectKind::Directory, unix_now()));
        Self {
            extents: RwLock::new(extents),
            next_id: AtomicU64::new(InodeId::ROOT.get() + 1),
        }
    }

    /// Number of extents currently stored, root included.
    pub fn len(&self) -> usize {
        self.extents.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no extents.
    pub fn is_empty(&self) -> bool {
        self.extents.read().expect("lock poisoned").is_empty()
    }

    /// Returns `true` if an extent is stored under `id`.
    pub fn contains(&self, id: InodeId) -> bool {
        self.extents.read().expect("lock poisoned").contains_key(&id)
    }

    /// Return a sorted list of all ids in the store.
    pub fn all_ids(&self) -> Vec<InodeId> {
        let map = self.extents.read().expect("lock poisoned");
        let mut ids: Vec<InodeId> = map.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryExtentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtentStore for InMemoryExtentStore {
    fn get(&self, id: InodeId) -> ExtentResult<Vec<u8>> {
        let mut map = self.extents.write().expect("lock poisoned");
        let extent = map.get_mut(&id).ok_or(ExtentError::NotFound(id))?;
        extent.touch(unix_now());
        Ok(extent.data.clone())
    }

    fn put(&self, id: InodeId, data: &[u8]) -> ExtentResult<()> {
        let mut map = self.extents.write().expect("lock poisoned");
        let extent = map.get_mut(&id).ok_or(ExtentError::NotFound(id))?;
        extent.replace(data, unix_now());
        debug!(%id, len = data.len(), "extent put");
        Ok(())
    }

    fn create(&self, kind: ObjectKind) -> ExtentResult<InodeId> {
        // The counter stops at u64::MAX instead of wrapping onto the root.
        let raw = self
            .next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .map_err(|_| ExtentError::Exhausted)?;
        let id = InodeId::new(raw);
        let mut map = self.extents.write().expect("lock poisoned");
        map.insert(id, Extent::new(kind, unix_now()));
        debug!(%id, %kind, "extent created");
        Ok(id)
    }

    fn remove(&self, id: InodeId) -> ExtentResult<()> {
        let mut map = self.extents.write().expect("lock poisoned");
        map.remove(&id).ok_or(ExtentError::NotFound(id))?;
        debug!(%id, "extent removed");
        Ok(())
    }

    fn getattr(&self, id: InodeId) -> ExtentResult<ObjectAttr> {
        let map = self.extents.read().expect("lock poisoned");
        map.get(&id).map(Extent::attr).ok_or(ExtentError::NotFound(id))
    }
}

impl std::fmt::Debug for InMemoryExtentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryExtentStore")
            .field("extent_count", &count)
            .finish()
    }
}
