//! Test doubles wrapping the in-memory backends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use yfs_extent::{ExtentError, ExtentResult, ExtentStore, InMemoryExtentStore};
use yfs_lock::{InMemoryLockService, LockService};
use yfs_types::{InodeId, ObjectAttr, ObjectKind};

/// Extent store that fails chosen calls with `Unavailable`.
///
/// A fault matches on the operation name and, when given, the id. `create`
/// has no id and matches any fault with `id: None`. A fault lets its first
/// `skip` matching calls through and fails every one after that.
#[derive(Default)]
pub struct FaultyExtentStore {
    pub inner: InMemoryExtentStore,
    faults: Mutex<Vec<Fault>>,
    calls: Mutex<Vec<(&'static str, Option<InodeId>)>>,
}

struct Fault {
    op: &'static str,
    id: Option<InodeId>,
    skip: usize,
}

impl Fault {
    fn matches(&self, op: &str, id: Option<InodeId>) -> bool {
        self.op == op && (self.id.is_none() || self.id == id)
    }
}

impl FaultyExtentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, op: &'static str, id: Option<InodeId>) {
        self.fail_after(op, id, 0);
    }

    /// Like [`fail`](Self::fail), but the first `skip` matching calls succeed.
    pub fn fail_after(&self, op: &'static str, id: Option<InodeId>, skip: usize) {
        self.faults.lock().unwrap().push(Fault { op, id, skip });
    }

    pub fn heal(&self) {
        self.faults.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<(&'static str, Option<InodeId>)> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, op: &'static str, id: Option<InodeId>) -> ExtentResult<()> {
        self.calls.lock().unwrap().push((op, id));
        let mut faults = self.faults.lock().unwrap();
        let mut hit = false;
        for fault in faults.iter_mut().filter(|f| f.matches(op, id)) {
            if fault.skip > 0 {
                fault.skip -= 1;
            } else {
                hit = true;
            }
        }
        if hit {
            return Err(ExtentError::Unavailable(format!("injected {op} fault")));
        }
        Ok(())
    }
}

impl ExtentStore for FaultyExtentStore {
    fn get(&self, id: InodeId) -> ExtentResult<Vec<u8>> {
        self.check("get", Some(id))?;
        self.inner.get(id)
    }

    fn put(&self, id: InodeId, data: &[u8]) -> ExtentResult<()> {
        self.check("put", Some(id))?;
        self.inner.put(id, data)
    }

    fn create(&self, kind: ObjectKind) -> ExtentResult<InodeId> {
        self.check("create", None)?;
        self.inner.create(kind)
    }

    fn remove(&self, id: InodeId) -> ExtentResult<()> {
        self.check("remove", Some(id))?;
        self.inner.remove(id)
    }

    fn getattr(&self, id: InodeId) -> ExtentResult<ObjectAttr> {
        self.check("getattr", Some(id))?;
        self.inner.getattr(id)
    }
}

/// Lock service that records how many locks were ever held at once.
#[derive(Default)]
pub struct RecordingLockService {
    pub inner: InMemoryLockService,
    held: AtomicUsize,
    max_held: AtomicUsize,
    acquired: Mutex<Vec<InodeId>>,
}

impl RecordingLockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_held(&self) -> usize {
        self.max_held.load(Ordering::SeqCst)
    }

    pub fn acquired(&self) -> Vec<InodeId> {
        self.acquired.lock().unwrap().clone()
    }
}

impl LockService for RecordingLockService {
    fn acquire(&self, id: InodeId) -> yfs_lock::Result<()> {
        self.inner.acquire(id)?;
        let now = self.held.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_held.fetch_max(now, Ordering::SeqCst);
        self.acquired.lock().unwrap().push(id);
        Ok(())
    }

    fn release(&self, id: InodeId) -> yfs_lock::Result<()> {
        self.inner.release(id)?;
        self.held.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}
