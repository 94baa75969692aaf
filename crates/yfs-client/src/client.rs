use std::sync::Arc;

use tracing::{debug, warn};
use yfs_dir::{Directory, DirectoryCodec};
use yfs_extent::{ExtentError, ExtentStore};
use yfs_lock::{LockGuard, LockService};
use yfs_types::{DirEntry, DirInfo, FileInfo, InodeId, ObjectAttr, ObjectKind};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Names `mkdir` and `unlink` refuse outright.
const RESERVED_NAMES: [&str; 2] = [".", ".."];

/// POSIX-like filesystem client over a shared extent store and lock service.
///
/// The client keeps no state of its own beyond its configuration: every call
/// reads what it needs from the store under the relevant lock and writes its
/// result back before returning. Clients sharing the same collaborators see
/// one consistent namespace.
pub struct FileSystemClient {
    extents: Arc<dyn ExtentStore>,
    locks: Arc<dyn LockService>,
    codec: DirectoryCodec,
    config: ClientConfig,
}

impl FileSystemClient {
    /// Create a client and, unless disabled, reset the root to an empty
    /// directory.
    pub fn new(
        extents: Arc<dyn ExtentStore>,
        locks: Arc<dyn LockService>,
        config: ClientConfig,
    ) -> ClientResult<Self> {
        let client = Self {
            extents,
            locks,
            codec: DirectoryCodec::new(config.dir_format),
            config,
        };
        if client.config.init_root {
            client.with_lock(InodeId::ROOT, || {
                client
                    .extents
                    .put(InodeId::ROOT, b"")
                    .map_err(extent_err("put", InodeId::ROOT))
            })?;
            debug!("root directory initialized");
        }
        Ok(client)
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ---- Kind queries ----

    /// Returns `true` if `id` is a file. Any failure reads as `false`.
    pub fn is_file(&self, id: InodeId) -> bool {
        self.is_kind(id, ObjectKind::File)
    }

    /// Returns `true` if `id` is a directory. Any failure reads as `false`.
    pub fn is_dir(&self, id: InodeId) -> bool {
        self.is_kind(id, ObjectKind::Directory)
    }

    /// Returns `true` if `id` is a symlink. Any failure reads as `false`.
    pub fn is_symlink(&self, id: InodeId) -> bool {
        self.is_kind(id, ObjectKind::Symlink)
    }

    fn is_kind(&self, id: InodeId, kind: ObjectKind) -> bool {
        match self.with_lock(id, || self.attr(id)) {
            Ok(attr) => attr.kind == kind,
            Err(e) => {
                warn!(%id, error = %e, "kind query failed; reporting false");
                false
            }
        }
    }

    // ---- Attributes ----

    /// Size and timestamps of a file.
    pub fn getfile(&self, id: InodeId) -> ClientResult<FileInfo> {
        debug!(%id, "getfile");
        let info = self.with_lock(id, || self.attr(id))?.file_info();
        debug!(%id, size = info.size, "getfile done");
        Ok(info)
    }

    /// Timestamps of a directory.
    pub fn getdir(&self, id: InodeId) -> ClientResult<DirInfo> {
        debug!(%id, "getdir");
        Ok(self.with_lock(id, || self.attr(id))?.dir_info())
    }

    /// Resize content to exactly `size` bytes, zero-filling growth.
    pub fn setattr(&self, id: InodeId, size: u64) -> ClientResult<()> {
        debug!(%id, size, "setattr");
        let new_len = to_len(id, size)?;
        self.with_lock(id, || {
            let mut data = self.content(id)?;
            data.resize(new_len, 0);
            self.extents.put(id, &data).map_err(extent_err("put", id))
        })
    }

    // ---- Namespace operations ----

    /// Resolve `name` in directory `parent`.
    pub fn lookup(&self, parent: InodeId, name: &str) -> ClientResult<InodeId> {
        debug!(%parent, name, "lookup");
        self.with_lock(parent, || {
            self.load_dir(parent)?
                .get(name)
                .ok_or_else(|| ClientError::NotFound {
                    parent,
                    name: name.to_string(),
                })
        })
    }

    /// Create an empty file named `name` in `parent`.
    ///
    /// `.` and `..` are accepted here, unlike [`mkdir`](Self::mkdir).
    /// `mode` is accepted but not interpreted.
    pub fn create(&self, parent: InodeId, name: &str, mode: u32) -> ClientResult<InodeId> {
        debug!(%parent, name, mode, "create");
        self.with_lock(parent, || self.create_locked(parent, name, ObjectKind::File))
    }

    /// Create an empty directory named `name` in `parent`.
    ///
    /// `.` and `..` are rejected. `mode` is accepted but not interpreted.
    pub fn mkdir(&self, parent: InodeId, name: &str, mode: u32) -> ClientResult<InodeId> {
        debug!(%parent, name, mode, "mkdir");
        check_not_reserved(name)?;
        self.with_lock(parent, || {
            self.create_locked(parent, name, ObjectKind::Directory)
        })
    }

    /// List the entries of directory `dir` in name order.
    pub fn readdir(&self, dir: InodeId) -> ClientResult<Vec<DirEntry>> {
        debug!(%dir, "readdir");
        self.with_lock(dir, || Ok(self.load_dir(dir)?.to_dirents()))
    }

    /// Detach `name` from `parent`, then delete the object's content.
    ///
    /// The two steps are not atomic. If deleting the content fails, the
    /// object stays in the store unreachable and the error is returned.
    pub fn unlink(&self, parent: InodeId, name: &str) -> ClientResult<()> {
        debug!(%parent, name, "unlink");
        check_not_reserved(name)?;
        self.with_lock(parent, || {
            let mut dir = self.load_dir(parent)?;
            let child = dir.remove(name).ok_or_else(|| ClientError::NotFound {
                parent,
                name: name.to_string(),
            })?;
            self.store_dir(parent, &dir)?;
            self.extents.remove(child).map_err(|e| {
                warn!(%parent, name, %child, error = %e, "unlinked object left in store");
                ClientError::Extent {
                    op: "remove",
                    id: child,
                    source: e,
                }
            })
        })
    }

    /// Create a symlink named `name` in `parent` pointing at `target`.
    ///
    /// The link is created empty and linked first; the target is written
    /// right after, still under the parent's lock only, so a racing reader
    /// of the new id may briefly see empty content.
    pub fn symlink(&self, parent: InodeId, name: &str, target: &str) -> ClientResult<InodeId> {
        debug!(%parent, name, to = target, "symlink");
        self.with_lock(parent, || {
            let id = self.create_locked(parent, name, ObjectKind::Symlink)?;
            self.extents.put(id, target.as_bytes()).map_err(|e| {
                warn!(%parent, name, %id, error = %e, "symlink linked without target");
                ClientError::Extent {
                    op: "put",
                    id,
                    source: e,
                }
            })?;
            Ok(id)
        })
    }

    /// The target path stored in symlink `id`.
    pub fn readlink(&self, id: InodeId) -> ClientResult<String> {
        debug!(%id, "readlink");
        self.with_lock(id, || {
            let data = self.content(id)?;
            String::from_utf8(data).map_err(|e| ClientError::InvalidContent {
                id,
                reason: e.to_string(),
            })
        })
    }

    // ---- Content operations ----

    /// Read up to `size` bytes starting at `offset`.
    ///
    /// Reading at or past the end returns an empty buffer; a read crossing
    /// the end returns only the bytes that exist.
    pub fn read(&self, id: InodeId, size: usize, offset: u64) -> ClientResult<Vec<u8>> {
        debug!(%id, size, offset, "read");
        self.with_lock(id, || {
            let data = self.content(id)?;
            let start = match usize::try_from(offset) {
                Ok(start) if start < data.len() => start,
                _ => return Ok(Vec::new()),
            };
            let end = start.saturating_add(size).min(data.len());
            Ok(data[start..end].to_vec())
        })
    }

    /// Write `buf` at `offset`, zero-extending the content if needed.
    ///
    /// Returns the number of bytes written, always `buf.len()` on success.
    pub fn write(&self, id: InodeId, offset: u64, buf: &[u8]) -> ClientResult<usize> {
        debug!(%id, offset, len = buf.len(), "write");
        let start = to_len(id, offset)?;
        let end = start
            .checked_add(buf.len())
            .ok_or_else(|| ClientError::InvalidContent {
                id,
                reason: format!("write end {offset} + {} overflows", buf.len()),
            })?;
        self.with_lock(id, || {
            let mut data = self.content(id)?;
            if end > data.len() {
                data.resize(end, 0);
            }
            data[start..end].copy_from_slice(buf);
            self.extents.put(id, &data).map_err(extent_err("put", id))?;
            Ok(buf.len())
        })
    }

    // ---- Internals ----

    /// Run `op` while holding the lock for `id`.
    ///
    /// The lock is released before returning on every path. A failed
    /// release after a successful `op` is reported; after a failed `op` the
    /// original error wins and the release failure is only logged.
    fn with_lock<T>(&self, id: InodeId, op: impl FnOnce() -> ClientResult<T>) -> ClientResult<T> {
        let guard = LockGuard::acquire(self.locks.as_ref(), id)
            .map_err(|source| ClientError::Lock { id, source })?;
        match op() {
            Ok(value) => {
                guard
                    .release()
                    .map_err(|source| ClientError::Lock { id, source })?;
                Ok(value)
            }
            Err(e) => {
                drop(guard);
                Err(e)
            }
        }
    }

    /// Insert a new, empty object of `kind` under `name`. Caller holds the
    /// parent's lock.
    fn create_locked(&self, parent: InodeId, name: &str, kind: ObjectKind) -> ClientResult<InodeId> {
        let mut dir = self.load_dir(parent)?;
        if dir.contains(name) {
            return Err(ClientError::AlreadyExists {
                parent,
                name: name.to_string(),
            });
        }

        let id = self.extents.create(kind).map_err(|e| match e {
            ExtentError::NotFound(_) => ClientError::ObjectNotFound { id: parent, source: e },
            other => ClientError::Extent {
                op: "create",
                id: parent,
                source: other,
            },
        })?;

        // Content first, then the link that makes it visible.
        if let Err(e) = self.extents.put(id, b"") {
            warn!(%parent, name, %id, error = %e, "new object left unlinked");
            return Err(ClientError::Extent {
                op: "put",
                id,
                source: e,
            });
        }
        dir.insert(name, id);
        if let Err(e) = self.store_dir(parent, &dir) {
            warn!(%parent, name, %id, error = %e, "new object left unlinked");
            return Err(e);
        }

        debug!(%parent, name, %id, %kind, "object linked");
        Ok(id)
    }

    fn load_dir(&self, id: InodeId) -> ClientResult<Directory> {
        let data = self.extents.get(id).map_err(|e| {
            if e.is_not_found() {
                ClientError::ObjectNotFound { id, source: e }
            } else {
                ClientError::Extent {
                    op: "get",
                    id,
                    source: e,
                }
            }
        })?;
        DirectoryCodec::decode(&data).map_err(|source| ClientError::Directory { id, source })
    }

    fn store_dir(&self, id: InodeId, dir: &Directory) -> ClientResult<()> {
        let data = self
            .codec
            .encode(dir)
            .map_err(|source| ClientError::Directory { id, source })?;
        self.extents.put(id, &data).map_err(extent_err("put", id))
    }

    fn content(&self, id: InodeId) -> ClientResult<Vec<u8>> {
        self.extents.get(id).map_err(extent_err("get", id))
    }

    fn attr(&self, id: InodeId) -> ClientResult<ObjectAttr> {
        self.extents.getattr(id).map_err(extent_err("getattr", id))
    }
}

impl std::fmt::Debug for FileSystemClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSystemClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn extent_err(op: &'static str, id: InodeId) -> impl FnOnce(ExtentError) -> ClientError {
    move |source| ClientError::Extent { op, id, source }
}

fn check_not_reserved(name: &str) -> ClientResult<()> {
    if RESERVED_NAMES.contains(&name) {
        return Err(ClientError::InvalidName {
            name: name.to_string(),
            reason: "reserved directory name",
        });
    }
    Ok(())
}

fn to_len(id: InodeId, value: u64) -> ClientResult<usize> {
    usize::try_from(value).map_err(|_| ClientError::InvalidContent {
        id,
        reason: format!("{value} exceeds addressable size"),
    })
}
