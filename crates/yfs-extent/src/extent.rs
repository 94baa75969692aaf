use yfs_types::{ObjectAttr, ObjectKind};

/// A stored extent: kind tag + content + timestamps.
///
/// `Extent` is the unit of storage. The store never interprets `data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extent {
    /// The kind fixed at creation.
    pub kind: ObjectKind,
    /// The full content of the object.
    pub data: Vec<u8>,
    /// Last read of the content, seconds since the epoch.
    pub atime: u64,
    /// Last change to the content.
    pub mtime: u64,
    /// Last change to the content or attributes.
    pub ctime: u64,
}

impl Extent {
    /// Create an empty extent stamped with `now`.
    pub fn new(kind: ObjectKind, now: u64) -> Self {
        Self {
            kind,
            data: Vec::new(),
            atime: now,
            mtime: now,
            ctime: now,
        }
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Replace the content; bumps modify and change time.
    pub fn replace(&mut self, data: &[u8], now: u64) {
        self.data.clear();
        self.data.extend_from_slice(data);
        self.mtime = now;
        self.ctime = now;
    }

    /// Record a read of the content.
    pub fn touch(&mut self, now: u64) {
        self.atime = now;
    }

    /// The attribute record for this extent.
    pub fn attr(&self) -> ObjectAttr {
        ObjectAttr {
            size: self.size(),
            atime: self.atime,
            mtime: self.mtime,
            ctime: self.ctime,
            kind: self.kind,
        }
    }
}
