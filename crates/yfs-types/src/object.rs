use std::fmt;

use serde::{Deserialize, Serialize};

use crate::inode::InodeId;

/// The kind of an object, fixed when the object is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Directory: content is an encoded name → id mapping.
    Directory,
    /// Regular file: content is arbitrary bytes.
    File,
    /// Symbolic link: content is the literal target path.
    Symlink,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::File => write!(f, "file"),
            Self::Symlink => write!(f, "symlink"),
        }
    }
}

/// Attribute record reported by the extent store for one object.
///
/// Timestamps are seconds since the UNIX epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectAttr {
    pub size: u64,
    pub atime: u64,
    pub mtime: u64,
    pub ctime: u64,
    pub kind: ObjectKind,
}

impl ObjectAttr {
    /// File-shaped view: size plus the three timestamps.
    pub fn file_info(&self) -> FileInfo {
        FileInfo {
            size: self.size,
            atime: self.atime,
            mtime: self.mtime,
            ctime: self.ctime,
        }
    }

    /// Directory-shaped view: the three timestamps only.
    pub fn dir_info(&self) -> DirInfo {
        DirInfo {
            atime: self.atime,
            mtime: self.mtime,
            ctime: self.ctime,
        }
    }
}

/// Attributes of a file as seen by a filesystem adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub size: u64,
    pub atime: u64,
    pub mtime: u64,
    pub ctime: u64,
}

/// Attributes of a directory as seen by a filesystem adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirInfo {
    pub atime: u64,
    pub mtime: u64,
    pub ctime: u64,
}

/// One `(name, id)` pair from a directory listing.
///
/// Dirents are produced by decoding a directory blob and are never persisted
/// on their own.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub id: InodeId,
}

impl DirEntry {
    /// Create a new directory entry.
    pub fn new(name: impl Into<String>, id: InodeId) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}
