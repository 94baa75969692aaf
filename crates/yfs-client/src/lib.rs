//! Filesystem client for yfs.
//!
//! [`FileSystemClient`] implements files, directories, and symlinks on top of
//! two shared services: an [`ExtentStore`] holding every object's content and
//! attributes, and a [`LockService`] serializing access per object id.
//!
//! # Protocol
//!
//! - Every operation holds the lock of exactly one id while it talks to the
//!   store about that id, and releases it on every exit path.
//! - An object is visible to other clients only once a directory blob
//!   references it. Creation installs content before linking; removal
//!   unlinks before deleting content. Objects orphaned by a failure between
//!   those steps stay in the store, unreachable.
//! - No retries and no rollback: a collaborator failure is returned at once.
//!
//! [`ExtentStore`]: yfs_extent::ExtentStore
//! [`LockService`]: yfs_lock::LockService

pub mod client;
pub mod config;
pub mod error;
#[cfg(test)]
mod testing;

pub use client::FileSystemClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, Status};

// Re-export key types
pub use yfs_dir::DirFormat;
pub use yfs_types::{DirEntry, DirInfo, FileInfo, InodeId, ObjectKind};
