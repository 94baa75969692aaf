//! Foundation types for yfs.
//!
//! This crate provides the identifier, kind, and attribute types shared by the
//! extent store, the lock service, the directory codec, and the filesystem
//! client. Every other yfs crate depends on `yfs-types`.
//!
//! # Key Types
//!
//! - [`InodeId`] -- 64-bit identifier naming one object in the extent store
//! - [`ObjectKind`] -- File, directory, or symlink; fixed at creation
//! - [`ObjectAttr`] -- Attribute record reported by the extent store
//! - [`FileInfo`] / [`DirInfo`] -- Attribute views handed to adapters
//! - [`DirEntry`] -- Transient `(name, id)` pair produced by a directory listing

pub mod error;
pub mod inode;
pub mod object;
pub mod temporal;

pub use error::TypeError;
pub use inode::InodeId;
pub use object::{DirEntry, DirInfo, FileInfo, ObjectAttr, ObjectKind};
pub use temporal::unix_now;
