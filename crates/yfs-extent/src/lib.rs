//! Extent store interface for yfs.
//!
//! An extent is an opaque byte blob stored under a 64-bit [`InodeId`], with
//! an attribute record carrying its size, kind, and access/modify/change
//! timestamps. The filesystem client keeps every file, directory, and
//! symlink as one extent.
//!
//! # Backends
//!
//! All backends implement the [`ExtentStore`] trait:
//!
//! - [`InMemoryExtentStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. The root id ([`InodeId::ROOT`]) is reserved for a directory extent.
//! 2. Fresh ids come only from [`ExtentStore::create`].
//! 3. Content is replaced whole; the store never merges writes.
//! 4. The store never interprets content and never locks on a caller's behalf.
//!
//! [`InodeId`]: yfs_types::InodeId
//! [`InodeId::ROOT`]: yfs_types::InodeId::ROOT

pub mod error;
pub mod extent;
pub mod memory;
pub mod traits;

pub use error::{ExtentError, ExtentResult};
pub use extent::Extent;
pub use memory::InMemoryExtentStore;
pub use traits::ExtentStore;
