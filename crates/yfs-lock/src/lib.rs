//! Lock service interface for yfs.
//!
//! Every filesystem operation serializes access to an object by holding the
//! exclusive lock keyed by that object's [`InodeId`]. This crate defines the
//! service boundary and the scoped guard the client uses so that a lock is
//! released on every exit path.
//!
//! # Modules
//!
//! - [`error`] -- Error types for lock operations
//! - [`traits`] -- The [`LockService`] trait
//! - [`guard`] -- [`LockGuard`], releasing on drop
//! - [`memory`] -- In-process [`InMemoryLockService`] for tests and embedding
//!
//! [`InodeId`]: yfs_types::InodeId

pub mod error;
pub mod guard;
pub mod memory;
pub mod traits;

pub use error::{LockError, Result};
pub use guard::LockGuard;
pub use memory::InMemoryLockService;
pub use traits::LockService;
