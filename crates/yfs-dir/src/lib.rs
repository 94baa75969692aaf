//! Directory codec for yfs.
//!
//! A directory is stored as the content of a DIRECTORY extent: an encoded
//! mapping from entry name to [`InodeId`]. Every mutation decodes the whole
//! blob, changes the mapping, and rewrites the whole blob; there is no
//! incremental update.
//!
//! # Formats
//!
//! - **Binary** (default): `b"YDIR"`, a version byte, then
//!   `[u32 LE name length][name][u64 LE id]` records. Names may contain any
//!   character.
//! - **Legacy**: `/name/id` records with a decimal id and no escaping. Kept so
//!   that blobs written by older clients stay readable; names containing `/`
//!   cannot be written in it.
//!
//! [`DirectoryCodec::decode`] detects the format from the blob itself. The
//! empty blob is the empty directory in both formats.
//!
//! [`InodeId`]: yfs_types::InodeId

pub mod codec;
pub mod directory;
pub mod error;
pub mod legacy;

pub use codec::{DirFormat, DirectoryCodec, MAGIC, VERSION};
pub use directory::Directory;
pub use error::{DirError, Result};
