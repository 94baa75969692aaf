//! Error types for directory encoding and decoding.

use thiserror::Error;

/// Errors produced by the directory codec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirError {
    /// The blob is neither empty, binary, nor legacy encoded.
    #[error("unknown directory format (leading byte {0:#04x})")]
    UnknownFormat(u8),

    /// The binary header carries a version this codec cannot read.
    #[error("unsupported directory format version {0}")]
    UnsupportedVersion(u8),

    /// The name cannot be represented in the selected format.
    #[error("name {name:?} cannot be encoded: {reason}")]
    UnencodableName { name: String, reason: String },
}

/// Convenience type alias for codec operations.
pub type Result<T> = std::result::Result<T, DirError>;
