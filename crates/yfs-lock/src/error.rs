//! Error types for lock service operations.

use thiserror::Error;
use yfs_types::InodeId;

/// Errors that can occur while acquiring or releasing a lock.
#[derive(Debug, Error)]
pub enum LockError {
    /// Released a lock that nobody holds.
    #[error("lock not held: {0}")]
    NotHeld(InodeId),

    /// The lock service could not be reached or refused the request.
    #[error("lock service unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for lock operations.
pub type Result<T> = std::result::Result<T, LockError>;
