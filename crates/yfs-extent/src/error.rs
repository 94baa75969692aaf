use yfs_types::InodeId;

/// Errors from extent store operations.
#[derive(Debug, thiserror::Error)]
pub enum ExtentError {
    /// No extent is stored under this id.
    #[error("extent not found: {0}")]
    NotFound(InodeId),

    /// The store could not be reached or refused the request.
    #[error("extent service unavailable: {0}")]
    Unavailable(String),

    /// The store has no identifiers left to allocate.
    #[error("extent id space exhausted")]
    Exhausted,
}

impl ExtentError {
    /// Returns `true` if the error means the id is absent from the store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias for extent store operations.
pub type ExtentResult<T> = Result<T, ExtentError>;
