use serde::{Deserialize, Serialize};
use thiserror::Error;
use yfs_dir::DirError;
use yfs_extent::ExtentError;
use yfs_lock::LockError;
use yfs_types::InodeId;

/// Errors returned by filesystem client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No entry with this name exists in the directory.
    #[error("{name:?} not found in directory {parent}")]
    NotFound { parent: InodeId, name: String },

    /// The extent store has no object under this id.
    #[error("object {id} not found: {source}")]
    ObjectNotFound {
        id: InodeId,
        #[source]
        source: ExtentError,
    },

    /// An entry with this name already exists in the directory.
    #[error("{name:?} already exists in directory {parent}")]
    AlreadyExists { parent: InodeId, name: String },

    /// The name is refused before any store access.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// An extent store call failed.
    #[error("extent {op} on {id} failed: {source}")]
    Extent {
        op: &'static str,
        id: InodeId,
        #[source]
        source: ExtentError,
    },

    /// Acquiring or releasing a lock failed.
    #[error("lock on {id} failed: {source}")]
    Lock {
        id: InodeId,
        #[source]
        source: LockError,
    },

    /// A directory blob could not be decoded or encoded.
    #[error("directory {id} is unreadable: {source}")]
    Directory {
        id: InodeId,
        #[source]
        source: DirError,
    },

    /// An object's content does not fit the requested view.
    #[error("object {id} holds invalid content: {reason}")]
    InvalidContent { id: InodeId, reason: String },

    /// Transport failure. Reserved for adapters; never produced here.
    #[error("rpc error: {0}")]
    Rpc(String),
}

impl ClientError {
    /// The status class reported to a filesystem adapter.
    pub fn status(&self) -> Status {
        match self {
            Self::NotFound { .. } | Self::ObjectNotFound { .. } => Status::NoEnt,
            Self::AlreadyExists { .. } => Status::Exist,
            Self::Rpc(_) => Status::RpcErr,
            Self::InvalidName { .. }
            | Self::Extent { .. }
            | Self::Lock { .. }
            | Self::Directory { .. }
            | Self::InvalidContent { .. } => Status::IoErr,
        }
    }
}

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Status classes exposed to filesystem adapters.
///
/// The numeric codes are stable and match what existing adapters expect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "RPCERR")]
    RpcErr,
    #[serde(rename = "NOENT")]
    NoEnt,
    #[serde(rename = "IOERR")]
    IoErr,
    #[serde(rename = "EXIST")]
    Exist,
}

impl Status {
    /// Stable numeric code.
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::RpcErr => 1,
            Self::NoEnt => 2,
            Self::IoErr => 3,
            Self::Exist => 4,
        }
    }

    /// Collapse an operation result to its status class.
    pub fn of<T>(result: &ClientResult<T>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(e) => e.status(),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::RpcErr => write!(f, "RPCERR"),
            Self::NoEnt => write!(f, "NOENT"),
            Self::IoErr => write!(f, "IOERR"),
            Self::Exist => write!(f, "EXIST"),
        }
    }
}
