use serde::{Deserialize, Serialize};
use yfs_dir::DirFormat;

/// Settings for a [`FileSystemClient`](crate::FileSystemClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Write the empty root directory blob when the client starts.
    pub init_root: bool,
    /// Format used when rewriting directory blobs.
    pub dir_format: DirFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            init_root: true,
            dir_format: DirFormat::Binary,
        }
    }
}
