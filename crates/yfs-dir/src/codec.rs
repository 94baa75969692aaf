use serde::{Deserialize, Serialize};
use tracing::warn;
use yfs_types::InodeId;

use crate::directory::Directory;
use crate::error::{DirError, Result};
use crate::legacy;

/// Leading bytes of a binary directory blob.
pub const MAGIC: &[u8; 4] = b"YDIR";

/// Current binary format version.
pub const VERSION: u8 = 1;

/// Header size: 4 bytes magic + 1 byte version.
const HEADER_SIZE: usize = 5;

/// Fixed part of a record: 4 bytes name length + 8 bytes id.
const RECORD_OVERHEAD: usize = 12;

/// Format used when writing directory blobs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirFormat {
    /// Length-prefixed records behind a versioned header.
    #[default]
    Binary,
    /// Slash-delimited records, readable by older clients.
    Legacy,
}

/// Codec between [`Directory`] and extent content.
///
/// Binary layout:
/// ```text
/// [4 bytes: "YDIR"][1 byte: version]
/// repeated:
///   [4 bytes: name length (little-endian u32)]
///   [N bytes: name, UTF-8]
///   [8 bytes: id (little-endian u64)]
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectoryCodec {
    format: DirFormat,
}

impl DirectoryCodec {
    /// Create a codec that writes `format`.
    pub fn new(format: DirFormat) -> Self {
        Self { format }
    }

    /// The format this codec writes.
    pub fn format(&self) -> DirFormat {
        self.format
    }

    /// Encode the whole directory in this codec's format.
    pub fn encode(&self, dir: &Directory) -> Result<Vec<u8>> {
        match self.format {
            DirFormat::Binary => encode_binary(dir),
            DirFormat::Legacy => legacy::encode(dir),
        }
    }

    /// Decode a blob in either format.
    ///
    /// A truncated trailing record is dropped rather than rejected. Only a
    /// blob whose format cannot be recognized at all is an error.
    pub fn decode(data: &[u8]) -> Result<Directory> {
        match data.first() {
            None => Ok(Directory::new()),
            Some(_) if data.starts_with(MAGIC) => decode_binary(data),
            Some(&legacy::DELIMITER) => Ok(legacy::decode(data)),
            Some(&other) => Err(DirError::UnknownFormat(other)),
        }
    }
}

fn encode_binary(dir: &Directory) -> Result<Vec<u8>> {
    let body: usize = dir.iter().map(|(n, _)| RECORD_OVERHEAD + n.len()).sum();
    let mut buf = Vec::with_capacity(HEADER_SIZE + body);
    buf.extend_from_slice(MAGIC);
    buf.push(VERSION);
    for (name, id) in dir.iter() {
        let len = u32::try_from(name.len()).map_err(|_| DirError::UnencodableName {
            name: name.chars().take(32).collect(),
            reason: format!("length {} exceeds u32", name.len()),
        })?;
        buf.extend_from_slice(&len.to_le_bytes());
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(&id.get().to_le_bytes());
    }
    Ok(buf)
}

fn decode_binary(data: &[u8]) -> Result<Directory> {
    if data.len() < HEADER_SIZE {
        warn!(len = data.len(), "truncated directory header; treating as empty");
        return Ok(Directory::new());
    }
    let version = data[MAGIC.len()];
    if version != VERSION {
        return Err(DirError::UnsupportedVersion(version));
    }

    let mut dir = Directory::new();
    let mut offset = HEADER_SIZE;
    while offset < data.len() {
        let remaining = data.len() - offset;
        if remaining < 4 {
            warn!(offset, remaining, "dropping truncated directory record");
            break;
        }
        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&data[offset..offset + 4]);
        let name_len = u32::from_le_bytes(len_bytes) as usize;

        let Some(record_len) = name_len.checked_add(RECORD_OVERHEAD) else {
            warn!(offset, name_len, "dropping oversized directory record");
            break;
        };
        if remaining < record_len {
            warn!(offset, remaining, record_len, "dropping truncated directory record");
            break;
        }

        let name_start = offset + 4;
        let id_start = name_start + name_len;
        let mut id_bytes = [0u8; 8];
        id_bytes.copy_from_slice(&data[id_start..id_start + 8]);
        let id = InodeId::new(u64::from_le_bytes(id_bytes));

        match std::str::from_utf8(&data[name_start..id_start]) {
            Ok(name) => {
                dir.insert(name, id);
            }
            Err(_) => warn!(offset, %id, "dropping directory record with non-UTF-8 name"),
        }
        offset += record_len;
    }
    Ok(dir)
}
