//! Slash-delimited directory format.
//!
//! ```text
//! /name/id/name/id...
//! ```
//!
//! Ids are decimal. Names are not escaped, so a name containing `/` cannot be
//! written; decoding such a blob written by another client misparses it.
//! Decoding pairs each name token with the following id token and drops a
//! trailing name without an id or an id token without leading digits.
//!
//! Older readers of this format turned an id token without digits into id 0
//! and kept the entry. Id 0 names no object, so such pairs are dropped here
//! instead; the rest of the blob still decodes.

use tracing::warn;
use yfs_types::InodeId;

use crate::directory::Directory;
use crate::error::{DirError, Result};

/// Record delimiter.
pub const DELIMITER: u8 = b'/';

/// Encode a directory in the legacy format.
pub fn encode(dir: &Directory) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    for (name, id) in dir.iter() {
        if name.as_bytes().contains(&DELIMITER) {
            return Err(DirError::UnencodableName {
                name: name.to_string(),
                reason: "legacy format cannot hold '/' in a name".into(),
            });
        }
        buf.push(DELIMITER);
        buf.extend_from_slice(name.as_bytes());
        buf.push(DELIMITER);
        buf.extend_from_slice(id.to_string().as_bytes());
    }
    Ok(buf)
}

/// Decode a legacy blob. Anything before the first delimiter is ignored.
pub fn decode(data: &[u8]) -> Directory {
    let mut dir = Directory::new();
    let Some(start) = data.iter().position(|b| *b == DELIMITER) else {
        return dir;
    };

    let mut tokens = data[start + 1..].split(|b| *b == DELIMITER);
    while let Some(name) = tokens.next() {
        let Some(id_token) = tokens.next() else {
            if !name.is_empty() {
                warn!(len = name.len(), "dropping trailing name without id");
            }
            break;
        };
        let Some(id) = parse_id(id_token) else {
            warn!(token = %String::from_utf8_lossy(id_token), "dropping entry with malformed id");
            continue;
        };
        match std::str::from_utf8(name) {
            Ok(name) => {
                dir.insert(name, id);
            }
            Err(_) => warn!(%id, "dropping entry with non-UTF-8 name"),
        }
    }
    dir
}

/// Parse the leading decimal digits of a token.
fn parse_id(token: &[u8]) -> Option<InodeId> {
    let digits = token.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    std::str::from_utf8(&token[..digits]).ok()?.parse::<InodeId>().ok()
}
