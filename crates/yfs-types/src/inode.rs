use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier naming one object in the extent store.
///
/// Identifiers are allocated by the store when an object is created and are
/// never reused by the in-memory backend. [`InodeId::ROOT`] is reserved for
/// the filesystem root directory.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InodeId(u64);

impl InodeId {
    /// The root directory.
    pub const ROOT: InodeId = InodeId(1);

    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw 64-bit value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is the root directory.
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Debug for InodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InodeId({})", self.0)
    }
}

/// Decimal, which is also the id token of the legacy directory format.
impl fmt::Display for InodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InodeId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidId(s.to_string()))
    }
}

impl From<u64> for InodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<InodeId> for u64 {
    fn from(id: InodeId) -> Self {
        id.0
    }
}
