use std::collections::BTreeMap;

use yfs_types::{DirEntry, InodeId};

/// Decoded directory content: a mapping from entry name to id.
///
/// Names are unique within one mapping. Iteration is in name order, which
/// is unrelated to the order entries were created in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Directory {
    entries: BTreeMap<String, InodeId>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entry by exact name.
    pub fn get(&self, name: &str) -> Option<InodeId> {
        self.entries.get(name).copied()
    }

    /// Returns `true` if an entry with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Insert or replace an entry, returning the id it replaced.
    pub fn insert(&mut self, name: impl Into<String>, id: InodeId) -> Option<InodeId> {
        self.entries.insert(name.into(), id)
    }

    /// Remove an entry, returning its id.
    pub fn remove(&mut self, name: &str) -> Option<InodeId> {
        self.entries.remove(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the directory has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, id)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, InodeId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Materialize the listing as dirents.
    pub fn to_dirents(&self) -> Vec<DirEntry> {
        self.iter().map(|(name, id)| DirEntry::new(name, id)).collect()
    }
}

/// Later pairs overwrite earlier ones with the same name.
impl FromIterator<(String, InodeId)> for Directory {
    fn from_iter<I: IntoIterator<Item = (String, InodeId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
