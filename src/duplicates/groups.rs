//! Duplicate groups, the duplicate set, and derived statistics.
//!
//! # Overview
//!
//! A [`DuplicateGroup`] is a digest plus the ordered list of paths sharing
//! that digest; index 0 is always the keeper. A [`DuplicateSet`] maps
//! digests to groups while preserving first-insertion order, so iteration
//! is reproducible within a run. [`analyze`] derives on-demand statistics
//! (set count, reclaimable space) from a set.
//!
//! # Example
//!
//! ```
//! use dupescan::duplicates::DuplicateSet;
//! use std::path::PathBuf;
//!
//! let mut set = DuplicateSet::new();
//! set.insert([1u8; 32], 100, PathBuf::from("/a.txt"));
//! set.insert([1u8; 32], 100, PathBuf::from("/b.txt"));
//! set.insert([2u8; 32], 50, PathBuf::from("/c.txt"));
//!
//! let set = set.retain_duplicates();
//! assert_eq!(set.len(), 1); // /c.txt was a singleton
//! assert_eq!(set.iter().next().unwrap().keeper().unwrap(),
//!            &PathBuf::from("/a.txt"));
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::scanner::{hash_to_hex, short_hex, Hash};

/// A group of files sharing one content digest.
///
/// The path list preserves discovery order: `paths[0]` is the keeper and
/// every later path is a deletable duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// BLAKE3 digest of the shared file content
    pub hash: Hash,
    /// File size in bytes, shared by all members (content-identical files
    /// necessarily have identical sizes)
    pub size: u64,
    /// Member paths in discovery order
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a new group.
    #[must_use]
    pub fn new(hash: Hash, size: u64, paths: Vec<PathBuf>) -> Self {
        Self { hash, size, paths }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The keeper: the first-discovered path, preserved by elimination.
    #[must_use]
    pub fn keeper(&self) -> Option<&PathBuf> {
        self.paths.first()
    }

    /// The deletable members: every path except the keeper.
    #[must_use]
    pub fn duplicates(&self) -> &[PathBuf] {
        if self.paths.is_empty() {
            &[]
        } else {
            &self.paths[1..]
        }
    }

    /// Number of deletable copies (total minus the keeper).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Space freed by reducing this group to its keeper.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Digest as a full hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Truncated digest for display.
    #[must_use]
    pub fn short_hash(&self) -> String {
        short_hex(&self.hash)
    }
}

/// The result of a scan: groups keyed by digest, in first-insertion order.
///
/// Keys are unique; iteration order is the order in which digests were
/// first inserted, which makes reports reproducible for a given traversal.
#[derive(Debug, Clone, Default)]
pub struct DuplicateSet {
    groups: Vec<DuplicateGroup>,
    index: HashMap<Hash, usize>,
}

impl DuplicateSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path to the group for `hash`, creating the group on first
    /// encounter. Insertion order decides both group order and, within a
    /// group, which path is the keeper.
    pub fn insert(&mut self, hash: Hash, size: u64, path: PathBuf) {
        match self.index.entry(hash) {
            Entry::Occupied(slot) => {
                self.groups[*slot.get()].paths.push(path);
            }
            Entry::Vacant(slot) => {
                slot.insert(self.groups.len());
                self.groups.push(DuplicateGroup::new(hash, size, vec![path]));
            }
        }
    }

    /// Drop singleton groups, keeping only true duplicates (2+ members).
    /// Group order is preserved.
    #[must_use]
    pub fn retain_duplicates(self) -> Self {
        let mut out = Self::new();
        for group in self.groups.into_iter().filter(|g| g.len() >= 2) {
            out.index.insert(group.hash, out.groups.len());
            out.groups.push(group);
        }
        out
    }

    /// Look up the group for a digest.
    #[must_use]
    pub fn get(&self, hash: &Hash) -> Option<&DuplicateGroup> {
        self.index.get(hash).map(|&i| &self.groups[i])
    }

    /// Iterate groups in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, DuplicateGroup> {
        self.groups.iter()
    }

    /// The groups as a slice, in first-insertion order.
    #[must_use]
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the set has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a DuplicateSet {
    type Item = &'a DuplicateGroup;
    type IntoIter = std::slice::Iter<'a, DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Statistics derived on demand from a duplicate set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Number of duplicate groups
    pub set_count: usize,
    /// Bytes freed by reducing every group to its keeper
    pub reclaimable_bytes: u64,
}

/// Derive statistics from a duplicate set.
///
/// Keeper sizes are re-read from the filesystem at call time; a group whose
/// keeper has become unreadable since the scan (deleted or permission
/// revoked externally) contributes nothing to the sum but still counts
/// toward `set_count`.
#[must_use]
pub fn analyze(set: &DuplicateSet) -> ScanStats {
    let mut reclaimable_bytes = 0u64;

    for group in set {
        let Some(keeper) = group.keeper() else {
            continue;
        };
        match fs::metadata(keeper) {
            Ok(meta) => {
                reclaimable_bytes += meta.len() * group.duplicate_count() as u64;
            }
            Err(e) => {
                log::debug!(
                    "Group {} excluded from stats, keeper unreadable: {}",
                    group.short_hash(),
                    e
                );
            }
        }
    }

    ScanStats {
        set_count: set.len(),
        reclaimable_bytes,
    }
}
