//! Duplicate elimination.
//!
//! # Overview
//!
//! [`delete_duplicates`] walks a [`DuplicateSet`] and removes every group
//! member except the keeper chosen by the configured [`KeepPolicy`].
//! Deletion is best-effort: a locked or already-gone file is recorded as a
//! failure and processing continues with the next path. A batch over
//! thousands of files must never be derailed by one bad entry.
//!
//! Dry-run mode computes the same report without touching the filesystem.
//!
//! # Safety
//!
//! The keeper is never deleted. Groups with fewer than two members are
//! no-ops even though the engine never emits them; this function makes no
//! assumptions about where its input came from.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::actions::{delete_duplicates, DeleteConfig};
//! use dupescan::duplicates::DuplicateSet;
//!
//! let set = DuplicateSet::new(); // from a scan
//! let report = delete_duplicates(&set, &DeleteConfig::dry_run());
//! println!("would free {} bytes", report.freed_bytes);
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::duplicates::{DuplicateGroup, DuplicateSet};

/// Error type for a single deletion.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved already).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Which group member survives elimination.
///
/// A named policy rather than a hard-coded index so alternative strategies
/// (keep newest, keep by path pattern) can be added without changing the
/// eliminator's contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeepPolicy {
    /// Keep the first-discovered path (index 0 in traversal order).
    #[default]
    EarliestDiscovered,
}

impl KeepPolicy {
    /// Index of the path this policy preserves within a group.
    #[must_use]
    pub fn keeper_index(self, _group: &DuplicateGroup) -> usize {
        match self {
            Self::EarliestDiscovered => 0,
        }
    }
}

/// Configuration for an elimination pass.
#[derive(Debug, Clone, Default)]
pub struct DeleteConfig {
    /// Compute the report without deleting anything.
    pub dry_run: bool,
    /// Which group member to preserve.
    pub keep_policy: KeepPolicy,
}

impl DeleteConfig {
    /// Config for a dry run.
    #[must_use]
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }
}

/// Results of an elimination pass.
#[derive(Debug, Clone, Default)]
pub struct DeleteReport {
    /// Successfully deleted files (or would-be deletions in dry-run mode).
    pub deleted_count: usize,
    /// Total bytes freed. Each successful deletion adds the group's member
    /// size once (all members of a group are the same size by construction).
    pub freed_bytes: u64,
    /// Failed deletions with their error messages.
    pub failures: Vec<(PathBuf, String)>,
}

impl DeleteReport {
    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if every attempted deletion succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!(
                "Deleted {} file(s), freed {}",
                self.deleted_count,
                bytesize::ByteSize::b(self.freed_bytes)
            )
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {}",
                self.deleted_count,
                self.failure_count(),
                bytesize::ByteSize::b(self.freed_bytes)
            )
        }
    }
}

/// Delete every non-keeper member of every group in the set.
///
/// Failures never abort the pass; they are logged and accumulated in the
/// report. Calling this twice with the same set is harmless: the second
/// pass finds the duplicates already gone and deletes nothing.
#[must_use]
pub fn delete_duplicates(set: &DuplicateSet, config: &DeleteConfig) -> DeleteReport {
    let mut report = DeleteReport::default();

    for group in set {
        // Defensive: a group this small has nothing to delete.
        if group.len() < 2 {
            continue;
        }

        let keep = config.keep_policy.keeper_index(group);

        for (i, path) in group.paths.iter().enumerate() {
            if i == keep {
                continue;
            }

            if config.dry_run {
                report.deleted_count += 1;
                report.freed_bytes += group.size;
                continue;
            }

            match remove_file(path) {
                Ok(()) => {
                    log::debug!("Deleted {}", path.display());
                    report.deleted_count += 1;
                    report.freed_bytes += group.size;
                }
                Err(e) => {
                    log::warn!("Failed to delete {}: {}", path.display(), e);
                    report.failures.push((path.clone(), e.to_string()));
                }
            }
        }
    }

    report
}

/// Permanently delete a single file, classifying the failure kind.
fn remove_file(path: &Path) -> Result<(), DeleteError> {
    fs::remove_file(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DeleteError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => DeleteError::PermissionDenied(path.to_path_buf()),
        _ => DeleteError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}
