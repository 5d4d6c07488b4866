//! Directory walker built on walkdir.
//!
//! # Overview
//!
//! [`Walker`] enumerates candidate files under a root directory, applying
//! the recursion and minimum-size policy from [`WalkerConfig`]. Entries are
//! produced lazily and in deterministic order (directory entries are sorted
//! by file name), so consumers can rely on a stable discovery sequence.
//!
//! Per-file failures never abort the walk: a file whose metadata cannot be
//! read is logged at debug level and skipped, and unreadable subdirectories
//! simply contribute no entries. Only the root itself being invalid is a
//! caller-visible error, and that is enforced upstream by the finder.
//!
//! # Symlink policy
//!
//! Symbolic links are not followed unless `follow_symlinks` is set. With
//! the default policy a symlinked directory is never descended into and a
//! symlinked file is not reported, which makes symlink cycles impossible.
//! When following is enabled, cycles are the caller's risk.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{FileEntry, WalkerConfig};

/// Lazy, deterministic file discovery under a root directory.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given root.
    #[must_use]
    pub fn new(root: &Path, config: WalkerConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag flips to `true`, the walk stops yielding entries.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Walk the directory tree, yielding file entries lazily.
    ///
    /// Only regular files that pass the minimum-size filter are yielded.
    /// Files whose size cannot be determined are skipped silently (logged
    /// at debug level).
    pub fn walk(&self) -> impl Iterator<Item = FileEntry> + '_ {
        let mut walk_dir = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if !self.config.recursive {
            walk_dir = walk_dir.max_depth(1);
        }

        walk_dir
            .into_iter()
            .take_while(move |_| !self.is_shutdown_requested())
            .filter_map(move |entry_result| {
                let entry = match entry_result {
                    Ok(entry) => entry,
                    Err(e) => {
                        log::debug!("Skipping unreadable entry: {}", e);
                        return None;
                    }
                };

                if !entry.file_type().is_file() {
                    return None;
                }

                let size = match entry.metadata() {
                    Ok(meta) => meta.len(),
                    Err(e) => {
                        log::debug!(
                            "Skipping {} (metadata unavailable): {}",
                            entry.path().display(),
                            e
                        );
                        return None;
                    }
                };

                if size < self.config.min_size {
                    log::trace!(
                        "Skipping {} ({} bytes < min size {})",
                        entry.path().display(),
                        size,
                        self.config.min_size
                    );
                    return None;
                }

                Some(FileEntry::new(entry.into_path(), size))
            })
    }
}
