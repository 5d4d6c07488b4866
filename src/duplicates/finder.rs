//! Duplicate finder: the scan pipeline.
//!
//! # Overview
//!
//! [`DuplicateFinder`] orchestrates the pipeline:
//!
//! 1. **Walk** - enumerate candidate files in deterministic discovery order
//! 2. **Hash** - compute full-content digests on a bounded rayon pool
//! 3. **Aggregate** - group paths by digest, preserving discovery order,
//!    then drop singleton groups
//!
//! Hash workers may finish out of order, but results are collected in
//! walker-emission order (the candidate vector index is the discovery
//! sequence number), so "first discovered wins as keeper" holds no matter
//! how the pool schedules work.
//!
//! Unreadable files are dropped silently; an external shutdown request
//! stops new hash work and yields the partial duplicate set accumulated so
//! far, flagged via [`ScanSummary::interrupted`].
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let (set, summary) = finder.find_duplicates(Path::new("/some/path")).unwrap();
//!
//! println!("{} duplicate groups", summary.duplicate_groups);
//! println!("{} bytes reclaimable", summary.reclaimable_space);
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rayon::prelude::*;

use crate::progress::ProgressCallback;
use crate::scanner::{FileEntry, Hash, HashError, Hasher, Walker, WalkerConfig};

use super::DuplicateSet;

/// How many successful hashes between progress callback firings.
const PROGRESS_INTERVAL: usize = 100;

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Number of I/O threads for parallel hashing.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Walker configuration for directory traversal.
    pub walker: WalkerConfig,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("io_threads", &self.io_threads)
            .field("walker", &self.walker)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: 4,
            walker: WalkerConfig::default(),
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the I/O thread count (clamped to at least 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, walker: WalkerConfig) -> Self {
        self.walker = walker;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Files enumerated by the walker (post min-size filter)
    pub total_files: usize,
    /// Files successfully hashed
    pub hashed_files: usize,
    /// Files dropped because they could not be read
    pub unreadable_files: usize,
    /// Confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Deletable duplicate files (group members minus keepers)
    pub duplicate_files: usize,
    /// Space reclaimable by reducing every group to its keeper
    pub reclaimable_space: u64,
    /// Wall-clock duration of the scan
    pub scan_duration: Duration,
    /// Whether the scan was cut short by a shutdown request
    pub interrupted: bool,
}

/// Errors that make a scan impossible to start.
///
/// Per-file problems are never errors; they only ever drop the affected
/// file from the result.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided root does not exist.
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided root is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Duplicate finder orchestrating walk, hash, and aggregation.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Arc<Hasher>,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let mut hasher = Hasher::new();
        if let Some(ref flag) = config.shutdown_flag {
            hasher = hasher.with_shutdown_flag(Arc::clone(flag));
        }
        Self {
            config,
            hasher: Arc::new(hasher),
        }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find all duplicate files under the given root.
    ///
    /// Returns the duplicate set (groups of 2+ content-identical files, in
    /// discovery order) and summary statistics. An interrupted scan is not
    /// an error: whatever was grouped before the interruption is returned
    /// with `summary.interrupted` set.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] only when `root` does not denote an
    /// accessible directory.
    pub fn find_duplicates(
        &self,
        root: &Path,
    ) -> Result<(DuplicateSet, ScanSummary), FinderError> {
        if !root.exists() {
            return Err(FinderError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FinderError::NotADirectory(root.to_path_buf()));
        }

        log::info!("Scanning {} for duplicates", root.display());

        let mut walker = Walker::new(root, self.config.walker.clone());
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(Arc::clone(flag));
        }

        let files: Vec<FileEntry> = walker.walk().collect();
        self.find_duplicates_from_files(files)
    }

    /// Find duplicates in a pre-collected candidate list.
    ///
    /// The list order is the discovery order: it decides group order and
    /// keepers. Useful when candidates come from another source (or from a
    /// walk performed earlier).
    pub fn find_duplicates_from_files(
        &self,
        files: Vec<FileEntry>,
    ) -> Result<(DuplicateSet, ScanSummary), FinderError> {
        let start = std::time::Instant::now();
        let total = files.len();
        let mut summary = ScanSummary {
            total_files: total,
            ..Default::default()
        };

        log::info!("Hashing {} candidate files", total);

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_scan_start(total);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build()
            .unwrap_or_else(|_| {
                log::warn!(
                    "Failed to create custom thread pool, using global pool with {} threads",
                    rayon::current_num_threads()
                );
                rayon::ThreadPoolBuilder::new().build().unwrap()
            });

        // Hash in parallel; collect() preserves input order, so the result
        // vector lines up with discovery sequence numbers.
        let processed = AtomicUsize::new(0);
        let results: Vec<Result<Hash, HashError>> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    if self.config.is_shutdown_requested() {
                        return Err(HashError::Interrupted);
                    }
                    let result = self.hasher.hash_file(&file.path);
                    if result.is_ok() {
                        let done = processed.fetch_add(1, Ordering::SeqCst) + 1;
                        if done % PROGRESS_INTERVAL == 0 {
                            if let Some(ref callback) = self.config.progress_callback {
                                callback.on_progress(done, total);
                            }
                        }
                    }
                    result
                })
                .collect()
        });

        // Aggregate sequentially in discovery order; first seen wins as keeper.
        let mut set = DuplicateSet::new();
        for (file, result) in files.into_iter().zip(results) {
            match result {
                Ok(hash) => {
                    summary.hashed_files += 1;
                    set.insert(hash, file.size, file.path);
                }
                Err(HashError::Interrupted) => {
                    summary.interrupted = true;
                }
                Err(e) => {
                    summary.unreadable_files += 1;
                    log::debug!("Dropping unreadable file {}: {}", file.path.display(), e);
                }
            }
        }

        if self.config.is_shutdown_requested() {
            summary.interrupted = true;
        }

        let set = set.retain_duplicates();
        summary.duplicate_groups = set.len();
        summary.duplicate_files = set.iter().map(|g| g.duplicate_count()).sum();
        summary.reclaimable_space = set.iter().map(|g| g.wasted_space()).sum();
        summary.scan_duration = start.elapsed();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_scan_end();
        }

        log::info!(
            "Scan complete: {} groups, {} duplicate files, {} bytes reclaimable{}",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_space,
            if summary.interrupted {
                " (interrupted, partial results)"
            } else {
                ""
            }
        );

        Ok((set, summary))
    }
}
