//! Scanner module for directory traversal and file hashing.
//!
//! The scanner is divided into submodules:
//! - [`walker`]: directory traversal and candidate file discovery
//! - [`hasher`]: streaming BLAKE3 content hashing
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig {
//!     min_size: 1024, // skip files under 1 KiB
//!     ..Default::default()
//! };
//!
//! let walker = Walker::new(Path::new("."), config);
//! for file in walker.walk() {
//!     println!("{}: {} bytes", file.path.display(), file.size);
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

pub use hasher::{hash_to_hex, short_hex, Hash, HashError, Hasher, HASH_BUF_SIZE};
pub use walker::Walker;

/// A candidate file discovered during traversal.
///
/// Entries are produced in deterministic discovery order; the position of
/// an entry in the walker's output stream is its discovery sequence number,
/// which later decides which group member becomes the keeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileEntry {
    /// Create a new file entry.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Descend into subdirectories. When false, only the immediate
    /// children of the root are visited.
    pub recursive: bool,

    /// Follow symbolic links during traversal.
    /// Warning: symlink cycles can cause unbounded traversal.
    pub follow_symlinks: bool,

    /// Minimum file size to include, in bytes. Smaller files are skipped
    /// before any hashing work. A value of 0 includes empty files.
    pub min_size: u64,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            follow_symlinks: false,
            min_size: 1,
        }
    }
}
