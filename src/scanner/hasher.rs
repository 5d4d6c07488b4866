//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! [`Hasher`] computes the BLAKE3 digest of a file's full byte content by
//! reading it in fixed-size chunks, so memory use stays bounded no matter
//! how large the file is. Duplicate sets routinely include multi-gigabyte
//! files; nothing here ever loads a whole file into memory.
//!
//! Any read failure maps to a [`HashError`] the caller is expected to treat
//! as "skip this file" rather than a fatal condition.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Content digest: a 32-byte BLAKE3 hash.
pub type Hash = [u8; 32];

/// Read buffer size for streaming hashing.
pub const HASH_BUF_SIZE: usize = 64 * 1024;

/// Errors that can occur while hashing a file.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file was not found (e.g. deleted mid-scan).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Hashing was abandoned because shutdown was requested.
    #[error("hashing interrupted by shutdown")]
    Interrupted,
}

impl HashError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Streaming file hasher.
#[derive(Debug, Default)]
pub struct Hasher {
    /// Optional shutdown flag checked between read chunks.
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shutdown flag, checked between read chunks so that huge
    /// files do not delay termination.
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

    /// Compute the digest of a file's full content.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] on any read failure or when shutdown is
    /// requested mid-read. Callers treat every variant as "skip this file".
    pub fn hash_file(&self, path: &Path) -> Result<Hash, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buf = [0u8; HASH_BUF_SIZE];

        loop {
            if self.is_shutdown_requested() {
                return Err(HashError::Interrupted);
            }
            let n = file
                .read(&mut buf)
                .map_err(|e| HashError::from_io(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(*hasher.finalize().as_bytes())
    }
}

/// Render a digest as a 64-character lowercase hex string.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    hash.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Render the first 8 hex characters of a digest, for display.
///
/// Digests are never shown in full; 8 characters is plenty to tell groups
/// apart in a report.
#[must_use]
pub fn short_hex(hash: &Hash) -> String {
    let mut hex = hash_to_hex(hash);
    hex.truncate(8);
    hex
}
