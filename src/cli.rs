//! Command-line interface definitions for dupescan.
//!
//! All arguments are defined with the clap derive API. The CLI is a thin
//! layer over the engine: it resolves a [`crate::duplicates::FinderConfig`]
//! and renders the resulting duplicate set.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory recursively (default)
//! dupescan ~/Downloads
//!
//! # Top-level scan only, skipping files under 1 KiB
//! dupescan ~/Downloads --no-recurse --min-size 1KiB
//!
//! # Show what deletion would reclaim without touching anything
//! dupescan ~/Downloads --dry-run
//!
//! # Delete duplicates, keeping the first-discovered copy of each
//! dupescan ~/Downloads --delete
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Duplicate file finder and eliminator.
///
/// dupescan groups files by the BLAKE3 hash of their full content,
/// reports duplicate sets, and can delete every copy except the
/// first-discovered one.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(value_name = "DIR")]
    pub path: PathBuf,

    /// Do not descend into subdirectories (top-level scan only)
    #[arg(long)]
    pub no_recurse: bool,

    /// Minimum file size to consider (e.g., 1KB, 4MiB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB.
    /// Files smaller than this are skipped before hashing.
    #[arg(
        long,
        value_name = "SIZE",
        default_value = "1",
        value_parser = parse_size,
        env = "DUPESCAN_MIN_SIZE"
    )]
    pub min_size: u64,

    /// Show file sizes in the report
    #[arg(long)]
    pub show_size: bool,

    /// Delete duplicate files (keeps the first-discovered copy per set)
    #[arg(long)]
    pub delete: bool,

    /// Report what deletion would reclaim without touching the filesystem
    #[arg(long, conflicts_with = "delete")]
    pub dry_run: bool,

    /// Follow symbolic links during the scan
    ///
    /// Warning: symlink cycles can cause unbounded traversal.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Number of I/O threads for hashing
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(
        long,
        value_name = "N",
        default_value = "4",
        env = "DUPESCAN_IO_THREADS"
    )]
    pub io_threads: usize,

    /// Output format for the duplicate report
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output and all logging except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Render fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB.
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dupescan::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// or carries an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("size cannot be empty".to_string());
    }

    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("invalid number in size: '{}'", s))?;

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" => 1_000,
        "KIB" => 1 << 10,
        "MB" => 1_000_000,
        "MIB" => 1 << 20,
        "GB" => 1_000_000_000,
        "GIB" => 1 << 30,
        "TB" => 1_000_000_000_000,
        "TIB" => 1 << 40,
        other => return Err(format!("unknown size suffix: '{}'", other)),
    };

    Ok((num * multiplier as f64) as u64)
}
