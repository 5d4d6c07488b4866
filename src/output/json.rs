//! JSON output formatter for duplicate scan results.
//!
//! Serializes the duplicate set plus scan summary into a stable,
//! scripting-friendly shape. Digests are rendered as full hex strings.

use std::path::PathBuf;

use serde::Serialize;

use crate::duplicates::{analyze, DuplicateSet, ScanSummary};

/// One duplicate group in the JSON report.
#[derive(Debug, Serialize)]
struct JsonGroup<'a> {
    /// Full hex digest of the shared content
    hash: String,
    /// Member size in bytes
    size: u64,
    /// The preserved path
    keeper: Option<&'a PathBuf>,
    /// All member paths in discovery order (keeper first)
    paths: &'a [PathBuf],
}

/// Top-level JSON report.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    set_count: usize,
    reclaimable_bytes: u64,
    total_files: usize,
    hashed_files: usize,
    unreadable_files: usize,
    scan_duration_ms: u128,
    interrupted: bool,
    groups: Vec<JsonGroup<'a>>,
}

/// Render a duplicate set and scan summary as pretty-printed JSON.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails (practically
/// impossible for these types).
pub fn render(set: &DuplicateSet, summary: &ScanSummary) -> serde_json::Result<String> {
    let stats = analyze(set);

    let groups: Vec<JsonGroup<'_>> = set
        .iter()
        .map(|g| JsonGroup {
            hash: g.hash_hex(),
            size: g.size,
            keeper: g.keeper(),
            paths: &g.paths,
        })
        .collect();

    let report = JsonReport {
        set_count: stats.set_count,
        reclaimable_bytes: stats.reclaimable_bytes,
        total_files: summary.total_files,
        hashed_files: summary.hashed_files,
        unreadable_files: summary.unreadable_files,
        scan_duration_ms: summary.scan_duration.as_millis(),
        interrupted: summary.interrupted,
        groups,
    };

    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_json_shape() {
        let dir = TempDir::new().unwrap();
        let mut set = DuplicateSet::new();
        for name in ["a.txt", "b.txt"] {
            let path = dir.path().join(name);
            File::create(&path).unwrap().write_all(b"XYZ").unwrap();
            set.insert([3u8; 32], 3, path);
        }

        let summary = ScanSummary {
            total_files: 2,
            hashed_files: 2,
            duplicate_groups: 1,
            duplicate_files: 1,
            reclaimable_space: 3,
            ..Default::default()
        };

        let json = render(&set, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["set_count"], 1);
        assert_eq!(value["reclaimable_bytes"], 3);
        assert_eq!(value["total_files"], 2);
        assert_eq!(value["interrupted"], false);
        assert_eq!(value["groups"].as_array().unwrap().len(), 1);

        let group = &value["groups"][0];
        assert_eq!(group["hash"].as_str().unwrap().len(), 64);
        assert_eq!(group["size"], 3);
        assert_eq!(group["paths"].as_array().unwrap().len(), 2);
        assert_eq!(group["keeper"], group["paths"][0]);
    }

    #[test]
    fn test_json_empty_set() {
        let json = render(&DuplicateSet::new(), &ScanSummary::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["set_count"], 0);
        assert!(value["groups"].as_array().unwrap().is_empty());
    }
}
