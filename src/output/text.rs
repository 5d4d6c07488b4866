//! Human-readable text report.
//!
//! Pure formatting over the duplicate set and its derived statistics.
//! Keeper lines are marked `[KEEP]`, deletable members `[DUPLICATE]`;
//! digests are shown truncated. Coloring is handled globally by yansi, so
//! `--no-color`/`NO_COLOR` disables it without touching this code.

use std::fmt::Write as _;

use bytesize::ByteSize;
use yansi::Paint;

use crate::duplicates::{analyze, DuplicateSet};

/// Render a duplicate set as a text report.
///
/// `show_size` appends the per-file size to each set header. The returned
/// string is newline-terminated.
#[must_use]
pub fn render(set: &DuplicateSet, show_size: bool) -> String {
    if set.is_empty() {
        return "No duplicate files found.\n".to_string();
    }

    let stats = analyze(set);
    let mut out = String::new();

    let _ = writeln!(out, "Found {} set(s) of duplicates:", stats.set_count);
    let _ = writeln!(out, "{}", "-".repeat(60));

    for (i, group) in set.iter().enumerate() {
        let size_info = if show_size {
            format!(" ({})", ByteSize::b(group.size))
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "\nSet {} - hash {}...{}",
            i + 1,
            group.short_hash(),
            size_info
        );

        for (j, path) in group.paths.iter().enumerate() {
            if j == 0 {
                let _ = writeln!(out, "  {}      {}", "[KEEP]".green(), path.display());
            } else {
                let _ = writeln!(out, "  {} {}", "[DUPLICATE]".red(), path.display());
            }
        }
    }

    if stats.reclaimable_bytes > 0 {
        let _ = writeln!(
            out,
            "\nTotal reclaimable space: {}",
            ByteSize::b(stats.reclaimable_bytes)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::DuplicateSet;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample_set() -> (TempDir, DuplicateSet) {
        let dir = TempDir::new().unwrap();
        let mut set = DuplicateSet::new();
        for name in ["a.txt", "b.txt"] {
            let path = dir.path().join(name);
            File::create(&path).unwrap().write_all(b"XX").unwrap();
            set.insert([7u8; 32], 2, path);
        }
        (dir, set)
    }

    #[test]
    fn test_empty_set_message() {
        let rendered = render(&DuplicateSet::new(), false);
        assert_eq!(rendered, "No duplicate files found.\n");
    }

    #[test]
    fn test_report_structure() {
        let (_dir, set) = sample_set();
        let rendered = render(&set, false);

        assert!(rendered.contains("Found 1 set(s) of duplicates:"));
        assert!(rendered.contains("Set 1 - hash 07070707..."));
        assert!(rendered.contains("[KEEP]"));
        assert!(rendered.contains("[DUPLICATE]"));
        assert!(rendered.contains("a.txt"));
        assert!(rendered.contains("b.txt"));
        assert!(rendered.contains("Total reclaimable space:"));
    }

    #[test]
    fn test_keeper_listed_before_duplicate() {
        let (_dir, set) = sample_set();
        let rendered = render(&set, false);

        let keep_pos = rendered.find("[KEEP]").unwrap();
        let dup_pos = rendered.find("[DUPLICATE]").unwrap();
        assert!(keep_pos < dup_pos);
    }

    #[test]
    fn test_show_size_appends_size() {
        let (_dir, set) = sample_set();

        let without = render(&set, false);
        let with = render(&set, true);

        assert!(!without.contains("(2 B)"));
        assert!(with.contains("(2 B)"));
    }
}
