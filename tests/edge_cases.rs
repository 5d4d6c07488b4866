//! Edge cases: races with external deletion, interruption, strange trees.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tempfile::TempDir;

use dupescan::actions::{delete_duplicates, DeleteConfig};
use dupescan::duplicates::{analyze, DuplicateFinder, FinderConfig};
use dupescan::scanner::{FileEntry, Walker, WalkerConfig};

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_file_deleted_between_walk_and_hash() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.txt", "PAIR");
    let b = write_file(dir.path(), "b.txt", "PAIR");
    let doomed = write_file(dir.path(), "doomed.txt", "PAIR");

    // Enumerate first, then lose a file before hashing starts
    let walker = Walker::new(dir.path(), WalkerConfig::default());
    let files: Vec<FileEntry> = walker.walk().collect();
    assert_eq!(files.len(), 3);
    fs::remove_file(&doomed).unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (set, summary) = finder.find_duplicates_from_files(files).unwrap();

    // The vanished file is dropped, the surviving pair still groups
    assert_eq!(summary.unreadable_files, 1);
    assert_eq!(set.len(), 1);
    assert_eq!(set.iter().next().unwrap().paths, vec![a, b]);
}

#[test]
fn test_keeper_deleted_externally_before_analyze() {
    let dir = TempDir::new().unwrap();
    // Sorted discovery order makes a_gone.txt the keeper of its group
    let keeper = write_file(dir.path(), "a_gone.txt", "GONE_SOON");
    write_file(dir.path(), "b_gone.txt", "GONE_SOON");
    write_file(dir.path(), "x1.txt", "STAYS");
    write_file(dir.path(), "x2.txt", "STAYS");

    let finder = DuplicateFinder::with_defaults();
    let (set, _) = finder.find_duplicates(dir.path()).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.iter().next().unwrap().keeper().unwrap(), &keeper);

    // Race: someone removes one group's keeper after the scan
    fs::remove_file(&keeper).unwrap();

    let stats = analyze(&set);
    // Both groups still count; only the intact one contributes bytes
    assert_eq!(stats.set_count, 2);
    assert_eq!(stats.reclaimable_bytes, 5);
}

#[test]
fn test_interrupted_scan_returns_partial_set_not_error() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", "X");
    write_file(dir.path(), "b.txt", "X");

    let flag = Arc::new(AtomicBool::new(true));
    let config = FinderConfig::default().with_shutdown_flag(flag);
    let finder = DuplicateFinder::new(config);

    let result = finder.find_duplicates(dir.path());
    let (set, summary) = result.expect("interruption must not be an error");
    assert!(summary.interrupted);
    assert!(set.is_empty());
}

#[test]
fn test_delete_failure_in_one_group_does_not_block_later_groups() {
    let dir = TempDir::new().unwrap();
    let a1 = write_file(dir.path(), "a1.txt", "AA");
    let a2 = write_file(dir.path(), "a2.txt", "AA");
    let b1 = write_file(dir.path(), "b1.txt", "BBB");
    let b2 = write_file(dir.path(), "b2.txt", "BBB");

    let finder = DuplicateFinder::with_defaults();
    let (set, _) = finder.find_duplicates(dir.path()).unwrap();
    assert_eq!(set.len(), 2);

    // Sabotage the first group's duplicate before elimination runs
    let first_dup = set.iter().next().unwrap().duplicates()[0].clone();
    fs::remove_file(&first_dup).unwrap();

    let report = delete_duplicates(&set, &DeleteConfig::default());

    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.deleted_count, 1);
    // Keepers survive regardless
    assert!(a1.exists() || a2.exists());
    assert!(b1.exists() || b2.exists());
}

#[test]
fn test_deeply_nested_tree() {
    let dir = TempDir::new().unwrap();
    let mut current = dir.path().to_path_buf();
    for level in 0..8 {
        current = current.join(format!("level{}", level));
        fs::create_dir(&current).unwrap();
        write_file(&current, "payload.txt", "DEEP_DUP");
    }

    let finder = DuplicateFinder::with_defaults();
    let (set, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(summary.total_files, 8);
    assert_eq!(set.len(), 1);
    assert_eq!(set.iter().next().unwrap().len(), 8);
}

#[test]
fn test_many_small_groups() {
    let dir = TempDir::new().unwrap();
    for i in 0..50 {
        let content = format!("GROUP_{}", i);
        write_file(dir.path(), &format!("g{}_a.txt", i), &content);
        write_file(dir.path(), &format!("g{}_b.txt", i), &content);
    }

    let finder = DuplicateFinder::with_defaults();
    let (set, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(set.len(), 50);
    assert_eq!(summary.duplicate_files, 50);
}

#[test]
#[cfg(unix)]
fn test_dangling_symlink_is_skipped() {
    use std::os::unix::fs::symlink;

    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", "REAL");
    write_file(dir.path(), "b.txt", "REAL");
    symlink(dir.path().join("missing.txt"), dir.path().join("dangling")).unwrap();

    // Even when following links, a dangling target just drops out
    let config = FinderConfig::default().with_walker_config(WalkerConfig {
        follow_symlinks: true,
        ..Default::default()
    });
    let finder = DuplicateFinder::new(config);
    let (set, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(set.len(), 1);
    assert_eq!(set.iter().next().unwrap().len(), 2);
}
