//! Criterion benchmarks for the hashing and grouping hot paths.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

use dupescan::duplicates::{DuplicateFinder, DuplicateSet};
use dupescan::scanner::Hasher;

fn bench_hash_file(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("payload.bin");
    let content = vec![0x5Au8; 1024 * 1024];
    File::create(&path).unwrap().write_all(&content).unwrap();

    let hasher = Hasher::new();
    c.bench_function("hash_1mib_file", |b| {
        b.iter(|| {
            let hash = hasher.hash_file(black_box(&path)).unwrap();
            black_box(hash)
        })
    });
}

fn bench_set_aggregation(c: &mut Criterion) {
    c.bench_function("aggregate_10k_entries", |b| {
        b.iter(|| {
            let mut set = DuplicateSet::new();
            for i in 0u32..10_000 {
                // ~50% of entries share a digest with a neighbor
                let key = (i / 2) as u8;
                let mut hash = [0u8; 32];
                hash[0] = key;
                hash[1] = (i / 512) as u8;
                set.insert(hash, 100, PathBuf::from(format!("/fake/{}", i)));
            }
            black_box(set.retain_duplicates())
        })
    });
}

fn bench_full_scan(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    for i in 0..100 {
        let content = format!("content-{}", i % 20);
        fs::write(dir.path().join(format!("f{:03}.txt", i)), content).unwrap();
    }

    let finder = DuplicateFinder::with_defaults();
    c.bench_function("scan_100_files", |b| {
        b.iter(|| {
            let (set, summary) = finder.find_duplicates(black_box(dir.path())).unwrap();
            black_box((set, summary))
        })
    });
}

criterion_group!(
    benches,
    bench_hash_file,
    bench_set_aggregation,
    bench_full_scan
);
criterion_main!(benches);
