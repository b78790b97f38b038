//! Benchmark tests for the scanner module

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rusty_reclaim::classifier::ClassifierRegistry;
use rusty_reclaim::paths::HostPaths;
use rusty_reclaim::scanner::{parse_human_size, ExclusionSet, ScanEngine, SizeProbe, WalkProbe};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a benchmark directory with `dir_count` subfolders of `files_per_dir` files
fn create_benchmark_dir(dir_count: usize, files_per_dir: usize) -> TempDir {
    let dir = TempDir::new().unwrap();

    for d in 0..dir_count {
        let subdir = dir.path().join(format!("dir{}", d)).join("nested");
        fs::create_dir_all(&subdir).unwrap();

        for f in 0..files_per_dir {
            let mut file = File::create(subdir.join(format!("file{}.txt", f))).unwrap();
            file.write_all(&vec![b'x'; 1024]).unwrap();
        }
    }

    dir
}

fn engine() -> ScanEngine {
    ScanEngine::new(
        HostPaths::with_home("/nonexistent-home"),
        Arc::new(WalkProbe::default()),
        Arc::new(ClassifierRegistry::empty()),
    )
    .with_system_roots(Vec::new())
}

fn benchmark_folder_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("folder_scan");
    let engine = engine();
    let exclusions = ExclusionSet::new();

    for dirs in [10, 50, 100].iter() {
        let dir = create_benchmark_dir(*dirs, 10);

        for depth in [1, 2] {
            group.bench_with_input(
                BenchmarkId::new(format!("depth{}", depth), dirs),
                dirs,
                |b, _| {
                    b.iter(|| {
                        engine.scan_folder(black_box(dir.path()), depth, &exclusions, |_| {})
                    })
                },
            );
        }
    }

    group.finish();
}

fn benchmark_probe(c: &mut Criterion) {
    let dir = create_benchmark_dir(20, 20);
    let probe = WalkProbe::default();

    c.bench_function("walk_probe", |b| {
        b.iter(|| probe.measure(black_box(dir.path())))
    });
}

fn benchmark_exclusions(c: &mut Criterion) {
    let host = HostPaths::with_home("/home/u");
    let set = ExclusionSet::parse(
        &host,
        "~/.cache/pip,~/.npm,/var/log,/tmp,~/.local/share/Trash,~/VirtualBox VMs",
    );
    let path = Path::new("/home/u/.local/share/containers/storage/overlay");

    c.bench_function("is_excluded", |b| b.iter(|| set.is_excluded(black_box(path))));
}

fn benchmark_parse_size(c: &mut Criterion) {
    c.bench_function("parse_human_size", |b| {
        b.iter(|| {
            for label in ["0B", "4.0K", "600M", "1.2G", "3T", "bogus"] {
                black_box(parse_human_size(black_box(label)));
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_folder_scan,
    benchmark_probe,
    benchmark_exclusions,
    benchmark_parse_size
);
criterion_main!(benches);
