use chrono::{DateTime, Duration, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dirtrack::diff;
use dirtrack::snapshot::{FileRecord, Snapshot, SnapshotBuilder};
use dirtrack::utils::serialization;
use std::fs;
use std::hint::black_box;
use std::path::Path;
use tempfile::tempdir;

fn create_tree(dir: &Path, count: usize) {
    for i in 0..count {
        let sub = dir.join(format!("dir_{}", i % 10));
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join(format!("file_{i}.txt")), format!("content {i}")).unwrap();
    }
}

fn synthetic_snapshot(count: u64, taken_at: DateTime<Utc>) -> Snapshot {
    let mtime = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let records = (0..count).map(|i| {
        FileRecord::new(
            i,
            format!("/bench/dir_{}", i % 10),
            format!("file_{i}.txt"),
            mtime,
        )
    });
    Snapshot::from_records("/bench", taken_at, records).unwrap()
}

/// Every fourth file moved, every seventh touched, every ninth dropped
fn churned(base: &Snapshot, taken_at: DateTime<Utc>) -> Snapshot {
    let records = base.records().filter_map(|record| {
        let n = record.identity.inode;
        if n % 9 == 0 {
            return None;
        }
        let mut next = record.clone();
        if n % 4 == 0 {
            next.dir = next.dir.join("moved");
        }
        if n % 7 == 0 {
            next.mtime += Duration::seconds(1);
        }
        Some(next)
    });
    Snapshot::from_records("/bench", taken_at, records).unwrap()
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_build");

    for count in &[100, 1000] {
        let dir = tempdir().unwrap();
        create_tree(dir.path(), *count);
        let builder = SnapshotBuilder::default();

        group.bench_with_input(BenchmarkId::from_parameter(count), dir.path(), |b, root| {
            b.iter(|| builder.build(black_box(root)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_diff");
    let t0 = Utc::now();

    for count in &[1_000_u64, 10_000, 100_000] {
        let old = synthetic_snapshot(*count, t0);
        let new = churned(&old, t0 + Duration::seconds(60));

        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &(old, new),
            |b, (old, new)| {
                b.iter(|| diff::diff(black_box(old), black_box(new)));
            },
        );
    }

    group.finish();
}

fn benchmark_encoding(c: &mut Criterion) {
    let snapshot = synthetic_snapshot(10_000, Utc::now());
    let encoded = serialization::serialize_compressed(&snapshot, 3).unwrap();

    let mut group = c.benchmark_group("snapshot_encoding");

    group.bench_function("compress_10k", |b| {
        b.iter(|| serialization::serialize_compressed(black_box(&snapshot), 3).unwrap());
    });

    group.bench_function("decompress_10k", |b| {
        b.iter(|| serialization::deserialize_compressed::<Snapshot>(black_box(&encoded)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_diff, benchmark_encoding);
criterion_main!(benches);
