//! Benchmarks comparing buffered reads against memory-mapped access.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::tempdir;

use filemap::MappedFile;

const SMALL_SIZE: usize = 4 * 1024; // 4KB
const MEDIUM_SIZE: usize = 1024 * 1024; // 1MB
const LARGE_SIZE: usize = 16 * 1024 * 1024; // 16MB

fn setup_file(path: &Path, size: usize) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    // Write data in chunks to avoid excessive memory usage
    let chunk_size = 64 * 1024;
    let mut buffer = vec![0u8; chunk_size];

    let mut written = 0;
    while written < size {
        let n = chunk_size.min(size - written);
        for (j, byte) in buffer[..n].iter_mut().enumerate() {
            *byte = ((written + j) % 256) as u8;
        }
        file.write_all(&buffer[..n])?;
        written += n;
    }

    file.sync_all()
}

fn bench_sequential_read_std_io(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let mut group = c.benchmark_group("Sequential Read (Standard IO)");

    for &size in &[SMALL_SIZE, MEDIUM_SIZE, LARGE_SIZE] {
        let file_path = dir.path().join(format!("seq_read_std_{}", size));
        setup_file(&file_path, size).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut file = File::open(&file_path).unwrap();
                let mut buffer = vec![0u8; 4096];
                let mut total = 0u64;

                loop {
                    match file.read(&mut buffer).unwrap() {
                        0 => break,
                        n => {
                            for &byte in &buffer[..n] {
                                total = total.wrapping_add(u64::from(byte));
                            }
                        }
                    }
                }

                black_box(total)
            });
        });
    }

    group.finish();
}

fn bench_sequential_read_mapped(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let mut group = c.benchmark_group("Sequential Read (Memory Mapped)");

    for &size in &[SMALL_SIZE, MEDIUM_SIZE, LARGE_SIZE] {
        let file_path = dir.path().join(format!("seq_read_map_{}", size));
        setup_file(&file_path, size).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let map = MappedFile::open(&file_path).unwrap();
                let mut total = 0u64;

                for &byte in map.as_bytes() {
                    total = total.wrapping_add(u64::from(byte));
                }

                black_box(total)
            });
        });
    }

    group.finish();
}

fn bench_map_unmap(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let mut group = c.benchmark_group("Map/Unmap Cycle");

    for &size in &[SMALL_SIZE, MEDIUM_SIZE, LARGE_SIZE] {
        let file_path = dir.path().join(format!("map_cycle_{}", size));
        setup_file(&file_path, size).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let map = MappedFile::open(&file_path).unwrap();
                black_box(map.size())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_read_std_io,
    bench_sequential_read_mapped,
    bench_map_unmap
);
criterion_main!(benches);
