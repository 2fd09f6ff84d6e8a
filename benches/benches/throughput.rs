//! scoopscan Criterion Benchmark
//!
//! Hashing and scanning throughput across input sizes and thread counts.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::prelude::*;
use std::hint::black_box;

const KB: usize = 1024;
const MB: usize = 1024 * 1024;

// =============================================================================
// BENCHMARK 1: LATENCY
// =============================================================================

/// Hot path latency for short messages.
fn bench_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Latency");

    let sizes = [
        (16, "16B"),
        (64, "64B"),
        (96, "96B-deadline-input"),
        (256, "256B"),
        (KB, "1KB"),
    ];

    for (size, name) in sizes {
        let mut input = vec![0u8; size];
        rand::rng().fill(&mut input[..]);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(name),
            &input,
            |b, data| b.iter(|| scoopscan::shabal256(black_box(data))),
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: BULK HASHING
// =============================================================================

/// Single-stream throughput for larger inputs.
fn bench_bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Bulk");
    group.sample_size(50);

    let sizes = [(64 * KB, "64KB"), (MB, "1MB"), (16 * MB, "16MB")];

    for (size, name) in sizes {
        let mut input = vec![0u8; size];
        rand::rng().fill(&mut input[..]);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(name),
            &input,
            |b, data| b.iter(|| scoopscan::shabal256(black_box(data))),
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: MULTI-LANE HASHING
// =============================================================================

/// Sixteen independent messages through the portable 16-lane engine.
fn bench_lanes(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Multi-Lane");

    let size = 4 * KB;
    let msgs: Vec<Vec<u8>> = (0..16)
        .map(|_| {
            let mut m = vec![0u8; size];
            rand::rng().fill(&mut m[..]);
            m
        })
        .collect();
    let inputs: Vec<Option<&[u8]>> = msgs.iter().map(|m| Some(&m[..])).collect();
    group.throughput(Throughput::Bytes((16 * size) as u64));

    group.bench_function("16x4KB-lanes", |b| {
        b.iter(|| scoopscan::kernels::portable::hash_lanes::<16>(black_box(&inputs), 256).unwrap())
    });
    group.bench_function("16x4KB-sequential", |b| {
        b.iter(|| {
            msgs.iter()
                .map(|m| scoopscan::shabal256(black_box(m)))
                .collect::<Vec<_>>()
        })
    });
    group.finish();
}

// =============================================================================
// BENCHMARK 4: STREAMING
// =============================================================================

/// Throughput for incremental updates.
fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("4-Streaming");
    group.sample_size(50);

    let test_cases = [
        (MB, 61, "1MB-61B-chunks"),
        (MB, 4 * KB, "1MB-4KB-chunks"),
        (16 * MB, 64 * KB, "16MB-64KB-chunks"),
    ];

    for (total_size, chunk_size, name) in test_cases {
        let mut input = vec![0u8; total_size];
        rand::rng().fill(&mut input[..]);
        group.throughput(Throughput::Bytes(total_size as u64));

        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(name),
            &(input, chunk_size),
            |b, (data, chunk_sz)| {
                b.iter(|| {
                    let mut hasher = scoopscan::Shabal256::new();
                    for chunk in data.chunks(*chunk_sz) {
                        hasher.update(black_box(chunk));
                    }
                    hasher.finalize()
                })
            },
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 5: THREAD SCALING
// =============================================================================

/// Parallel scan scaling with Rayon (1 to N threads).
#[cfg(feature = "multithread")]
fn bench_thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("5-Thread-Scaling");
    group.sample_size(20);

    let nonces = 256 * 1024;
    let mut scoops = vec![0u8; nonces * 64];
    rand::rng().fill(&mut scoops[..]);
    let gensig = [7u8; 32];
    group.throughput(Throughput::Elements(nonces as u64));

    let max_threads = num_cpus::get();
    let thread_counts: Vec<usize> = [1, 2, 4, 8, 16, 32]
        .iter()
        .copied()
        .filter(|&t| t <= max_threads)
        .collect();

    for threads in thread_counts {
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(format!("{}threads", threads)),
            &threads,
            |b, &t| {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(t)
                    .build()
                    .unwrap();
                pool.install(|| {
                    b.iter(|| {
                        scoopscan::find_best_deadline_parallel(
                            black_box(&scoops),
                            nonces as u64,
                            &gensig,
                        )
                    })
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// MAIN
// =============================================================================

criterion_group!(benches, bench_latency, bench_bulk, bench_lanes, bench_streaming);

#[cfg(feature = "multithread")]
criterion_group!(benches_multithread, bench_thread_scaling);

#[cfg(feature = "multithread")]
criterion_main!(benches, benches_multithread);

#[cfg(not(feature = "multithread"))]
criterion_main!(benches);
