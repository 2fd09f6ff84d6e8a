//! Backend Comparison Benchmark
//!
//! Deadline throughput of the runtime dispatcher against each explicit
//! backend, in nonces per second.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::prelude::*;
use scoopscan::{Backend, BestDeadline, PostSignature};
use std::hint::black_box;

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scan Backends");

    let mut gensig = [0u8; 32];
    rand::rng().fill(&mut gensig[..]);
    let sig = PostSignature::new(&gensig);

    // Scenarios:
    // - Tiny (15 nonces): below one AVX-512 group, tail path only
    // - Small (1 Ki): L1-resident scoops
    // - Large (64 Ki): several parallel chunks
    let counts = [15usize, 1024, 64 * 1024];

    for nonces in counts {
        let mut scoops = vec![0u8; nonces * 64];
        rand::rng().fill(&mut scoops[..]);
        group.throughput(Throughput::Elements(nonces as u64));

        // 1. Dispatcher (Production Path)
        group.bench_function(format!("Dispatcher - {nonces} nonces"), |b| {
            b.iter(|| scoopscan::find_best_deadline(black_box(&scoops), nonces as u64, &gensig));
        });

        // 2. Every backend this CPU runs, bypassing detection
        for backend in Backend::ALL {
            let Ok(kernel) = scoopscan::kernel_for(backend) else {
                continue;
            };
            group.bench_function(format!("{backend} ({} lanes) - {nonces} nonces", backend.lanes()), |b| {
                b.iter(|| kernel(&sig, black_box(&scoops), BestDeadline::NONE, 0));
            });
        }

        // 3. Reference: one streaming hash per scoop
        group.bench_function(format!("Streaming reference - {nonces} nonces"), |b| {
            b.iter(|| {
                scoops
                    .chunks_exact(64)
                    .map(|s| scoopscan::deadline(&gensig, s.try_into().unwrap()))
                    .min()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
