//! Parallel Execution Engine
//!
//! Splits a scoop range into `CHUNK_NONCES`-sized chunks and scans them
//! independently (in parallel via Rayon if the `multithread` feature is
//! enabled, otherwise serially). Each chunk starts from a fresh
//! `BestDeadline::NONE`; the partial results are merged by
//! `(deadline, offset)`, so the answer matches a serial scan exactly.

use crate::engine::dispatcher::CHUNK_NONCES;
use crate::kernels::constants::SCOOP_SIZE;
use crate::kernels::deadline::PostSignature;
use crate::types::{BestDeadline, ScanFn};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// =============================================================================
// PARALLEL SCAN
// =============================================================================

/// Scan `scoops` in chunks with `kernel`, folding the result into `best`.
///
/// Offsets are relative to the start of `scoops` plus `first_offset`.
pub fn scan_chunked(
    kernel: ScanFn,
    sig: &PostSignature,
    scoops: &[u8],
    best: BestDeadline,
    first_offset: u64,
) -> BestDeadline {
    let chunk_bytes = CHUNK_NONCES * SCOOP_SIZE;

    #[cfg(feature = "std")]
    tracing::debug!(
        nonces = scoops.len() / SCOOP_SIZE,
        chunks = scoops.len().div_ceil(chunk_bytes),
        "chunked scan"
    );

    let partials: Vec<BestDeadline> = scoops.process_chunks(chunk_bytes, |index, chunk| {
        let offset = first_offset.wrapping_add((index * CHUNK_NONCES) as u64);
        kernel(sig, chunk, BestDeadline::NONE, offset)
    });

    let found = partials
        .into_iter()
        .fold(BestDeadline::NONE, BestDeadline::merge);

    // A serial scan only replaces `best` on a strictly smaller deadline.
    let mut out = best;
    out.update(found.deadline, found.offset);
    out
}

/// Helper for feature-agnostic chunk processing
trait ChunkProcessor {
    fn process_chunks<F, R>(self, chunk_size: usize, f: F) -> Vec<R>
    where
        F: Fn(usize, &[u8]) -> R + Sync + Send,
        R: Send;
}

impl ChunkProcessor for &[u8] {
    fn process_chunks<F, R>(self, chunk_size: usize, f: F) -> Vec<R>
    where
        F: Fn(usize, &[u8]) -> R + Sync + Send,
        R: Send,
    {
        #[cfg(feature = "multithread")]
        {
            use rayon::prelude::*;
            self.par_chunks(chunk_size)
                .enumerate()
                .map(|(i, c)| f(i, c))
                .collect()
        }
        #[cfg(not(feature = "multithread"))]
        {
            self.chunks(chunk_size)
                .enumerate()
                .map(|(i, c)| f(i, c))
                .collect()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::portable;

    #[test]
    fn chunked_matches_serial_across_chunk_boundaries() {
        let sig = PostSignature::new(&[0x42; 32]);
        let nonces = CHUNK_NONCES * 2 + 37;
        let scoops: Vec<u8> = (0..nonces * SCOOP_SIZE)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 7) as u8)
            .collect();

        let serial = portable::scan(&sig, &scoops, BestDeadline::NONE, 0);
        let chunked = scan_chunked(portable::scan, &sig, &scoops, BestDeadline::NONE, 0);
        assert_eq!(serial, chunked);
    }

    #[test]
    fn chunked_keeps_a_better_initial_best() {
        let sig = PostSignature::new(&[1; 32]);
        let scoops = [7u8; SCOOP_SIZE * 3];
        let initial = BestDeadline::new(0, 99);
        assert_eq!(
            scan_chunked(portable::scan, &sig, &scoops, initial, 0),
            initial
        );
    }

    #[test]
    fn chunked_range_ending_at_the_last_offset() {
        let sig = PostSignature::new(&[0x42; 32]);
        let nonces = CHUNK_NONCES * 2 + 37;
        let scoops: Vec<u8> = (0..nonces * SCOOP_SIZE)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 7) as u8)
            .collect();
        let first = u64::MAX - (nonces as u64 - 1);

        let serial = portable::scan(&sig, &scoops, BestDeadline::NONE, first);
        let chunked = scan_chunked(portable::scan, &sig, &scoops, BestDeadline::NONE, first);
        assert_eq!(serial, chunked);
        assert!(serial.offset >= first);
    }
}
