//! Portable implementation of the scoop scanner.
//!
//! `scan` is the scalar engine (one lane) and the fallback the dispatcher
//! uses when no SIMD backend is available. The `*_lanes` functions run the
//! same generic kernel on [`Lanes<W>`] for any width, without CPU features.

mod lanes;

pub use lanes::Lanes;

use crate::kernels::constants::SCOOP_SIZE;
use crate::kernels::deadline::{self, PostSignature};
use crate::kernels::multi::{self, LaneDigests};
use crate::kernels::scan::scan_lanes as scan_generic;
use crate::types::{BestDeadline, ShabalError};

// =============================================================================
// SCALAR
// =============================================================================

/// Scalar scan, one scoop at a time.
pub fn scan(
    sig: &PostSignature,
    scoops: &[u8],
    best: BestDeadline,
    first_offset: u64,
) -> BestDeadline {
    scan_generic::<u32>(sig, scoops, best, first_offset)
}

// =============================================================================
// PORTABLE LANES
// =============================================================================

/// Scan with `W` portable lanes per group.
pub fn scan_lanes<const W: usize>(
    sig: &PostSignature,
    scoops: &[u8],
    best: BestDeadline,
    first_offset: u64,
) -> BestDeadline {
    scan_generic::<Lanes<W>>(sig, scoops, best, first_offset)
}

/// Deadlines of `W` consecutive scoops (`group` is `64 * W` bytes).
///
/// # Panics
/// Panics if `group` or `out` is shorter than `W` scoops.
pub fn deadlines<const W: usize>(sig: &PostSignature, group: &[u8], out: &mut [u64]) {
    assert!(group.len() >= W * SCOOP_SIZE && out.len() >= W);
    deadline::deadlines(&sig.broadcast::<Lanes<W>>(), group, out);
}

/// Deadlines of up to `W` scoops where `None` marks an inactive lane.
pub fn deadlines_masked<const W: usize>(
    sig: &PostSignature,
    scoops: &[Option<&[u8; SCOOP_SIZE]>],
    out: &mut [Option<u64>],
) {
    deadline::deadlines_masked(&sig.broadcast::<Lanes<W>>(), scoops, out);
}

/// Hash `W` messages (one per lane) with `out_bits`-bit output.
///
/// # Errors
/// See [`MultiShabal::update`](crate::kernels::multi::MultiShabal::update).
pub fn hash_lanes<const W: usize>(
    inputs: &[Option<&[u8]>],
    out_bits: u32,
) -> Result<LaneDigests, ShabalError> {
    multi::hash_lanes::<Lanes<W>>(inputs, out_bits)
}
