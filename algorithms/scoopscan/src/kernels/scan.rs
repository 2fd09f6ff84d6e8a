//! Scoop Scanner
//!
//! Running-minimum reduction over a contiguous run of scoops. Full groups of
//! `V::LANES` scoops go through the lane-parallel kernel; the tail goes
//! through the scalar kernel. Offsets are visited in increasing order and the
//! minimum only moves on a strictly smaller deadline, so the result is the
//! same for every lane width.

use super::constants::{MAX_LANES, SCOOP_SIZE};
use super::deadline::{deadline_lanes, deadlines, PostSignature};
use super::vector::{load_words, ShabalVector};
use crate::types::BestDeadline;

/// Scan `scoops` (a whole number of 64-byte records) starting at
/// `first_offset`, folding into `best`.
///
/// Scoop `i` gets offset `first_offset + i`; only offsets of scoops that
/// exist are formed, so a range ending at `u64::MAX` does not overflow.
#[inline(always)]
pub(crate) fn scan_lanes<V: ShabalVector>(
    sig: &PostSignature,
    scoops: &[u8],
    mut best: BestDeadline,
    first_offset: u64,
) -> BestDeadline {
    debug_assert!(scoops.len().is_multiple_of(SCOOP_SIZE));

    let snap = sig.broadcast::<V>();
    let mut groups = scoops.chunks_exact(SCOOP_SIZE * V::LANES);
    let mut out = [0u64; MAX_LANES];
    let mut base = 0u64;
    for group in &mut groups {
        deadlines(&snap, group, &mut out[..V::LANES]);
        for (lane, &d) in (0u64..).zip(&out[..V::LANES]) {
            best.update(d, first_offset.wrapping_add(base + lane));
        }
        base += V::LANES as u64;
    }

    for (i, scoop) in (0u64..).zip(groups.remainder().chunks_exact(SCOOP_SIZE)) {
        best.update(scalar_deadline(sig, scoop), first_offset.wrapping_add(base + i));
    }
    best
}

#[inline(always)]
fn scalar_deadline(sig: &PostSignature, scoop: &[u8]) -> u64 {
    let lo: [u32; 8] = load_words(|_| Some(scoop));
    let hi: [u32; 8] = load_words(|_| Some(&scoop[32..]));
    let (d_lo, d_hi) = deadline_lanes(sig, &lo, &hi);
    u64::from(d_hi) << 32 | u64::from(d_lo)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::portable::Lanes;

    fn scoops(count: usize) -> Vec<u8> {
        (0..count * SCOOP_SIZE)
            .map(|i| (i as u32).wrapping_mul(2_654_435_761).to_le_bytes()[3])
            .collect()
    }

    #[test]
    fn single_scoop_at_the_last_offset() {
        let sig = PostSignature::new(&[0x33; 32]);
        let scoop = [0u8; SCOOP_SIZE];
        let best = scan_lanes::<u32>(&sig, &scoop, BestDeadline::NONE, u64::MAX);
        assert_eq!(best.offset, u64::MAX);
        assert_eq!(best.deadline, scalar_deadline(&sig, &scoop));
    }

    #[test]
    fn range_ending_at_the_last_offset() {
        // Two full groups of four plus a three-scoop tail.
        let sig = PostSignature::new(&[0x9C; 32]);
        let data = scoops(11);
        let first = u64::MAX - 10;

        let mut expected = BestDeadline::NONE;
        for (i, scoop) in data.chunks_exact(SCOOP_SIZE).enumerate() {
            expected.update(scalar_deadline(&sig, scoop), first + i as u64);
        }
        assert_eq!(scan_lanes::<u32>(&sig, &data, BestDeadline::NONE, first), expected);
        assert_eq!(scan_lanes::<Lanes<4>>(&sig, &data, BestDeadline::NONE, first), expected);
        assert_eq!(scan_lanes::<Lanes<16>>(&sig, &data, BestDeadline::NONE, first), expected);
    }
}
