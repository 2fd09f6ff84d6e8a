//! NEON Kernel Module
//!
//! Four lanes in `uint32x4_t`. NEON has no variable right shift; `vshlq_u32`
//! with a negative count shifts right instead.

#![allow(clippy::cast_possible_wrap)]

use core::arch::aarch64::{
    uint32x4_t, vaddq_u32, vbicq_u32, vdupq_n_s32, vdupq_n_u32, veorq_u32, vld1q_u32, vorrq_u32,
    vshlq_u32, vst1q_u32, vsubq_u32,
};

use crate::kernels::constants::SCOOP_SIZE;
use crate::kernels::deadline::{self, PostSignature};
use crate::kernels::multi::{self, LaneDigests};
use crate::kernels::scan::scan_lanes;
use crate::kernels::vector::ShabalVector;
use crate::types::{BestDeadline, ShabalError};

/// Lanes per register.
pub const LANES: usize = 4;

// =============================================================================
// VECTOR
// =============================================================================

/// Four `u32` lanes. Only constructed inside the `neon` entry points below.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Neon(uint32x4_t);

// SAFETY: every method is only reached from the `#[target_feature(enable = "neon")]`
// entry points of this module. Loads and stores go through stack arrays of
// exactly four words.
#[allow(unsafe_code, unused_unsafe)]
impl ShabalVector for Neon {
    const LANES: usize = LANES;

    #[inline(always)]
    fn splat(x: u32) -> Self {
        unsafe { Self(vdupq_n_u32(x)) }
    }

    #[inline(always)]
    fn gather(words: &[u32]) -> Self {
        let w = [words[0], words[1], words[2], words[3]];
        unsafe { Self(vld1q_u32(w.as_ptr())) }
    }

    #[inline(always)]
    fn scatter(self, out: &mut [u32]) {
        let mut w = [0u32; LANES];
        unsafe { vst1q_u32(w.as_mut_ptr(), self.0) };
        out[..LANES].copy_from_slice(&w);
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(vaddq_u32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(vsubq_u32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Self(veorq_u32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Self(vorrq_u32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        unsafe { Self(vbicq_u32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn shl(self, n: u32) -> Self {
        unsafe { Self(vshlq_u32(self.0, vdupq_n_s32(n as i32))) }
    }

    #[inline(always)]
    fn shr(self, n: u32) -> Self {
        unsafe { Self(vshlq_u32(self.0, vdupq_n_s32(-(n as i32)))) }
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Scan with four lanes per group.
///
/// # Safety
/// The CPU must support NEON.
#[target_feature(enable = "neon")]
#[allow(unsafe_code)]
pub unsafe fn scan(
    sig: &PostSignature,
    scoops: &[u8],
    best: BestDeadline,
    first_offset: u64,
) -> BestDeadline {
    scan_lanes::<Neon>(sig, scoops, best, first_offset)
}

/// Deadlines of four consecutive scoops.
///
/// # Panics
/// Panics if `group` is shorter than 256 bytes or `out` than 4 entries.
///
/// # Safety
/// The CPU must support NEON.
#[target_feature(enable = "neon")]
#[allow(unsafe_code)]
pub unsafe fn deadlines(sig: &PostSignature, group: &[u8], out: &mut [u64]) {
    assert!(group.len() >= LANES * SCOOP_SIZE && out.len() >= LANES);
    deadline::deadlines(&sig.broadcast::<Neon>(), group, out);
}

/// Deadlines of up to four scoops; `None` lanes come back as `None`.
///
/// # Safety
/// The CPU must support NEON.
#[target_feature(enable = "neon")]
#[allow(unsafe_code)]
pub unsafe fn deadlines_masked(
    sig: &PostSignature,
    scoops: &[Option<&[u8; SCOOP_SIZE]>],
    out: &mut [Option<u64>],
) {
    deadline::deadlines_masked(&sig.broadcast::<Neon>(), scoops, out);
}

/// Hash four messages at once.
///
/// # Errors
/// See [`MultiShabal::update`](crate::kernels::multi::MultiShabal::update).
///
/// # Safety
/// The CPU must support NEON.
#[target_feature(enable = "neon")]
#[allow(unsafe_code)]
pub unsafe fn hash_lanes(
    inputs: &[Option<&[u8]>],
    out_bits: u32,
) -> Result<LaneDigests, ShabalError> {
    multi::hash_lanes::<Neon>(inputs, out_bits)
}
