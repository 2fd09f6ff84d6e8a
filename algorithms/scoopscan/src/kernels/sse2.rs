//! SSE2 Kernel Module
//!
//! Four lanes in `__m128i`. Rotations use the variable-count shift pair
//! `_mm_sll_epi32` / `_mm_srl_epi32`.

#![allow(clippy::cast_possible_wrap)]

#[cfg(target_arch = "x86")]
use core::arch::x86::{
    __m128i, _mm_add_epi32, _mm_andnot_si128, _mm_cvtsi32_si128, _mm_loadu_si128, _mm_or_si128,
    _mm_set1_epi32, _mm_sll_epi32, _mm_srl_epi32, _mm_storeu_si128, _mm_sub_epi32, _mm_xor_si128,
};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    __m128i, _mm_add_epi32, _mm_andnot_si128, _mm_cvtsi32_si128, _mm_loadu_si128, _mm_or_si128,
    _mm_set1_epi32, _mm_sll_epi32, _mm_srl_epi32, _mm_storeu_si128, _mm_sub_epi32, _mm_xor_si128,
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

/// Four `u32` lanes. Only constructed inside the `sse2` entry points below.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Sse2(__m128i);

// SAFETY: every method is only reached from the `#[target_feature(enable = "sse2")]`
// entry points of this module, which the dispatcher calls after CPUID validation.
// Loads and stores go through stack arrays of exactly four words.
#[allow(unsafe_code, unused_unsafe)]
impl ShabalVector for Sse2 {
    const LANES: usize = LANES;

    #[inline(always)]
    fn splat(x: u32) -> Self {
        unsafe { Self(_mm_set1_epi32(x as i32)) }
    }

    #[inline(always)]
    fn gather(words: &[u32]) -> Self {
        let w = [words[0], words[1], words[2], words[3]];
        unsafe { Self(_mm_loadu_si128(w.as_ptr().cast())) }
    }

    #[inline(always)]
    fn scatter(self, out: &mut [u32]) {
        let mut w = [0u32; LANES];
        unsafe { _mm_storeu_si128(w.as_mut_ptr().cast(), self.0) };
        out[..LANES].copy_from_slice(&w);
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm_add_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm_sub_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Self(_mm_xor_si128(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Self(_mm_or_si128(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        unsafe { Self(_mm_andnot_si128(rhs.0, self.0)) }
    }

    #[inline(always)]
    fn shl(self, n: u32) -> Self {
        unsafe { Self(_mm_sll_epi32(self.0, _mm_cvtsi32_si128(n as i32))) }
    }

    #[inline(always)]
    fn shr(self, n: u32) -> Self {
        unsafe { Self(_mm_srl_epi32(self.0, _mm_cvtsi32_si128(n as i32))) }
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Scan with four lanes per group.
///
/// # Safety
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
pub unsafe fn scan(
    sig: &PostSignature,
    scoops: &[u8],
    best: BestDeadline,
    first_offset: u64,
) -> BestDeadline {
    scan_lanes::<Sse2>(sig, scoops, best, first_offset)
}

/// Deadlines of four consecutive scoops.
///
/// # Panics
/// Panics if `group` is shorter than 256 bytes or `out` than 4 entries.
///
/// # Safety
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
pub unsafe fn deadlines(sig: &PostSignature, group: &[u8], out: &mut [u64]) {
    assert!(group.len() >= LANES * SCOOP_SIZE && out.len() >= LANES);
    deadline::deadlines(&sig.broadcast::<Sse2>(), group, out);
}

/// Deadlines of up to four scoops; `None` lanes come back as `None`.
///
/// # Safety
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
pub unsafe fn deadlines_masked(
    sig: &PostSignature,
    scoops: &[Option<&[u8; SCOOP_SIZE]>],
    out: &mut [Option<u64>],
) {
    deadline::deadlines_masked(&sig.broadcast::<Sse2>(), scoops, out);
}

/// Hash four messages at once.
///
/// # Errors
/// See [`MultiShabal::update`](crate::kernels::multi::MultiShabal::update).
///
/// # Safety
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
pub unsafe fn hash_lanes(
    inputs: &[Option<&[u8]>],
    out_bits: u32,
) -> Result<LaneDigests, ShabalError> {
    multi::hash_lanes::<Sse2>(inputs, out_bits)
}
