//! AVX2 Kernel Module
//!
//! Eight lanes in `__m256i`. The shift count travels in the low quadword of
//! an `__m128i`, as for SSE2.

#![allow(clippy::cast_possible_wrap)]

#[cfg(target_arch = "x86")]
use core::arch::x86::{
    __m256i, _mm256_add_epi32, _mm256_andnot_si256, _mm256_loadu_si256, _mm256_or_si256,
    _mm256_set1_epi32, _mm256_sll_epi32, _mm256_srl_epi32, _mm256_storeu_si256,
    _mm256_sub_epi32, _mm256_xor_si256, _mm_cvtsi32_si128,
};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    __m256i, _mm256_add_epi32, _mm256_andnot_si256, _mm256_loadu_si256, _mm256_or_si256,
    _mm256_set1_epi32, _mm256_sll_epi32, _mm256_srl_epi32, _mm256_storeu_si256,
    _mm256_sub_epi32, _mm256_xor_si256, _mm_cvtsi32_si128,
};

use crate::kernels::constants::SCOOP_SIZE;
use crate::kernels::deadline::{self, PostSignature};
use crate::kernels::multi::{self, LaneDigests};
use crate::kernels::scan::scan_lanes;
use crate::kernels::vector::ShabalVector;
use crate::types::{BestDeadline, ShabalError};

/// Lanes per register.
pub const LANES: usize = 8;

// =============================================================================
// VECTOR
// =============================================================================

/// Eight `u32` lanes. Only constructed inside the `avx2` entry points below.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Avx2(__m256i);

// SAFETY: every method is only reached from the `#[target_feature(enable = "avx2")]`
// entry points of this module, which the dispatcher calls after CPUID validation.
// Loads and stores go through stack arrays of exactly eight words.
#[allow(unsafe_code)]
impl ShabalVector for Avx2 {
    const LANES: usize = LANES;

    #[inline(always)]
    fn splat(x: u32) -> Self {
        unsafe { Self(_mm256_set1_epi32(x as i32)) }
    }

    #[inline(always)]
    fn gather(words: &[u32]) -> Self {
        let w: [u32; LANES] = core::array::from_fn(|i| words[i]);
        unsafe { Self(_mm256_loadu_si256(w.as_ptr().cast())) }
    }

    #[inline(always)]
    fn scatter(self, out: &mut [u32]) {
        let mut w = [0u32; LANES];
        unsafe { _mm256_storeu_si256(w.as_mut_ptr().cast(), self.0) };
        out[..LANES].copy_from_slice(&w);
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_add_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_sub_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_xor_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_or_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_andnot_si256(rhs.0, self.0)) }
    }

    #[inline(always)]
    fn shl(self, n: u32) -> Self {
        unsafe { Self(_mm256_sll_epi32(self.0, _mm_cvtsi32_si128(n as i32))) }
    }

    #[inline(always)]
    fn shr(self, n: u32) -> Self {
        unsafe { Self(_mm256_srl_epi32(self.0, _mm_cvtsi32_si128(n as i32))) }
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Scan with eight lanes per group.
///
/// # Safety
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
pub unsafe fn scan(
    sig: &PostSignature,
    scoops: &[u8],
    best: BestDeadline,
    first_offset: u64,
) -> BestDeadline {
    scan_lanes::<Avx2>(sig, scoops, best, first_offset)
}

/// Deadlines of eight consecutive scoops.
///
/// # Panics
/// Panics if `group` is shorter than 512 bytes or `out` than 8 entries.
///
/// # Safety
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
pub unsafe fn deadlines(sig: &PostSignature, group: &[u8], out: &mut [u64]) {
    assert!(group.len() >= LANES * SCOOP_SIZE && out.len() >= LANES);
    deadline::deadlines(&sig.broadcast::<Avx2>(), group, out);
}

/// Deadlines of up to eight scoops; `None` lanes come back as `None`.
///
/// # Safety
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
pub unsafe fn deadlines_masked(
    sig: &PostSignature,
    scoops: &[Option<&[u8; SCOOP_SIZE]>],
    out: &mut [Option<u64>],
) {
    deadline::deadlines_masked(&sig.broadcast::<Avx2>(), scoops, out);
}

/// Hash eight messages at once.
///
/// # Errors
/// See [`MultiShabal::update`](crate::kernels::multi::MultiShabal::update).
///
/// # Safety
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
pub unsafe fn hash_lanes(
    inputs: &[Option<&[u8]>],
    out_bits: u32,
) -> Result<LaneDigests, ShabalError> {
    multi::hash_lanes::<Avx2>(inputs, out_bits)
}
