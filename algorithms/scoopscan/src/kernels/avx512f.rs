//! AVX-512F Kernel Module
//!
//! Sixteen lanes in `__m512i`. Rotations use the native `vprolvd`.

#![allow(clippy::cast_possible_wrap)]

#[cfg(target_arch = "x86")]
use core::arch::x86::{
    __m512i, _mm512_add_epi32, _mm512_andnot_si512, _mm512_loadu_si512, _mm512_or_si512,
    _mm512_rolv_epi32, _mm512_set1_epi32, _mm512_sll_epi32, _mm512_srl_epi32,
    _mm512_storeu_si512, _mm512_sub_epi32, _mm512_xor_si512, _mm_cvtsi32_si128,
};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    __m512i, _mm512_add_epi32, _mm512_andnot_si512, _mm512_loadu_si512, _mm512_or_si512,
    _mm512_rolv_epi32, _mm512_set1_epi32, _mm512_sll_epi32, _mm512_srl_epi32,
    _mm512_storeu_si512, _mm512_sub_epi32, _mm512_xor_si512, _mm_cvtsi32_si128,
};

use crate::kernels::constants::{MAX_LANES, SCOOP_SIZE};
use crate::kernels::deadline::{self, PostSignature};
use crate::kernels::multi::{self, LaneDigests};
use crate::kernels::scan::scan_lanes;
use crate::kernels::vector::ShabalVector;
use crate::types::{BestDeadline, ShabalError};

/// Lanes per register.
pub const LANES: usize = MAX_LANES;

// =============================================================================
// VECTOR
// =============================================================================

/// Sixteen `u32` lanes. Only constructed inside the `avx512f` entry points below.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Avx512f(__m512i);

// SAFETY: every method is only reached from the `#[target_feature(enable = "avx512f")]`
// entry points of this module, which the dispatcher calls after CPUID validation.
// Loads and stores go through stack arrays of exactly sixteen words.
#[allow(unsafe_code)]
impl ShabalVector for Avx512f {
    const LANES: usize = LANES;

    #[inline(always)]
    fn splat(x: u32) -> Self {
        unsafe { Self(_mm512_set1_epi32(x as i32)) }
    }

    #[inline(always)]
    fn gather(words: &[u32]) -> Self {
        let w: [u32; LANES] = core::array::from_fn(|i| words[i]);
        unsafe { Self(_mm512_loadu_si512(w.as_ptr().cast())) }
    }

    #[inline(always)]
    fn scatter(self, out: &mut [u32]) {
        let mut w = [0u32; LANES];
        unsafe { _mm512_storeu_si512(w.as_mut_ptr().cast(), self.0) };
        out[..LANES].copy_from_slice(&w);
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm512_add_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm512_sub_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Self(_mm512_xor_si512(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Self(_mm512_or_si512(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        unsafe { Self(_mm512_andnot_si512(rhs.0, self.0)) }
    }

    #[inline(always)]
    fn shl(self, n: u32) -> Self {
        unsafe { Self(_mm512_sll_epi32(self.0, _mm_cvtsi32_si128(n as i32))) }
    }

    #[inline(always)]
    fn shr(self, n: u32) -> Self {
        unsafe { Self(_mm512_srl_epi32(self.0, _mm_cvtsi32_si128(n as i32))) }
    }

    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        unsafe { Self(_mm512_rolv_epi32(self.0, _mm512_set1_epi32(n as i32))) }
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Scan with sixteen lanes per group.
///
/// # Safety
/// The CPU must support AVX-512F.
#[target_feature(enable = "avx512f")]
#[allow(unsafe_code)]
pub unsafe fn scan(
    sig: &PostSignature,
    scoops: &[u8],
    best: BestDeadline,
    first_offset: u64,
) -> BestDeadline {
    scan_lanes::<Avx512f>(sig, scoops, best, first_offset)
}

/// Deadlines of sixteen consecutive scoops.
///
/// # Panics
/// Panics if `group` is shorter than 1024 bytes or `out` than 16 entries.
///
/// # Safety
/// The CPU must support AVX-512F.
#[target_feature(enable = "avx512f")]
#[allow(unsafe_code)]
pub unsafe fn deadlines(sig: &PostSignature, group: &[u8], out: &mut [u64]) {
    assert!(group.len() >= LANES * SCOOP_SIZE && out.len() >= LANES);
    deadline::deadlines(&sig.broadcast::<Avx512f>(), group, out);
}

/// Deadlines of up to sixteen scoops; `None` lanes come back as `None`.
///
/// # Safety
/// The CPU must support AVX-512F.
#[target_feature(enable = "avx512f")]
#[allow(unsafe_code)]
pub unsafe fn deadlines_masked(
    sig: &PostSignature,
    scoops: &[Option<&[u8; SCOOP_SIZE]>],
    out: &mut [Option<u64>],
) {
    deadline::deadlines_masked(&sig.broadcast::<Avx512f>(), scoops, out);
}

/// Hash sixteen messages at once.
///
/// # Errors
/// See [`MultiShabal::update`](crate::kernels::multi::MultiShabal::update).
///
/// # Safety
/// The CPU must support AVX-512F.
#[target_feature(enable = "avx512f")]
#[allow(unsafe_code)]
pub unsafe fn hash_lanes(
    inputs: &[Option<&[u8]>],
    out_bits: u32,
) -> Result<LaneDigests, ShabalError> {
    multi::hash_lanes::<Avx512f>(inputs, out_bits)
}
