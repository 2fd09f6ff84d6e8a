//! Hardware Dispatcher
//!
//! Selects the widest scan kernel the current CPU supports (AVX-512F, AVX2,
//! SSE2, NEON, or portable) and wraps the `unsafe` backend entry points in
//! safe function pointers.

use crate::kernels::{self, deadline::PostSignature};
use crate::types::{Backend, BestDeadline, CpuFeatureError, ScanFn};

/// Nonces per parallel task: 16 Ki scoops, 1 MiB of scoop data.
pub const CHUNK_NONCES: usize = 16 * 1024;

// =============================================================================
// DETECTION
// =============================================================================

impl Backend {
    /// Whether this backend can run on the current CPU.
    ///
    /// With `std` this is a runtime CPUID check; without it, only features
    /// enabled at compile time count.
    #[must_use]
    pub fn is_supported(self) -> bool {
        match self {
            Self::Portable => true,
            Self::Sse2 => x86_feature("sse2"),
            Self::Avx2 => x86_feature("avx2"),
            Self::Avx512f => x86_feature("avx512f"),
            Self::Neon => cfg!(target_arch = "aarch64") && neon_available(),
        }
    }
}

#[allow(unused_variables)]
fn x86_feature(name: &str) -> bool {
    #[cfg(all(feature = "std", any(target_arch = "x86", target_arch = "x86_64")))]
    {
        match name {
            "sse2" => is_x86_feature_detected!("sse2"),
            "avx2" => is_x86_feature_detected!("avx2"),
            "avx512f" => is_x86_feature_detected!("avx512f"),
            _ => false,
        }
    }
    #[cfg(all(not(feature = "std"), any(target_arch = "x86", target_arch = "x86_64")))]
    {
        match name {
            "sse2" => cfg!(target_feature = "sse2"),
            "avx2" => cfg!(target_feature = "avx2"),
            "avx512f" => cfg!(target_feature = "avx512f"),
            _ => false,
        }
    }
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    {
        false
    }
}

fn neon_available() -> bool {
    #[cfg(all(feature = "std", target_arch = "aarch64"))]
    {
        std::arch::is_aarch64_feature_detected!("neon")
    }
    #[cfg(all(not(feature = "std"), target_arch = "aarch64"))]
    {
        cfg!(target_feature = "neon")
    }
    #[cfg(not(target_arch = "aarch64"))]
    {
        false
    }
}

// =============================================================================
// DISPATCHER
// =============================================================================

/// Returns the widest backend supported by this CPU.
#[must_use]
pub fn get_active_backend() -> Backend {
    let backend = Backend::ALL
        .into_iter()
        .find(|b| b.is_supported())
        .unwrap_or(Backend::Portable);
    #[cfg(feature = "std")]
    tracing::debug!(backend = backend.name(), lanes = backend.lanes(), "selected scan backend");
    backend
}

/// Returns the fastest scan kernel for this CPU.
#[must_use]
pub fn get_best_kernel() -> ScanFn {
    // The active backend is always supported; fall back to scalar regardless.
    kernel_for(get_active_backend()).unwrap_or(kernels::portable::scan)
}

/// Returns the scan kernel for an explicit backend.
///
/// # Errors
/// Returns `CpuFeatureError` if the CPU (or target) lacks the backend's
/// instruction set.
pub fn kernel_for(backend: Backend) -> Result<ScanFn, CpuFeatureError> {
    if !backend.is_supported() {
        let missing = backend.required_feature().unwrap_or("unknown");
        return Err(CpuFeatureError::new(missing, backend));
    }
    Ok(match backend {
        Backend::Portable => kernels::portable::scan,
        Backend::Sse2 => safe_sse2_wrapper,
        Backend::Avx2 => safe_avx2_wrapper,
        Backend::Avx512f => safe_avx512f_wrapper,
        Backend::Neon => safe_neon_wrapper,
    })
}

// =============================================================================
// WRAPPERS
// =============================================================================

/// SSE2 wrapper (4 lanes).
#[inline]
#[allow(unsafe_code)]
#[allow(unused_variables)]
fn safe_sse2_wrapper(
    sig: &PostSignature,
    scoops: &[u8],
    best: BestDeadline,
    first_offset: u64,
) -> BestDeadline {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    // SAFETY: Only handed out by `kernel_for` after `is_supported` confirmed SSE2.
    unsafe {
        kernels::sse2::scan(sig, scoops, best, first_offset)
    }
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    unreachable!("CPUID escape");
}

/// AVX2 wrapper (8 lanes).
#[inline]
#[allow(unsafe_code)]
#[allow(unused_variables)]
fn safe_avx2_wrapper(
    sig: &PostSignature,
    scoops: &[u8],
    best: BestDeadline,
    first_offset: u64,
) -> BestDeadline {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    // SAFETY: Only handed out by `kernel_for` after `is_supported` confirmed AVX2.
    unsafe {
        kernels::avx2::scan(sig, scoops, best, first_offset)
    }
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    unreachable!("CPUID escape");
}

/// AVX-512F wrapper (16 lanes).
#[inline]
#[allow(unsafe_code)]
#[allow(unused_variables)]
fn safe_avx512f_wrapper(
    sig: &PostSignature,
    scoops: &[u8],
    best: BestDeadline,
    first_offset: u64,
) -> BestDeadline {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    // SAFETY: Only handed out by `kernel_for` after `is_supported` confirmed AVX-512F.
    unsafe {
        kernels::avx512f::scan(sig, scoops, best, first_offset)
    }
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    unreachable!("CPUID escape");
}

/// NEON wrapper (4 lanes).
#[inline]
#[allow(unsafe_code)]
#[allow(unused_variables)]
fn safe_neon_wrapper(
    sig: &PostSignature,
    scoops: &[u8],
    best: BestDeadline,
    first_offset: u64,
) -> BestDeadline {
    #[cfg(target_arch = "aarch64")]
    // SAFETY: Only handed out by `kernel_for` after `is_supported` confirmed NEON.
    unsafe {
        kernels::neon::scan(sig, scoops, best, first_offset)
    }
    #[cfg(not(target_arch = "aarch64"))]
    unreachable!("CPUID escape");
}

// =============================================================================
// TESTS
// =============================================================================
