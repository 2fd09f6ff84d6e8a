#![cfg_attr(not(feature = "std"), no_std)]

//! # scoopscan
//!
//! Shabal-256 and a proof-of-capacity deadline scanner.
//! Lane-parallel on SSE2, AVX2, AVX-512F and NEON, with a scalar fallback.

//! # Usage
//! ```rust
//! // 1. Plain hashing
//! let digest = scoopscan::shabal256(b"Performance Matters");
//! assert_eq!(digest.len(), 32);
//!
//! // 2. Scanning: smallest deadline over a batch of 64-byte scoops
//! let gensig = [7u8; 32];
//! let scoops = vec![0u8; 64 * 100];
//! let best = scoopscan::find_best_deadline(&scoops, 100, &gensig)?;
//! assert_eq!(best.deadline, scoopscan::deadline(&gensig, &[0u8; 64]));
//!
//! // 3. Streaming (arbitrary output size)
//! let mut hasher = scoopscan::Shabal::new(512)?;
//! hasher.update(b"Chunk 1");
//! hasher.update(b"Chunk 2");
//! assert_eq!(hasher.finalize().len(), 64);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

#[cfg(not(feature = "std"))]
extern crate alloc;

mod engine;
// Backends and generic kernels are public for tests and benchmarks, but
// hidden from the docs.
#[doc(hidden)]
pub mod kernels;
mod oneshot;
pub mod pocmath;
mod streaming;
pub(crate) mod types;

// =============================================================================
// EXPORTS
// =============================================================================

#[cfg(feature = "digest-trait")]
pub use digest;
pub use engine::{get_active_backend, kernel_for};
pub use kernels::deadline::PostSignature;
pub use kernels::multi::{LaneDigests, MultiShabal};
pub use oneshot::{
    deadline, find_best_deadline, find_best_deadline_parallel, find_best_deadline_with, scan_from,
    scan_from_with, scan_parallel_with, shabal, shabal256,
};
pub use pocmath::{calculate_scoop, decode_gensig, scale_deadline};
pub use streaming::{Shabal, Shabal256};
pub use types::{
    Backend, BestDeadline, CpuFeatureError, ScanError, ScanFn, ShabalDigest, ShabalError,
};

/// Returns the name of the scan backend currently in use.
#[must_use]
pub fn active_backend() -> &'static str {
    engine::get_active_backend().name()
}
