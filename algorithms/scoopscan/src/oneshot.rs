//! Public API Layer
//!
use crate::engine::{dispatcher, parallel};
use crate::kernels::constants::{GENSIG_SIZE, HASH_SIZE, SCOOP_SIZE};
use crate::kernels::deadline::PostSignature;
use crate::streaming::{Shabal, Shabal256};
use crate::types::{Backend, BestDeadline, ScanError, ScanFn, ShabalDigest, ShabalError};

// =============================================================================
// HASHING
// =============================================================================

/// Compute the Shabal-256 digest of `input`.
///
/// # Example
/// ```rust
/// let digest = scoopscan::shabal256(b"abc");
/// assert_eq!(digest.len(), 32);
/// ```
#[must_use]
pub fn shabal256(input: &[u8]) -> [u8; HASH_SIZE] {
    let mut h = Shabal256::new();
    h.update(input);
    h.finalize()
}

/// Compute a Shabal digest of `out_bits` bits (multiple of 32, 32..=512).
///
/// # Errors
/// Returns `ShabalError::InvalidOutputSize` for unsupported sizes.
pub fn shabal(input: &[u8], out_bits: u32) -> Result<ShabalDigest, ShabalError> {
    let mut h = Shabal::new(out_bits)?;
    h.update(input);
    Ok(h.finalize())
}

/// Deadline of one scoop via the general streaming engine.
///
/// The first 8 bytes of Shabal-256(`gensig || scoop`), little-endian. This
/// is the reference the fused scan kernels must agree with.
#[must_use]
pub fn deadline(gensig: &[u8; GENSIG_SIZE], scoop: &[u8; SCOOP_SIZE]) -> u64 {
    let mut h = Shabal256::new();
    h.update(gensig);
    h.update(scoop);
    let d = h.finalize();
    u64::from_le_bytes([d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]])
}

// =============================================================================
// SCANNING
// =============================================================================

/// Find the scoop with the smallest deadline.
///
/// `scoops` holds `nonce_count` consecutive 64-byte scoops. Returns the
/// minimum deadline and its index; ties keep the lowest index. With
/// `nonce_count == 0` the result is `BestDeadline::NONE`.
///
/// # Errors
/// `ScanError::LengthMismatch` / `TooManyNonces` if the buffer does not hold
/// exactly `nonce_count` scoops.
///
/// # Example
/// ```rust
/// let scoops = [0u8; 64 * 3];
/// let best = scoopscan::find_best_deadline(&scoops, 3, &[0u8; 32])?;
/// assert_eq!(best.offset, 0);
/// # Ok::<(), scoopscan::ScanError>(())
/// ```
pub fn find_best_deadline(
    scoops: &[u8],
    nonce_count: u64,
    gensig: &[u8; GENSIG_SIZE],
) -> Result<BestDeadline, ScanError> {
    scan_from(scoops, nonce_count, gensig, BestDeadline::NONE)
}

/// Like [`find_best_deadline`], on an explicit backend.
///
/// # Errors
/// As [`find_best_deadline`], plus `ScanError::Cpu` if the backend cannot
/// run on this CPU.
pub fn find_best_deadline_with(
    backend: Backend,
    scoops: &[u8],
    nonce_count: u64,
    gensig: &[u8; GENSIG_SIZE],
) -> Result<BestDeadline, ScanError> {
    scan_from_with(backend, scoops, nonce_count, gensig, BestDeadline::NONE)
}

/// Continue a scan from an existing best result.
///
/// `initial` is replaced only by a strictly smaller deadline.
///
/// # Errors
/// See [`find_best_deadline`].
pub fn scan_from(
    scoops: &[u8],
    nonce_count: u64,
    gensig: &[u8; GENSIG_SIZE],
    initial: BestDeadline,
) -> Result<BestDeadline, ScanError> {
    check_len(scoops, nonce_count)?;
    Ok(run(dispatcher::get_best_kernel(), scoops, gensig, initial))
}

/// [`scan_from`] on an explicit backend.
///
/// # Errors
/// See [`find_best_deadline_with`].
pub fn scan_from_with(
    backend: Backend,
    scoops: &[u8],
    nonce_count: u64,
    gensig: &[u8; GENSIG_SIZE],
    initial: BestDeadline,
) -> Result<BestDeadline, ScanError> {
    check_len(scoops, nonce_count)?;
    let kernel = dispatcher::kernel_for(backend)?;
    Ok(run(kernel, scoops, gensig, initial))
}

/// Find the smallest deadline using all cores.
///
/// Splits the range into chunks scanned in parallel (serially without the
/// `multithread` feature). The result is identical to
/// [`find_best_deadline`].
///
/// # Errors
/// See [`find_best_deadline`].
pub fn find_best_deadline_parallel(
    scoops: &[u8],
    nonce_count: u64,
    gensig: &[u8; GENSIG_SIZE],
) -> Result<BestDeadline, ScanError> {
    check_len(scoops, nonce_count)?;
    let sig = PostSignature::new(gensig);
    Ok(parallel::scan_chunked(
        dispatcher::get_best_kernel(),
        &sig,
        scoops,
        BestDeadline::NONE,
        0,
    ))
}

/// Parallel [`scan_from_with`].
///
/// # Errors
/// See [`find_best_deadline_with`].
pub fn scan_parallel_with(
    backend: Backend,
    scoops: &[u8],
    nonce_count: u64,
    gensig: &[u8; GENSIG_SIZE],
    initial: BestDeadline,
) -> Result<BestDeadline, ScanError> {
    check_len(scoops, nonce_count)?;
    let kernel = dispatcher::kernel_for(backend)?;
    let sig = PostSignature::new(gensig);
    Ok(parallel::scan_chunked(kernel, &sig, scoops, initial, 0))
}

// =============================================================================
// INTERNAL
// =============================================================================

fn check_len(scoops: &[u8], nonce_count: u64) -> Result<(), ScanError> {
    let expected = nonce_count
        .checked_mul(SCOOP_SIZE as u64)
        .filter(|&n| usize::try_from(n).is_ok())
        .ok_or(ScanError::TooManyNonces(nonce_count))?;
    if scoops.len() as u64 != expected {
        return Err(ScanError::LengthMismatch {
            actual: scoops.len(),
            expected,
            nonce_count,
        });
    }
    Ok(())
}

fn run(
    kernel: ScanFn,
    scoops: &[u8],
    gensig: &[u8; GENSIG_SIZE],
    initial: BestDeadline,
) -> BestDeadline {
    if scoops.is_empty() {
        return initial;
    }
    let sig = PostSignature::new(gensig);
    let best = kernel(&sig, scoops, initial, 0);
    #[cfg(feature = "std")]
    tracing::trace!(
        nonces = scoops.len() / SCOOP_SIZE,
        deadline = best.deadline,
        offset = best.offset,
        "scan finished"
    );
    best
}

// =============================================================================
// TESTS
// =============================================================================
