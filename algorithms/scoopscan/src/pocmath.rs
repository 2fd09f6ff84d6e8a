//! Proof-of-Capacity Helpers
//!
//! The small pieces of mining arithmetic around a scan: decoding the
//! generation signature, choosing the scoop for a block height, and turning
//! a raw deadline into seconds.

use crate::kernels::constants::GENSIG_SIZE;
use crate::oneshot::shabal256;
use crate::types::ScanError;

/// Scoops per nonce; `calculate_scoop` returns a value below this.
pub const SCOOPS_PER_NONCE: u32 = 4096;

/// Decode a 64-character hex generation signature.
///
/// # Errors
/// `ScanError::GensigHex` for non-hex input, `ScanError::GensigLength` if
/// it does not decode to exactly 32 bytes.
pub fn decode_gensig(hex_str: &str) -> Result<[u8; GENSIG_SIZE], ScanError> {
    let trimmed = hex_str.trim();
    if trimmed.len() != GENSIG_SIZE * 2 && trimmed.len().is_multiple_of(2) {
        return Err(ScanError::GensigLength(trimmed.len() / 2));
    }
    let mut out = [0u8; GENSIG_SIZE];
    hex::decode_to_slice(trimmed, &mut out).map_err(ScanError::GensigHex)?;
    Ok(out)
}

/// Scoop number mined at `height` for `gensig`.
///
/// Shabal-256 of `gensig || height` (big-endian), reduced to the low 12 bits
/// of the last two digest bytes.
#[must_use]
pub fn calculate_scoop(height: u64, gensig: &[u8; GENSIG_SIZE]) -> u32 {
    let mut msg = [0u8; GENSIG_SIZE + 8];
    msg[..GENSIG_SIZE].copy_from_slice(gensig);
    msg[GENSIG_SIZE..].copy_from_slice(&height.to_be_bytes());
    let d = shabal256(&msg);
    (u32::from(d[30] & 0x0F) << 8) | u32::from(d[31])
}

/// Scale a raw deadline by the network base target.
///
/// # Errors
/// `ScanError::ZeroBaseTarget` if `base_target` is 0.
pub const fn scale_deadline(raw: u64, base_target: u64) -> Result<u64, ScanError> {
    if base_target == 0 {
        return Err(ScanError::ZeroBaseTarget);
    }
    Ok(raw / base_target)
}

// =============================================================================
// TESTS
// =============================================================================
