//! Shared types used across the scoopscan library.

use core::fmt;

use crate::kernels::constants::{MAX_HASH_SIZE, MAX_LANES};
use crate::kernels::deadline::PostSignature;

// =============================================================================
// KERNEL INTERFACE
// =============================================================================

/// Unified scan kernel signature: `(snapshot, scoops, best, first_offset) -> best`.
///
/// `scoops` is a whole number of 64-byte scoops; the scoop at byte
/// `64 * i` gets offset `first_offset + i`. Every backend exposes this same
/// signature so the dispatcher can swap them at runtime.
pub type ScanFn = fn(&PostSignature, &[u8], BestDeadline, u64) -> BestDeadline;

// =============================================================================
// SCAN RESULT
// =============================================================================

/// Running minimum of a scan: the smallest deadline seen and its offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BestDeadline {
    /// Smallest deadline seen so far.
    pub deadline: u64,
    /// Offset (nonce index) that produced `deadline`.
    pub offset: u64,
}

impl BestDeadline {
    /// Starting value of a fresh scan: deadline `u64::MAX`, offset 0.
    pub const NONE: Self = Self {
        deadline: u64::MAX,
        offset: 0,
    };

    /// Create a result from a known deadline and offset.
    #[must_use]
    pub const fn new(deadline: u64, offset: u64) -> Self {
        Self { deadline, offset }
    }

    /// Record `deadline` at `offset` if it is strictly smaller.
    ///
    /// Returns `true` when the minimum changed. Equal deadlines keep the
    /// earlier offset.
    #[inline(always)]
    pub fn update(&mut self, deadline: u64, offset: u64) -> bool {
        if deadline < self.deadline {
            self.deadline = deadline;
            self.offset = offset;
            true
        } else {
            false
        }
    }

    /// Combine two partial results over disjoint ranges.
    ///
    /// Lexicographic minimum on `(deadline, offset)`, so the merge order of
    /// parallel chunks cannot change the answer.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        if (other.deadline, other.offset) < (self.deadline, self.offset) {
            other
        } else {
            self
        }
    }

    /// `true` once any deadline below `u64::MAX` has been recorded.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.deadline != u64::MAX
    }
}

impl Default for BestDeadline {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for BestDeadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deadline {} at offset {}", self.deadline, self.offset)
    }
}

// =============================================================================
// BACKENDS
// =============================================================================

/// Lane backend used by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Scalar reference engine, one lane.
    Portable,
    /// 4 lanes in 128-bit SSE2 registers.
    Sse2,
    /// 8 lanes in 256-bit AVX2 registers.
    Avx2,
    /// 16 lanes in 512-bit AVX-512F registers.
    Avx512f,
    /// 4 lanes in 128-bit NEON registers.
    Neon,
}

impl Backend {
    /// Every backend, widest first within each architecture.
    pub const ALL: [Self; 5] = [
        Self::Avx512f,
        Self::Avx2,
        Self::Sse2,
        Self::Neon,
        Self::Portable,
    ];

    /// Number of nonces hashed per kernel call.
    #[must_use]
    pub const fn lanes(self) -> usize {
        match self {
            Self::Portable => 1,
            Self::Sse2 | Self::Neon => 4,
            Self::Avx2 => 8,
            Self::Avx512f => MAX_LANES,
        }
    }

    /// Human-readable name, also accepted by [`Backend::from_name`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Portable => "portable",
            Self::Sse2 => "sse2",
            Self::Avx2 => "avx2",
            Self::Avx512f => "avx512f",
            Self::Neon => "neon",
        }
    }

    /// Parse a backend name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// CPU feature the backend needs, if any.
    #[must_use]
    pub const fn required_feature(self) -> Option<&'static str> {
        match self {
            Self::Portable => None,
            Self::Sse2 => Some("sse2"),
            Self::Avx2 => Some("avx2"),
            Self::Avx512f => Some("avx512f"),
            Self::Neon => Some("neon"),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// DIGESTS
// =============================================================================

/// A Shabal digest of 4 to 64 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShabalDigest {
    bytes: [u8; MAX_HASH_SIZE],
    len: usize,
}

impl ShabalDigest {
    pub(crate) const fn from_parts(bytes: [u8; MAX_HASH_SIZE], len: usize) -> Self {
        Self { bytes, len }
    }

    /// Digest length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: the smallest Shabal output is 4 bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl AsRef<[u8]> for ShabalDigest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for ShabalDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShabalDigest(")?;
        fmt::LowerHex::fmt(self, f)?;
        write!(f, ")")
    }
}

impl fmt::LowerHex for ShabalDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.as_bytes() {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Error for unsupported CPU features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("CPU feature '{missing}' required by the {backend} backend")]
pub struct CpuFeatureError {
    missing: &'static str,
    backend: Backend,
}

impl CpuFeatureError {
    /// Create a new `CpuFeatureError` for `backend` missing `missing`.
    #[must_use]
    pub const fn new(missing: &'static str, backend: Backend) -> Self {
        Self { missing, backend }
    }

    /// Name of the missing CPU feature.
    #[must_use]
    pub const fn missing(&self) -> &'static str {
        self.missing
    }

    /// Backend that could not be used.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        self.backend
    }
}

/// Errors rejected before any scoop is hashed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    /// `scoops.len()` is not `64 * nonce_count`.
    #[error("scoop buffer holds {actual} bytes, expected {expected} for {nonce_count} nonces")]
    LengthMismatch {
        /// Bytes supplied.
        actual: usize,
        /// Bytes required by `nonce_count`.
        expected: u64,
        /// Requested nonce count.
        nonce_count: u64,
    },
    /// `64 * nonce_count` does not fit in memory addresses.
    #[error("nonce count {0} exceeds the addressable scoop range")]
    TooManyNonces(u64),
    /// The requested backend cannot run on this CPU.
    #[error(transparent)]
    Cpu(#[from] CpuFeatureError),
    /// Generation signature is not valid hex.
    #[error("invalid generation signature hex: {0}")]
    GensigHex(hex::FromHexError),
    /// Generation signature decoded to the wrong number of bytes.
    #[error("generation signature must be 32 bytes, got {0}")]
    GensigLength(usize),
    /// A base target of zero cannot scale a deadline.
    #[error("base target must be non-zero")]
    ZeroBaseTarget,
}

/// Errors from the general-purpose Shabal engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShabalError {
    /// Output size is not a multiple of 32 in `32..=512`.
    #[error("output size {0} bits is not a multiple of 32 in 32..=512")]
    InvalidOutputSize(u32),
    /// Wrong number of lane inputs for the engine's width.
    #[error("expected {expected} lane inputs, got {actual}")]
    LaneCount {
        /// Lanes of the engine.
        expected: usize,
        /// Inputs supplied.
        actual: usize,
    },
    /// Active lanes were given inputs of different lengths.
    #[error("active lane inputs differ in length")]
    UnevenLanes,
}

/// Validate a Shabal output size and return it in bytes.
pub(crate) const fn output_bytes(out_bits: u32) -> Result<usize, ShabalError> {
    if out_bits < 32 || out_bits > 512 || !out_bits.is_multiple_of(32) {
        return Err(ShabalError::InvalidOutputSize(out_bits));
    }
    Ok(out_bits as usize / 8)
}

// =============================================================================
// TESTS
// =============================================================================
