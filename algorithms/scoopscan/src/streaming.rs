//! Streaming Hasher
//!
//! The scalar Shabal engine: buffers input to 64-byte blocks, absorbs them
//! one at a time and closes with the `0x80` terminator. This is the
//! reference path every lane-parallel kernel is checked against.

use crate::kernels::constants::{BLOCK_SIZE, BLOCK_WORDS, HASH_SIZE, MAX_HASH_SIZE, TERMINATOR};
use crate::kernels::shabal::LaneState;
use crate::kernels::vector::load_words;
use crate::types::{output_bytes, ShabalDigest, ShabalError};

#[cfg(feature = "digest-trait")]
use digest::consts::U32;
#[cfg(feature = "digest-trait")]
use digest::{FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update};

// =============================================================================
// GENERIC OUTPUT SIZE
// =============================================================================

/// Streaming Shabal hasher with a runtime output size (32..=512 bits).
#[derive(Clone, Debug)]
pub struct Shabal {
    state: LaneState,
    iv: LaneState,
    buf: [u8; BLOCK_SIZE],
    ptr: usize,
    out_len: usize,
}

impl Shabal {
    /// Create a hasher producing `out_bits` bits.
    ///
    /// # Errors
    /// Returns `ShabalError::InvalidOutputSize` unless `out_bits` is a
    /// multiple of 32 in `32..=512`.
    pub fn new(out_bits: u32) -> Result<Self, ShabalError> {
        let out_len = output_bytes(out_bits)?;
        let iv = if out_bits == 256 {
            LaneState::shabal256()
        } else {
            LaneState::with_output_bits(out_bits)
        };
        Ok(Self {
            state: iv,
            iv,
            buf: [0u8; BLOCK_SIZE],
            ptr: 0,
            out_len,
        })
    }

    /// Digest length in bytes.
    #[must_use]
    pub const fn output_len(&self) -> usize {
        self.out_len
    }

    /// Blocks absorbed so far, not counting the IV prefix.
    #[must_use]
    pub fn blocks_absorbed(&self) -> u64 {
        self.state.counter() - self.iv.counter()
    }

    /// Add data to the hasher.
    pub fn update(&mut self, mut data: &[u8]) {
        if self.ptr > 0 {
            let take = (BLOCK_SIZE - self.ptr).min(data.len());
            self.buf[self.ptr..self.ptr + take].copy_from_slice(&data[..take]);
            self.ptr += take;
            data = &data[take..];
            if self.ptr < BLOCK_SIZE {
                return;
            }
            let block = self.buf;
            self.absorb_bytes(&block);
            self.ptr = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            self.absorb_bytes(block);
        }
        let rest = blocks.remainder();
        self.buf[..rest.len()].copy_from_slice(rest);
        self.ptr = rest.len();
    }

    /// Finalize and return the digest.
    #[must_use]
    pub fn finalize(self) -> ShabalDigest {
        self.finalize_bits(0, 0)
    }

    /// Finalize with `n` extra message bits (`n < 8`) taken from the top of
    /// `ub`, for messages whose length is not a whole number of bytes.
    #[must_use]
    pub fn finalize_bits(mut self, ub: u8, n: u32) -> ShabalDigest {
        self.close_into(ub, n)
    }

    /// Reset to the IV, keeping the output size.
    pub fn reset(&mut self) {
        self.state = self.iv;
        self.buf = [0u8; BLOCK_SIZE];
        self.ptr = 0;
    }

    fn absorb_bytes(&mut self, block: &[u8]) {
        let m: [u32; BLOCK_WORDS] = load_words(|_| Some(block));
        self.state.absorb(&m);
    }

    fn close_into(&mut self, ub: u8, n: u32) -> ShabalDigest {
        let z = TERMINATOR >> (n & 7);
        self.buf[self.ptr] = (ub & z.wrapping_neg()) | z;
        self.buf[self.ptr + 1..].fill(0);
        let m: [u32; BLOCK_WORDS] = load_words(|_| Some(&self.buf[..]));
        self.state.close(&m);

        let mut words = [0u8; MAX_HASH_SIZE];
        for (chunk, w) in words.chunks_exact_mut(4).zip(self.state.b()) {
            chunk.copy_from_slice(&w.to_le_bytes());
        }
        let mut bytes = [0u8; MAX_HASH_SIZE];
        bytes[..self.out_len].copy_from_slice(&words[MAX_HASH_SIZE - self.out_len..]);
        ShabalDigest::from_parts(bytes, self.out_len)
    }
}

// =============================================================================
// SHABAL-256
// =============================================================================

/// Streaming Shabal-256 hasher.
#[derive(Clone, Debug)]
pub struct Shabal256 {
    inner: Shabal,
}

impl Shabal256 {
    /// Create a new Shabal-256 hasher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Shabal {
                state: LaneState::shabal256(),
                iv: LaneState::shabal256(),
                buf: [0u8; BLOCK_SIZE],
                ptr: 0,
                out_len: HASH_SIZE,
            },
        }
    }

    /// Add data to the hasher.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalize and return the 32-byte digest.
    #[must_use]
    pub fn finalize(mut self) -> [u8; HASH_SIZE] {
        self.finalize_mut()
    }

    /// Reset hasher for reuse.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    fn finalize_mut(&mut self) -> [u8; HASH_SIZE] {
        let digest = self.inner.close_into(0, 0);
        let mut out = [0u8; HASH_SIZE];
        out.copy_from_slice(digest.as_bytes());
        out
    }
}

// =============================================================================
// TRAIT IMPL
// =============================================================================

impl Default for Shabal256 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "digest-trait")]
impl OutputSizeUser for Shabal256 {
    type OutputSize = U32;
}

#[cfg(feature = "digest-trait")]
impl Update for Shabal256 {
    fn update(&mut self, data: &[u8]) {
        self.update(data);
    }
}

#[cfg(feature = "digest-trait")]
impl FixedOutput for Shabal256 {
    fn finalize_into(mut self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.finalize_mut());
    }
}

#[cfg(feature = "digest-trait")]
impl FixedOutputReset for Shabal256 {
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.finalize_mut());
        self.reset();
    }
}

#[cfg(feature = "digest-trait")]
impl Reset for Shabal256 {
    fn reset(&mut self) {
        self.reset();
    }
}

#[cfg(feature = "digest-trait")]
impl HashMarker for Shabal256 {}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_counter_tracks_whole_blocks() {
        let mut h = Shabal256::new();
        h.update(&[0u8; 63]);
        assert_eq!(h.inner.blocks_absorbed(), 0);
        h.update(&[0u8; 1]);
        assert_eq!(h.inner.blocks_absorbed(), 1);
        h.update(&[0u8; 130]);
        assert_eq!(h.inner.blocks_absorbed(), 3);
        assert_eq!(h.inner.ptr, 2);
    }

    #[test]
    fn split_updates_match_single_update() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let mut whole = Shabal256::new();
        whole.update(&data);
        let expected = whole.finalize();
        for split in [0, 1, 63, 64, 65, 500, 999, 1000] {
            let mut h = Shabal256::new();
            h.update(&data[..split]);
            h.update(&data[split..]);
            assert_eq!(h.finalize(), expected, "split at {split}");
        }
    }

    #[test]
    fn generic_256_matches_fixed() {
        let mut a = Shabal::new(256).unwrap();
        let mut b = Shabal256::new();
        a.update(b"scoop");
        b.update(b"scoop");
        assert_eq!(a.finalize().as_bytes(), &b.finalize());
    }

    #[test]
    fn extra_bits_change_the_digest() {
        let plain = Shabal::new(256).unwrap().finalize();
        let with_bit = Shabal::new(256).unwrap().finalize_bits(0x80, 1);
        assert_ne!(plain, with_bit);
        // n = 0 ignores ub entirely
        assert_eq!(Shabal::new(256).unwrap().finalize_bits(0xFF, 0), plain);
    }

    #[test]
    fn reset_restores_iv() {
        let mut h = Shabal::new(512).unwrap();
        h.update(&[1u8; 200]);
        h.reset();
        assert_eq!(h.blocks_absorbed(), 0);
        assert_eq!(h.finalize(), Shabal::new(512).unwrap().finalize());
    }
}
