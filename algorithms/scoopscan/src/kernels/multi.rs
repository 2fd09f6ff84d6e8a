//! Multi-Lane Streaming Engine
//!
//! Hashes `V::LANES` independent messages of equal length in lockstep. A lane
//! can be switched off by passing `None` for it; from then on it is fed zeros
//! and its digest is reported as `None`.

use super::constants::{BLOCK_SIZE, BLOCK_WORDS, MAX_HASH_SIZE, MAX_LANES, TERMINATOR};
use super::shabal::LaneState;
use super::vector::{load_words, ShabalVector};
use crate::types::{output_bytes, ShabalDigest, ShabalError};

// =============================================================================
// OUTPUT
// =============================================================================

/// Per-lane digests from a [`MultiShabal`] run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaneDigests {
    digests: [Option<ShabalDigest>; MAX_LANES],
    lanes: usize,
}

impl LaneDigests {
    /// Number of lanes of the engine that produced these digests.
    #[must_use]
    pub const fn lanes(&self) -> usize {
        self.lanes
    }

    /// Digest of `lane`, or `None` if the lane was deactivated.
    #[must_use]
    pub fn get(&self, lane: usize) -> Option<&ShabalDigest> {
        self.digests[..self.lanes].get(lane)?.as_ref()
    }

    /// Digests in lane order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&ShabalDigest>> {
        self.digests[..self.lanes].iter().map(Option::as_ref)
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Lane-parallel streaming Shabal hasher.
///
/// Used directly with the portable lane types (`u32`, `Lanes<W>`); the
/// hardware backends drive it from their `hash_lanes` entry points.
#[derive(Clone, Debug)]
pub struct MultiShabal<V: ShabalVector> {
    state: LaneState<V>,
    bufs: [[u8; BLOCK_SIZE]; MAX_LANES],
    ptr: usize,
    active: [bool; MAX_LANES],
    out_len: usize,
}

impl<V: ShabalVector> MultiShabal<V> {
    /// Create an engine producing `out_bits`-bit digests on every lane.
    ///
    /// # Errors
    /// Returns `ShabalError::InvalidOutputSize` unless `out_bits` is a
    /// multiple of 32 in `32..=512`.
    #[inline(always)]
    pub fn new(out_bits: u32) -> Result<Self, ShabalError> {
        let out_len = output_bytes(out_bits)?;
        let state = if out_bits == 256 {
            LaneState::shabal256()
        } else {
            LaneState::with_output_bits(out_bits)
        };
        let mut active = [false; MAX_LANES];
        active[..V::LANES].fill(true);
        Ok(Self {
            state,
            bufs: [[0u8; BLOCK_SIZE]; MAX_LANES],
            ptr: 0,
            active,
            out_len,
        })
    }

    /// Whether `lane` is still active.
    #[must_use]
    pub fn is_active(&self, lane: usize) -> bool {
        self.active.get(lane).copied().unwrap_or(false)
    }

    /// Feed one slice per lane.
    ///
    /// `None` deactivates that lane for the rest of the run. All active
    /// lanes must receive the same number of bytes.
    ///
    /// # Errors
    /// `LaneCount` if `inputs.len() != V::LANES`; `UnevenLanes` if active
    /// lanes differ in length. Nothing is absorbed on error.
    #[inline(always)]
    pub fn update(&mut self, inputs: &[Option<&[u8]>]) -> Result<(), ShabalError> {
        if inputs.len() != V::LANES {
            return Err(ShabalError::LaneCount {
                expected: V::LANES,
                actual: inputs.len(),
            });
        }
        let mut len = None;
        for (i, input) in inputs.iter().enumerate() {
            if let (true, Some(data)) = (self.active[i], input) {
                match len {
                    None => len = Some(data.len()),
                    Some(l) if l != data.len() => return Err(ShabalError::UnevenLanes),
                    Some(_) => {}
                }
            }
        }
        for (i, input) in inputs.iter().enumerate() {
            if input.is_none() && self.active[i] {
                self.active[i] = false;
                self.bufs[i] = [0u8; BLOCK_SIZE];
            }
        }
        let Some(len) = len else {
            return Ok(());
        };

        let active = self.active;
        let lane = |i: usize| if active[i] { inputs[i] } else { None };
        let mut pos = 0;

        if self.ptr > 0 {
            let take = (BLOCK_SIZE - self.ptr).min(len);
            for i in 0..V::LANES {
                if let Some(data) = lane(i) {
                    self.bufs[i][self.ptr..self.ptr + take].copy_from_slice(&data[..take]);
                }
            }
            self.ptr += take;
            pos = take;
            if self.ptr < BLOCK_SIZE {
                return Ok(());
            }
            let m: [V; BLOCK_WORDS] = load_words(|i| Some(&self.bufs[i][..]));
            self.state.absorb(&m);
            self.ptr = 0;
        }

        while len - pos >= BLOCK_SIZE {
            let m: [V; BLOCK_WORDS] = load_words(|i| lane(i).map(|d| &d[pos..]));
            self.state.absorb(&m);
            pos += BLOCK_SIZE;
        }

        let rest = len - pos;
        for i in 0..V::LANES {
            if let Some(data) = lane(i) {
                self.bufs[i][..rest].copy_from_slice(&data[pos..]);
            }
        }
        self.ptr = rest;
        Ok(())
    }

    /// Close every lane and return the digests.
    #[inline(always)]
    #[must_use]
    pub fn finalize(mut self) -> LaneDigests {
        for buf in &mut self.bufs[..V::LANES] {
            buf[self.ptr] = TERMINATOR;
            buf[self.ptr + 1..].fill(0);
        }
        let m: [V; BLOCK_WORDS] = load_words(|i| Some(&self.bufs[i][..]));
        self.state.close(&m);

        let mut cols = [[0u32; MAX_LANES]; 16];
        for (col, b) in cols.iter_mut().zip(self.state.b()) {
            b.scatter(col);
        }

        let first_word = 16 - self.out_len / 4;
        let mut digests = [None; MAX_LANES];
        for (lane, slot) in digests.iter_mut().enumerate().take(V::LANES) {
            if !self.active[lane] {
                continue;
            }
            let mut bytes = [0u8; MAX_HASH_SIZE];
            for (chunk, col) in bytes.chunks_exact_mut(4).zip(&cols[first_word..]) {
                chunk.copy_from_slice(&col[lane].to_le_bytes());
            }
            *slot = Some(ShabalDigest::from_parts(bytes, self.out_len));
        }
        LaneDigests {
            digests,
            lanes: V::LANES,
        }
    }
}

/// Hash one message per lane in a single call.
#[inline(always)]
pub(crate) fn hash_lanes<V: ShabalVector>(
    inputs: &[Option<&[u8]>],
    out_bits: u32,
) -> Result<LaneDigests, ShabalError> {
    let mut engine = MultiShabal::<V>::new(out_bits)?;
    engine.update(inputs)?;
    Ok(engine.finalize())
}
