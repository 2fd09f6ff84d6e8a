//! Fast Deadline Kernel
//!
//! Hashes `gensig || scoop` (96 bytes) for many scoops that share one
//! generation signature. Everything in block 1 that depends only on the
//! signature is computed once into a [`PostSignature`]; each scoop then pays
//! for the remaining half of block 1, block 2 and the three final rounds.
//!
//! Only `B[8]` and `B[9]` are read at the end: they are the first 8 digest
//! bytes, i.e. the deadline.

use super::constants::{
    BLOCK_WORDS, B_INIT_256, C_INIT_256, GENSIG_SIZE, MAX_LANES, SCOOP_SIZE, TERMINATOR, W_INIT,
};
use super::shabal::{fold_c, permute, LaneState};
use super::vector::{load_words, ShabalVector};

/// Words of block 1 taken from the signature (the other half is scoop data).
const SIG_WORDS: usize = GENSIG_SIZE / 4;

// =============================================================================
// SNAPSHOT
// =============================================================================

/// State after the generation signature half of block 1.
///
/// Built once per signature and never mutated; every lane group works on its
/// own copy, so each group starts again from counter 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostSignature<V: ShabalVector = u32> {
    /// IV `A` with `XOR_W` for counter 1 already applied.
    a: [V; 12],
    /// `rotl(B_INIT[j] + sig[j], 17)` for `j < 8`.
    b_head: [V; SIG_WORDS],
    /// Signature words, needed again by the `SUB` step.
    sig: [V; SIG_WORDS],
}

impl PostSignature<u32> {
    /// Fold a generation signature into a reusable snapshot.
    #[must_use]
    pub fn new(gensig: &[u8; GENSIG_SIZE]) -> Self {
        let sig: [u32; SIG_WORDS] = load_words(|_| Some(&gensig[..]));
        let mut iv = LaneState::<u32>::shabal256();
        iv.xor_w();
        Self {
            a: iv.a,
            b_head: core::array::from_fn(|j| B_INIT_256[j].wrapping_add(sig[j]).rotate_left(17)),
            sig,
        }
    }

    /// Replicate the snapshot into every lane of `V`.
    #[inline(always)]
    #[must_use]
    pub fn broadcast<V: ShabalVector>(&self) -> PostSignature<V> {
        PostSignature {
            a: self.a.map(V::splat),
            b_head: self.b_head.map(V::splat),
            sig: self.sig.map(V::splat),
        }
    }

    /// Deadline of one scoop: first 8 bytes of Shabal-256(`gensig || scoop`)
    /// as a little-endian `u64`.
    #[must_use]
    pub fn deadline(&self, scoop: &[u8; SCOOP_SIZE]) -> u64 {
        let lo: [u32; SIG_WORDS] = load_words(|_| Some(&scoop[..]));
        let hi: [u32; SIG_WORDS] = load_words(|_| Some(&scoop[32..]));
        let (d_lo, d_hi) = deadline_lanes(self, &lo, &hi);
        u64::from(d_hi) << 32 | u64::from(d_lo)
    }
}

// =============================================================================
// KERNEL
// =============================================================================

/// Finish block 1 with `scoop[0..32]`, absorb block 2 and finalize.
///
/// `lo` and `hi` are the two scoop halves as message words. Returns the low
/// and high 32 bits of each lane's deadline (`B[8]`, `B[9]`).
#[inline(always)]
pub(crate) fn deadline_lanes<V: ShabalVector>(
    snap: &PostSignature<V>,
    lo: &[V; SIG_WORDS],
    hi: &[V; SIG_WORDS],
) -> (V, V) {
    let mut m = [V::splat(0); BLOCK_WORDS];
    m[..SIG_WORDS].copy_from_slice(&snap.sig);
    m[SIG_WORDS..].copy_from_slice(lo);

    let mut b = [V::splat(0); 16];
    b[..SIG_WORDS].copy_from_slice(&snap.b_head);
    for j in 0..SIG_WORDS {
        b[SIG_WORDS + j] = V::splat(B_INIT_256[SIG_WORDS + j]).add(lo[j]).rotl(17);
    }

    let mut state = LaneState {
        a: snap.a,
        b,
        c: C_INIT_256.map(V::splat),
        w_low: W_INIT,
        w_high: 0,
    };
    permute(&mut state.a, &mut state.b, &state.c, &m);
    fold_c(&mut state.a, &state.c);
    state.input_sub(&m);
    state.swap_bc();
    state.incr_w();

    let mut tail = [V::splat(0); BLOCK_WORDS];
    tail[..SIG_WORDS].copy_from_slice(hi);
    tail[SIG_WORDS] = V::splat(u32::from(TERMINATOR));
    state.close(&tail);

    (state.b[8], state.b[9])
}

/// Deadlines for one group of `V::LANES` consecutive scoops.
///
/// `group` holds `V::LANES * 64` bytes; `out` receives `V::LANES` deadlines
/// in scoop order.
#[inline(always)]
pub(crate) fn deadlines<V: ShabalVector>(snap: &PostSignature<V>, group: &[u8], out: &mut [u64]) {
    let lo: [V; SIG_WORDS] = load_words(|lane| Some(&group[lane * SCOOP_SIZE..]));
    let hi: [V; SIG_WORDS] = load_words(|lane| Some(&group[lane * SCOOP_SIZE + 32..]));
    let (d_lo, d_hi) = deadline_lanes(snap, &lo, &hi);
    widen(d_lo, d_hi, out);
}

/// Deadlines for up to `V::LANES` scoops where some lanes may be inactive.
///
/// Inactive lanes are hashed over zeros and reported as `None`.
#[inline(always)]
pub(crate) fn deadlines_masked<V: ShabalVector>(
    snap: &PostSignature<V>,
    scoops: &[Option<&[u8; SCOOP_SIZE]>],
    out: &mut [Option<u64>],
) {
    let lane = |i: usize| scoops.get(i).copied().flatten();
    let lo: [V; SIG_WORDS] = load_words(|i| lane(i).map(|s| &s[..]));
    let hi: [V; SIG_WORDS] = load_words(|i| lane(i).map(|s| &s[32..]));
    let (d_lo, d_hi) = deadline_lanes(snap, &lo, &hi);

    let mut wide = [0u64; MAX_LANES];
    widen(d_lo, d_hi, &mut wide[..V::LANES]);
    for (i, slot) in out.iter_mut().enumerate().take(V::LANES) {
        *slot = lane(i).map(|_| wide[i]);
    }
}

#[inline(always)]
fn widen<V: ShabalVector>(lo: V, hi: V, out: &mut [u64]) {
    let mut lo_words = [0u32; MAX_LANES];
    let mut hi_words = [0u32; MAX_LANES];
    lo.scatter(&mut lo_words);
    hi.scatter(&mut hi_words);
    for (i, d) in out.iter_mut().enumerate().take(V::LANES) {
        *d = u64::from(hi_words[i]) << 32 | u64::from(lo_words[i]);
    }
}

// =============================================================================
// TESTS
// =============================================================================
