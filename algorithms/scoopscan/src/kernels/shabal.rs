//! Shabal Permutation
//!
//! One implementation of the Shabal state transition, generic over the lane
//! type. Instantiated with `u32` it is the scalar reference engine; with a
//! SIMD register it runs `V::LANES` independent lanes in struct-of-arrays
//! layout (register `a[i]` holds word `i` of every lane).
//!
//! Everything here is `#[inline(always)]` so that the whole permutation is
//! compiled inside the caller's `#[target_feature]` context.

use super::constants::{
    A_INIT_256, BLOCK_WORDS, B_INIT_256, C_FOLD, C_INIT_256, PERM_SCHEDULE, W_INIT,
};
use super::vector::ShabalVector;

// =============================================================================
// STATE
// =============================================================================

/// Shabal chaining state for `V::LANES` lanes.
#[derive(Clone, Copy, Debug)]
pub struct LaneState<V: ShabalVector = u32> {
    pub(crate) a: [V; 12],
    pub(crate) b: [V; 16],
    pub(crate) c: [V; 16],
    pub(crate) w_low: u32,
    pub(crate) w_high: u32,
}

impl<V: ShabalVector> LaneState<V> {
    /// State after the Shabal-256 prefix blocks (the precomputed IV).
    #[inline(always)]
    #[must_use]
    pub fn shabal256() -> Self {
        Self {
            a: A_INIT_256.map(V::splat),
            b: B_INIT_256.map(V::splat),
            c: C_INIT_256.map(V::splat),
            w_low: W_INIT,
            w_high: 0,
        }
    }

    /// Derive the IV for an output of `out_bits` bits.
    ///
    /// Starts from an all-zero state with counter `u64::MAX` and absorbs the
    /// two prefix blocks `out_bits + u` and `out_bits + u + 16` (`u` in
    /// `0..16`). The counter wraps to 0 and ends at 1.
    #[must_use]
    pub fn with_output_bits(out_bits: u32) -> Self {
        let mut state = Self {
            a: [V::splat(0); 12],
            b: [V::splat(0); 16],
            c: [V::splat(0); 16],
            w_low: u32::MAX,
            w_high: u32::MAX,
        };
        let mut block = [V::splat(0); BLOCK_WORDS];
        for (u, m) in (0u32..).zip(block.iter_mut()) {
            *m = V::splat(out_bits + u);
        }
        state.absorb(&block);
        for (u, m) in (0u32..).zip(block.iter_mut()) {
            *m = V::splat(out_bits + u + 16);
        }
        state.absorb(&block);
        state
    }

    /// Current 64-bit block counter.
    #[must_use]
    pub fn counter(&self) -> u64 {
        u64::from(self.w_high) << 32 | u64::from(self.w_low)
    }

    /// The `B` register bank, where the digest is read from after `close`.
    #[must_use]
    pub const fn b(&self) -> &[V; 16] {
        &self.b
    }

    /// Absorb one full message block:
    /// `ADD; XOR_W; APPLY_P; SUB; SWAP_BC; INCR_W`.
    #[inline(always)]
    pub fn absorb(&mut self, m: &[V; BLOCK_WORDS]) {
        self.input_add(m);
        self.xor_w();
        self.apply_p(m);
        self.input_sub(m);
        self.swap_bc();
        self.incr_w();
    }

    /// Absorb the padded final block and run the three finalization rounds.
    ///
    /// The counter is not incremented. The digest is the tail of `B`.
    #[inline(always)]
    pub fn close(&mut self, m: &[V; BLOCK_WORDS]) {
        self.input_add(m);
        self.xor_w();
        self.apply_p(m);
        for _ in 0..3 {
            self.swap_bc();
            self.xor_w();
            self.apply_p(m);
        }
    }

    // =========================================================================
    // STEPS
    // =========================================================================

    #[inline(always)]
    pub(crate) fn input_add(&mut self, m: &[V; BLOCK_WORDS]) {
        for (b, &m) in self.b.iter_mut().zip(m) {
            *b = b.add(m);
        }
    }

    #[inline(always)]
    pub(crate) fn input_sub(&mut self, m: &[V; BLOCK_WORDS]) {
        for (c, &m) in self.c.iter_mut().zip(m) {
            *c = c.sub(m);
        }
    }

    #[inline(always)]
    pub(crate) fn xor_w(&mut self) {
        self.a[0] = self.a[0].xor(V::splat(self.w_low));
        self.a[1] = self.a[1].xor(V::splat(self.w_high));
    }

    #[inline(always)]
    pub(crate) fn swap_bc(&mut self) {
        core::mem::swap(&mut self.b, &mut self.c);
    }

    #[inline(always)]
    pub(crate) fn incr_w(&mut self) {
        self.w_low = self.w_low.wrapping_add(1);
        if self.w_low == 0 {
            self.w_high = self.w_high.wrapping_add(1);
        }
    }

    /// `APPLY_P`: rotate `B`, 48 `PERM_ELT` steps, fold `C` into `A`.
    #[inline(always)]
    pub(crate) fn apply_p(&mut self, m: &[V; BLOCK_WORDS]) {
        rotate_b(&mut self.b);
        permute(&mut self.a, &mut self.b, &self.c, m);
        fold_c(&mut self.a, &self.c);
    }
}

// =============================================================================
// PERMUTATION PIECES
// =============================================================================

/// `B[j] = rotl(B[j], 17)` for every word.
#[inline(always)]
pub(crate) fn rotate_b<V: ShabalVector>(b: &mut [V; 16]) {
    for x in b.iter_mut() {
        *x = x.rotl(17);
    }
}

/// The 48 `PERM_ELT` applications of one permutation.
#[inline(always)]
pub(crate) fn permute<V: ShabalVector>(
    a: &mut [V; 12],
    b: &mut [V; 16],
    c: &[V; 16],
    m: &[V; BLOCK_WORDS],
) {
    for s in &PERM_SCHEDULE {
        let x = a[s.a0]
            .xor(a[s.a1].rotl(15).mul5())
            .xor(c[s.c])
            .mul3()
            .xor(b[s.b1])
            .xor(b[s.b2].andnot(b[s.b3]))
            .xor(m[s.m]);
        a[s.a0] = x;
        b[s.b0] = b[s.b0].rotl(1).xor(x).not();
    }
}

/// `A[k] += C[k+11] + C[k+15] + C[k+3]` (indices mod 16).
#[inline(always)]
pub(crate) fn fold_c<V: ShabalVector>(a: &mut [V; 12], c: &[V; 16]) {
    for (x, idx) in a.iter_mut().zip(&C_FOLD) {
        *x = x.add(c[idx[0]]).add(c[idx[1]]).add(c[idx[2]]);
    }
}

// =============================================================================
// TESTS
// =============================================================================
