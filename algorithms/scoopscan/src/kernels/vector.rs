//! Lane Vector Abstraction
//!
//! The minimal set of 32-bit lane-wise operations the Shabal permutation
//! needs. Every backend (scalar `u32`, portable lane arrays, SSE2, AVX2,
//! AVX-512F, NEON) implements this trait once; the permutation, the
//! streaming engine and the deadline kernel are written against it.

// =============================================================================
// TRAIT
// =============================================================================

/// A register holding `LANES` independent 32-bit words.
///
/// All arithmetic is modulo 2^32. Lanes never interact: lane `i` of a result
/// depends only on lane `i` of the operands.
pub trait ShabalVector: Copy {
    /// Number of independent 32-bit lanes.
    const LANES: usize;

    /// Broadcast one word to every lane.
    fn splat(x: u32) -> Self;

    /// Build a register from `words[0..LANES]` (lane `i` = `words[i]`).
    ///
    /// # Panics
    /// Panics if `words` holds fewer than `LANES` words.
    fn gather(words: &[u32]) -> Self;

    /// Write lane `i` to `out[i]` for `i` in `0..LANES`.
    ///
    /// # Panics
    /// Panics if `out` holds fewer than `LANES` words.
    fn scatter(self, out: &mut [u32]);

    /// Lane-wise wrapping addition.
    fn add(self, rhs: Self) -> Self;

    /// Lane-wise wrapping subtraction.
    fn sub(self, rhs: Self) -> Self;

    /// Lane-wise XOR.
    fn xor(self, rhs: Self) -> Self;

    /// Lane-wise OR.
    fn or(self, rhs: Self) -> Self;

    /// Lane-wise `self & !rhs`.
    fn andnot(self, rhs: Self) -> Self;

    /// Lane-wise logical shift left by `n` (`n < 32`).
    fn shl(self, n: u32) -> Self;

    /// Lane-wise logical shift right by `n` (`n < 32`).
    fn shr(self, n: u32) -> Self;

    /// Lane-wise rotate left by `n` (`0 < n < 32`).
    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        self.shl(n).or(self.shr(32 - n))
    }

    /// Lane-wise bitwise NOT.
    #[inline(always)]
    fn not(self) -> Self {
        self.xor(Self::splat(u32::MAX))
    }

    /// Lane-wise `x * 3`.
    #[inline(always)]
    fn mul3(self) -> Self {
        self.shl(1).add(self)
    }

    /// Lane-wise `x * 5`.
    #[inline(always)]
    fn mul5(self) -> Self {
        self.shl(2).add(self)
    }
}

// =============================================================================
// SCALAR LANE
// =============================================================================

/// A plain `u32` is a one-lane vector: the scalar reference engine.
impl ShabalVector for u32 {
    const LANES: usize = 1;

    #[inline(always)]
    fn splat(x: u32) -> Self {
        x
    }

    #[inline(always)]
    fn gather(words: &[u32]) -> Self {
        words[0]
    }

    #[inline(always)]
    fn scatter(self, out: &mut [u32]) {
        out[0] = self;
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        self ^ rhs
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        self | rhs
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        self & !rhs
    }

    #[inline(always)]
    fn shl(self, n: u32) -> Self {
        self << n
    }

    #[inline(always)]
    fn shr(self, n: u32) -> Self {
        self >> n
    }

    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        self.rotate_left(n)
    }

    #[inline(always)]
    fn not(self) -> Self {
        !self
    }

    #[inline(always)]
    fn mul3(self) -> Self {
        self.wrapping_mul(3)
    }

    #[inline(always)]
    fn mul5(self) -> Self {
        self.wrapping_mul(5)
    }
}

// =============================================================================
// LOAD HELPERS
// =============================================================================

/// Read the little-endian `u32` at word index `word` of `bytes`.
#[inline(always)]
pub(crate) fn le_word(bytes: &[u8], word: usize) -> u32 {
    let o = word * 4;
    u32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]])
}

/// Transpose `N` message words from each lane's buffer into registers.
///
/// `lane_bytes(i)` returns the bytes of lane `i`, starting at the first word
/// to load; `None` loads zeros for that lane.
#[inline(always)]
pub(crate) fn load_words<'a, V, const N: usize>(
    lane_bytes: impl Fn(usize) -> Option<&'a [u8]>,
) -> [V; N]
where
    V: ShabalVector,
{
    let mut tmp = [[0u32; crate::kernels::constants::MAX_LANES]; N];
    for lane in 0..V::LANES {
        if let Some(bytes) = lane_bytes(lane) {
            for (j, row) in tmp.iter_mut().enumerate() {
                row[lane] = le_word(bytes, j);
            }
        }
    }
    core::array::from_fn(|j| V::gather(&tmp[j][..V::LANES]))
}
