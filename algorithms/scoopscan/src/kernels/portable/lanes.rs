//! Portable lane arrays.
//!
//! `Lanes<W>` is a plain `[u32; W]` driven through the same generic kernel as
//! the hardware registers. It runs on any CPU, so every lane width can be
//! checked against the scalar engine regardless of the host.

use crate::kernels::vector::ShabalVector;

/// `W` independent 32-bit lanes in an ordinary array (`W <= MAX_LANES`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(align(64))]
pub struct Lanes<const W: usize>(pub [u32; W]);

impl<const W: usize> Lanes<W> {
    #[inline(always)]
    fn zip_with(self, rhs: Self, f: impl Fn(u32, u32) -> u32) -> Self {
        Self(core::array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }

    #[inline(always)]
    fn map(self, f: impl Fn(u32) -> u32) -> Self {
        Self(self.0.map(f))
    }
}

impl<const W: usize> ShabalVector for Lanes<W> {
    const LANES: usize = W;

    #[inline(always)]
    fn splat(x: u32) -> Self {
        Self([x; W])
    }

    #[inline(always)]
    fn gather(words: &[u32]) -> Self {
        Self(core::array::from_fn(|i| words[i]))
    }

    #[inline(always)]
    fn scatter(self, out: &mut [u32]) {
        out[..W].copy_from_slice(&self.0);
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, u32::wrapping_add)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, u32::wrapping_sub)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a ^ b)
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a | b)
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a & !b)
    }

    #[inline(always)]
    fn shl(self, n: u32) -> Self {
        self.map(|a| a << n)
    }

    #[inline(always)]
    fn shr(self, n: u32) -> Self {
        self.map(|a| a >> n)
    }

    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        self.map(|a| a.rotate_left(n))
    }
}
