//! Shabal Kernel Constants
//!
//! The initial values are the Shabal-256 IV: the state reached from an
//! all-zero state with counter `u64::MAX` after the two prefix blocks that
//! encode the output size (`256 + u` and `272 + u`). `kernels::shabal` can
//! re-derive them; the unit tests there check that it does.

// =============================================================================
// STRUCTURAL CONSTANTS
// =============================================================================

/// Message block size in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Message block size in 32-bit words.
pub const BLOCK_WORDS: usize = 16;

/// Shabal-256 digest size in bytes.
pub const HASH_SIZE: usize = 32;

/// Largest supported digest (512 bits) in bytes.
pub const MAX_HASH_SIZE: usize = 64;

/// Generation signature size in bytes.
pub const GENSIG_SIZE: usize = 32;

/// Scoop record size in bytes.
pub const SCOOP_SIZE: usize = 64;

/// Widest supported lane count (AVX-512F, 16 x u32).
pub const MAX_LANES: usize = 16;

/// Number of `PERM_ELT` applications per permutation.
pub const PERM_STEPS: usize = 48;

/// First byte of the padding that follows a message: a single set bit.
pub const TERMINATOR: u8 = 0x80;

// =============================================================================
// SHABAL-256 INITIAL STATE
// =============================================================================

/// Initial `A` register for 256-bit output.
pub const A_INIT_256: [u32; 12] = [
    0x52F8_4552, 0xE54B_7999, 0x2D8E_E3EC, 0xB964_5191, 0xE007_8B86, 0xBB7C_44C9, 0xD2B5_C1CA,
    0xB0D2_EB8C, 0x14CE_5A45, 0x22AF_50DC, 0xEFFD_BC6B, 0xEB21_B74A,
];

/// Initial `B` register for 256-bit output.
pub const B_INIT_256: [u32; 16] = [
    0xB555_C6EE, 0x3E71_0596, 0xA72A_652F, 0x9301_515F, 0xDA28_C1FA, 0x696F_D868, 0x9CB6_BF72,
    0x0AFE_4002, 0xA6E0_3615, 0x5138_C1D4, 0xBE21_6306, 0xB38B_8890, 0x3EA8_B96B, 0x3299_ACE4,
    0x3092_4DD4, 0x55CB_34A5,
];

/// Initial `C` register for 256-bit output.
pub const C_INIT_256: [u32; 16] = [
    0xB405_F031, 0xC423_3EBA, 0xB373_3979, 0xC0DD_9D55, 0xC51C_28AE, 0xA327_B8E1, 0x56C5_6167,
    0xED61_4433, 0x88B5_9D60, 0x60E2_CEBA, 0x758B_4B8B, 0x83E8_2A7F, 0xBC96_8828, 0xE6E0_0BF7,
    0xBA83_9E55, 0x9B49_1C60,
];

/// Counter value carried by the Shabal-256 IV (low word; high word is 0).
pub const W_INIT: u32 = 1;

// =============================================================================
// PERMUTATION SCHEDULE
// =============================================================================

/// Register indices used by one `PERM_ELT` application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermStep {
    /// `A` word written.
    pub a0: usize,
    /// `A` word read (previous step's output).
    pub a1: usize,
    /// `B` word written.
    pub b0: usize,
    /// `B` word XORed in directly.
    pub b1: usize,
    /// `B` word kept by the and-not term.
    pub b2: usize,
    /// `B` word masked out by the and-not term.
    pub b3: usize,
    /// `C` word read.
    pub c: usize,
    /// Message word read.
    pub m: usize,
}

/// Index schedule for the 48 `PERM_ELT` applications of one permutation.
///
/// Step `k` advances `A` by one mod 12 and `B`/`M` by one mod 16, with
/// `b1, b2, b3` at `+13, +9, +6` from `b0` and `c` descending from 8.
pub const PERM_SCHEDULE: [PermStep; PERM_STEPS] = build_schedule();

const fn build_schedule() -> [PermStep; PERM_STEPS] {
    let mut out = [PermStep { a0: 0, a1: 0, b0: 0, b1: 0, b2: 0, b3: 0, c: 0, m: 0 }; PERM_STEPS];
    let mut k = 0;
    while k < PERM_STEPS {
        out[k] = PermStep {
            a0: k % 12,
            a1: (k + 11) % 12,
            b0: k % 16,
            b1: (k + 13) % 16,
            b2: (k + 9) % 16,
            b3: (k + 6) % 16,
            c: (8 + 16 * 3 - k) % 16,
            m: k % 16,
        };
        k += 1;
    }
    out
}

/// `C` indices folded into each `A[k]` at the end of `APPLY_P`.
pub const C_FOLD: [[usize; 3]; 12] = build_fold();

const fn build_fold() -> [[usize; 3]; 12] {
    let mut out = [[0usize; 3]; 12];
    let mut k = 0;
    while k < 12 {
        out[k] = [(k + 11) % 16, (k + 15) % 16, (k + 3) % 16];
        k += 1;
    }
    out
}
