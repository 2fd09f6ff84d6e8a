//! Kernel Dispatcher
//!
//! The generic Shabal engine and its lane backends. `shabal`, `deadline`,
//! `multi` and `scan` are written once against [`vector::ShabalVector`];
//! each backend module supplies the register type and `#[target_feature]`
//! entry points.

#[cfg(target_arch = "aarch64")]
pub mod neon;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx2;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx512f;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod sse2;

pub mod constants;
pub mod shabal;
pub mod deadline;
pub mod multi;
pub mod portable;
pub(crate) mod scan;
pub mod vector;
