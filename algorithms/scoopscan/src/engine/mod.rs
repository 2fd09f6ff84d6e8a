//! Execution Engine
//!
//! CPU dispatch and chunked (parallel) scanning.

pub mod dispatcher;
pub mod parallel;

pub use dispatcher::{get_active_backend, get_best_kernel, kernel_for};
