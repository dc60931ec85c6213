// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::assert_abs_diff_eq;

/// Default epsilon for f32 comparisons (frames, style lengths).
pub const F32_EPSILON: f32 = 1e-6;

/// Default epsilon for f64 comparisons (seconds).
pub const F64_EPSILON: f64 = 1e-10;
