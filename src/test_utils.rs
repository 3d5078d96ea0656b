// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Re-exports the `approx` assertion macros so tests compare reconstructed
//! pixels with a tolerance instead of `assert_eq!`.

pub use approx::assert_abs_diff_eq;

/// Tolerance for values that should match up to FFT round-off.
pub const F64_EPSILON: f64 = 1e-9;

/// Tolerance for pixels after a full `N²`-layer replay, where round-off accumulates.
pub const PIXEL_EPSILON: f64 = 1e-6;
