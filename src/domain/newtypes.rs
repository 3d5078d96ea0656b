// SPDX-License-Identifier: MPL-2.0
//! Reconstruction and playback newtypes.
//!
//! This module provides type-safe wrappers for session parameters. The image
//! size is validated (a zero size is a configuration error); tuning values are
//! clamped into their valid ranges, since they come from user settings.

use crate::error::InputError;
use std::time::Duration;

// =============================================================================
// ImageSize
// =============================================================================

/// Side length of the square image, guaranteed positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSize(usize);

impl ImageSize {
    /// Creates a new size, rejecting zero.
    pub fn new(size: usize) -> Result<Self, InputError> {
        if size == 0 {
            Err(InputError::ZeroSize)
        } else {
            Ok(Self(size))
        }
    }

    /// Validates that a `rows x cols` matrix is square and non-empty.
    pub fn from_shape(rows: usize, cols: usize) -> Result<Self, InputError> {
        if rows != cols {
            return Err(InputError::NonSquare { rows, cols });
        }
        Self::new(rows)
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }

    /// `floor(N/2)`, the shift that moves frequency zero to the array center.
    #[must_use]
    pub fn half(self) -> usize {
        self.0 / 2
    }

    /// `ceil(N/2)`, the count of visited horizontal frequencies.
    #[must_use]
    pub fn horizontal_frequencies(self) -> usize {
        self.0.div_ceil(2)
    }

    /// Total number of reconstruction steps for this size.
    #[must_use]
    pub fn total_steps(self) -> usize {
        self.horizontal_frequencies() * self.0
    }

    /// `N²`, the normalization of one inverse-transform term.
    #[must_use]
    pub fn area(self) -> f64 {
        (self.0 * self.0) as f64
    }
}

// =============================================================================
// StepsPerTick
// =============================================================================

/// Burst batch size bounds.
pub mod steps_per_tick_bounds {
    /// Minimum number of components applied per tick.
    pub const MIN: usize = 1;
    /// Maximum number of components applied per tick.
    pub const MAX: usize = 4096;
    /// Default number of components applied per tick.
    pub const DEFAULT: usize = 20;
}

/// Number of steps a burst applies on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepsPerTick(usize);

impl StepsPerTick {
    /// Creates a new batch size, clamping to valid range.
    #[must_use]
    pub fn new(steps: usize) -> Self {
        Self(steps.clamp(steps_per_tick_bounds::MIN, steps_per_tick_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for StepsPerTick {
    fn default() -> Self {
        Self(steps_per_tick_bounds::DEFAULT)
    }
}

// =============================================================================
// TickInterval
// =============================================================================

/// Burst tick interval bounds, in milliseconds.
pub mod tick_interval_bounds {
    /// Minimum interval between ticks.
    pub const MIN_MS: u64 = 1;
    /// Maximum interval between ticks.
    pub const MAX_MS: u64 = 1000;
    /// Default interval between ticks.
    pub const DEFAULT_MS: u64 = 30;
}

/// Delay between two burst ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInterval(u64);

impl TickInterval {
    /// Creates a new interval in milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(tick_interval_bounds::MIN_MS, tick_interval_bounds::MAX_MS))
    }

    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for TickInterval {
    fn default() -> Self {
        Self(tick_interval_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Brightness tuning
// =============================================================================

/// Brightness remap bounds.
pub mod brightness_bounds {
    /// Smallest accepted bias (exponent denominator).
    pub const MIN_BIAS: f64 = 0.1;
    /// Largest accepted bias.
    pub const MAX_BIAS: f64 = 16.0;
    /// Default bias: a square-root remap.
    pub const DEFAULT_BIAS: f64 = 2.0;
    /// Smallest accepted gain.
    pub const MIN_FACTOR: f64 = 0.01;
    /// Largest accepted gain.
    pub const MAX_FACTOR: f64 = 100.0;
    /// Default gain.
    pub const DEFAULT_FACTOR: f64 = 2.0;
}

/// Exponent denominator of the layer brightness power law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessBias(f64);

impl BrightnessBias {
    /// Creates a new bias, clamping to valid range. NaN falls back to the default.
    #[must_use]
    pub fn new(bias: f64) -> Self {
        if bias.is_nan() {
            return Self::default();
        }
        Self(bias.clamp(brightness_bounds::MIN_BIAS, brightness_bounds::MAX_BIAS))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for BrightnessBias {
    fn default() -> Self {
        Self(brightness_bounds::DEFAULT_BIAS)
    }
}

/// Gain applied after the brightness power law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessFactor(f64);

impl BrightnessFactor {
    /// Creates a new gain, clamping to valid range. NaN falls back to the default.
    #[must_use]
    pub fn new(factor: f64) -> Self {
        if factor.is_nan() {
            return Self::default();
        }
        Self(factor.clamp(brightness_bounds::MIN_FACTOR, brightness_bounds::MAX_FACTOR))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for BrightnessFactor {
    fn default() -> Self {
        Self(brightness_bounds::DEFAULT_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_size_rejects_zero() {
        assert_eq!(ImageSize::new(0), Err(InputError::ZeroSize));
        assert_eq!(ImageSize::new(5).unwrap().get(), 5);
    }

    #[test]
    fn image_size_from_shape_requires_square() {
        assert_eq!(
            ImageSize::from_shape(3, 4),
            Err(InputError::NonSquare { rows: 3, cols: 4 })
        );
        assert_eq!(ImageSize::from_shape(0, 0), Err(InputError::ZeroSize));
        assert_eq!(ImageSize::from_shape(6, 6).unwrap().get(), 6);
    }

    #[test]
    fn image_size_derived_quantities() {
        let even = ImageSize::new(4).unwrap();
        assert_eq!(even.half(), 2);
        assert_eq!(even.horizontal_frequencies(), 2);
        assert_eq!(even.total_steps(), 8);
        assert_eq!(even.area(), 16.0);

        let odd = ImageSize::new(5).unwrap();
        assert_eq!(odd.half(), 2);
        assert_eq!(odd.horizontal_frequencies(), 3);
        assert_eq!(odd.total_steps(), 15);
    }

    #[test]
    fn steps_per_tick_clamps_to_valid_range() {
        assert_eq!(StepsPerTick::new(0).value(), steps_per_tick_bounds::MIN);
        assert_eq!(StepsPerTick::new(1_000_000).value(), steps_per_tick_bounds::MAX);
        assert_eq!(StepsPerTick::new(7).value(), 7);
        assert_eq!(StepsPerTick::default().value(), steps_per_tick_bounds::DEFAULT);
    }

    #[test]
    fn tick_interval_clamps_and_converts() {
        assert_eq!(TickInterval::from_millis(0).as_millis(), 1);
        assert_eq!(TickInterval::from_millis(5000).as_millis(), 1000);
        assert_eq!(
            TickInterval::from_millis(40).as_duration(),
            Duration::from_millis(40)
        );
    }

    #[test]
    fn brightness_tuning_clamps_and_rejects_nan() {
        assert_eq!(BrightnessBias::new(0.0).value(), brightness_bounds::MIN_BIAS);
        assert_eq!(BrightnessBias::new(f64::NAN), BrightnessBias::default());
        assert_eq!(BrightnessFactor::new(1e9).value(), brightness_bounds::MAX_FACTOR);
        assert_eq!(BrightnessFactor::new(3.0).value(), 3.0);
    }
}
