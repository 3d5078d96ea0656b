// SPDX-License-Identifier: MPL-2.0
//! Adaptive display range for a single layer preview.
//!
//! High-frequency layers usually carry a tiny fraction of the image energy and
//! would be invisible on a linear 0–255 scale. The mapper widens faint layers
//! with a power law while leaving strong ones close to their true amplitude.

use crate::domain::{BrightnessBias, BrightnessFactor, FrequencyCoord, ImageSize};
use rustfft::num_complex::Complex64;

/// Full 8-bit pixel range, used for the average-brightness layer.
pub const FULL_RANGE: DisplayRange = DisplayRange {
    vmin: 0.0,
    vmax: 255.0,
};

/// Value interval mapped onto the displayable brightness range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRange {
    pub vmin: f64,
    pub vmax: f64,
}

impl DisplayRange {
    #[must_use]
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Maps a value to `[0, 1]`. Degenerate ranges map everything to 0.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span <= 0.0 || !span.is_finite() {
            return 0.0;
        }
        ((value - self.vmin) / span).clamp(0.0, 1.0)
    }
}

impl Default for DisplayRange {
    fn default() -> Self {
        FULL_RANGE
    }
}

/// Brightness tuning, passed in at construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BrightnessMapper {
    bias: BrightnessBias,
    factor: BrightnessFactor,
}

impl BrightnessMapper {
    #[must_use]
    pub fn new(bias: BrightnessBias, factor: BrightnessFactor) -> Self {
        Self { bias, factor }
    }

    /// Display range for the layer of `coord` synthesized from `coefficient`
    /// (already weighted).
    ///
    /// The zero-frequency layer always uses [`FULL_RANGE`]. Every other layer
    /// is centered on its negative peak so that zero maps to a fixed relative
    /// brightness.
    #[must_use]
    pub fn range(&self, coord: FrequencyCoord, coefficient: Complex64, size: ImageSize) -> DisplayRange {
        if coord.is_dc() {
            return FULL_RANGE;
        }

        let peak = coefficient.norm() / size.area();
        let target_relative =
            ((peak / 255.0).powf(1.0 / self.bias.value()) * self.factor.value()).min(1.0);
        if target_relative <= 0.0 {
            return DisplayRange::new(0.0, 0.0);
        }

        let dynamic_range = peak.max(2.0 * peak / target_relative);
        DisplayRange::new(-peak, dynamic_range - peak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F64_EPSILON};

    fn size(n: usize) -> ImageSize {
        ImageSize::new(n).unwrap()
    }

    #[test]
    fn dc_always_uses_full_range() {
        let mapper = BrightnessMapper::default();
        for coefficient in [
            Complex64::new(0.0, 0.0),
            Complex64::new(1e9, -3.0),
            Complex64::new(-5.0, 2.0),
        ] {
            assert_eq!(
                mapper.range(FrequencyCoord::new(0, 0), coefficient, size(8)),
                DisplayRange::new(0.0, 255.0)
            );
        }
    }

    #[test]
    fn strong_layer_saturates_target_and_keeps_true_amplitude() {
        // peak = 255 → (1)^(1/2) · 2 = 2, clamped to 1 → dynamic = 2 · peak.
        let mapper = BrightnessMapper::default();
        let range = mapper.range(
            FrequencyCoord::new(1, 0),
            Complex64::new(255.0 * 16.0, 0.0),
            size(4),
        );
        assert_abs_diff_eq!(range.vmin, -255.0, epsilon = F64_EPSILON);
        assert_abs_diff_eq!(range.vmax, 255.0, epsilon = F64_EPSILON);
    }

    #[test]
    fn faint_layer_is_stretched() {
        // peak = 2.55 → sqrt(0.01) · 2 = 0.2 → dynamic = 2 · 2.55 / 0.2 = 25.5
        let mapper = BrightnessMapper::default();
        let range = mapper.range(
            FrequencyCoord::new(0, 2),
            Complex64::new(0.0, 2.55 * 64.0),
            size(8),
        );
        assert_abs_diff_eq!(range.vmin, -2.55, epsilon = F64_EPSILON);
        assert_abs_diff_eq!(range.vmax, 25.5 - 2.55, epsilon = F64_EPSILON);
    }

    #[test]
    fn zero_amplitude_layer_gets_degenerate_range() {
        let mapper = BrightnessMapper::default();
        let range = mapper.range(FrequencyCoord::new(3, -1), Complex64::new(0.0, 0.0), size(8));
        assert_eq!(range, DisplayRange::new(0.0, 0.0));
        assert_eq!(range.normalize(12.0), 0.0);
    }

    #[test]
    fn tuning_changes_stretch() {
        let gentle = BrightnessMapper::new(BrightnessBias::new(1.0), BrightnessFactor::new(1.0));
        // peak = 2.55 → 0.01 · 1 = 0.01 → dynamic = 510
        let range = gentle.range(
            FrequencyCoord::new(1, 1),
            Complex64::new(2.55 * 16.0, 0.0),
            size(4),
        );
        assert_abs_diff_eq!(range.vmax - range.vmin, 510.0, epsilon = F64_EPSILON);
    }

    #[test]
    fn normalize_clamps_into_unit_interval() {
        let range = DisplayRange::new(-10.0, 10.0);
        assert_eq!(range.normalize(-20.0), 0.0);
        assert_eq!(range.normalize(0.0), 0.5);
        assert_eq!(range.normalize(40.0), 1.0);
    }
}
