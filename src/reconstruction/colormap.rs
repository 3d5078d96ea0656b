// SPDX-License-Identifier: MPL-2.0
//! Color scales mapping a normalized value in `[0, 1]` to an RGB triple.
//!
//! Each scale is a short table of evenly spaced stops sampled from the
//! well-known perceptual colormaps, with linear interpolation between them.

use serde::{Deserialize, Serialize};

/// 8-bit RGB color.
pub type Rgb = [u8; 3];

const VIRIDIS: [Rgb; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 82, 139],
    [44, 113, 142],
    [33, 145, 140],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

const PLASMA: [Rgb; 9] = [
    [13, 8, 135],
    [75, 3, 161],
    [125, 3, 168],
    [168, 34, 150],
    [203, 70, 121],
    [229, 107, 93],
    [248, 148, 65],
    [253, 195, 40],
    [240, 249, 33],
];

const MAGMA: [Rgb; 9] = [
    [0, 0, 4],
    [28, 16, 68],
    [79, 18, 123],
    [129, 37, 129],
    [181, 54, 122],
    [229, 80, 100],
    [251, 135, 97],
    [254, 194, 135],
    [252, 253, 191],
];

const GRAY: [Rgb; 2] = [[0, 0, 0], [255, 255, 255]];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScale {
    #[default]
    Viridis,
    Plasma,
    Magma,
    Gray,
}

impl ColorScale {
    fn stops(self) -> &'static [Rgb] {
        match self {
            Self::Viridis => &VIRIDIS,
            Self::Plasma => &PLASMA,
            Self::Magma => &MAGMA,
            Self::Gray => &GRAY,
        }
    }

    /// Color at `t`, clamped to `[0, 1]`. NaN maps to the low end.
    #[must_use]
    pub fn color_at(self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let stops = self.stops();
        let segments = (stops.len() - 1) as f64;
        let position = t * segments;
        let index = (position.floor() as usize).min(stops.len() - 2);
        let frac = position - index as f64;

        let low = stops[index];
        let high = stops[index + 1];
        let mut out = [0u8; 3];
        for channel in 0..3 {
            let a = f64::from(low[channel]);
            let b = f64::from(high[channel]);
            out[channel] = (a + (b - a) * frac).round() as u8;
        }
        out
    }
}
