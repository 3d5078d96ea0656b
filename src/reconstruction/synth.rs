// SPDX-License-Identifier: MPL-2.0
//! Synthesis of the real image layer contributed by one frequency component.

use crate::domain::{FrequencyCoord, ImageSize};
use ndarray::Array2;
use rustfft::num_complex::Complex64;
use std::f64::consts::TAU;

/// Weight applied to a stored coefficient before synthesis.
///
/// Columns with `x != 0` stand in for their omitted conjugate mirror at `-x`,
/// so they count twice. The `x = 0` column balances itself (`y` against `-y`).
#[must_use]
pub fn hermitian_weight(coord: FrequencyCoord) -> f64 {
    if coord.x == 0 {
        1.0
    } else {
        2.0
    }
}

/// Real part of one inverse-transform term over the whole image.
///
/// `value[r, c] = Re[coefficient · exp(2πi/N · (x·c + y·r))] / N²`, with the
/// row index paired to the vertical frequency `y` and the column index to `x`.
/// The caller applies [`hermitian_weight`] to `coefficient` beforehand.
#[must_use]
pub fn layer(size: ImageSize, coord: FrequencyCoord, coefficient: Complex64) -> Array2<f64> {
    let n = size.get();
    let modulus = n as i64;
    let area = size.area();

    // The phase only depends on (x·c + y·r) mod N, so one table of N unit
    // phasors covers every pixel.
    let phasors: Vec<f64> = (0..n)
        .map(|k| {
            let theta = TAU * k as f64 / n as f64;
            (coefficient * Complex64::from_polar(1.0, theta)).re / area
        })
        .collect();

    Array2::from_shape_fn((n, n), |(r, c)| {
        let k = (coord.x * c as i64 + coord.y * r as i64).rem_euclid(modulus);
        phasors[k as usize]
    })
}
