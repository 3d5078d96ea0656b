// SPDX-License-Identifier: MPL-2.0
//! Coefficient grid of a square real image, and the 2D transform that produces it.
//!
//! The transform is the standard unnormalized DFT, `F[ky, kx] = Σ f[r, c] ·
//! exp(-2πi (ky·r + kx·c) / N)`, computed separably (rows, then columns) with
//! `rustfft`. Signed frequency coordinates index the grid modulo `N`.

use crate::domain::{FrequencyCoord, ImageSize};
use crate::error::{InputError, Result};
use ndarray::{Array2, ArrayView1, Axis};
use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// The N×N complex spectrum of an N×N real image. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientGrid {
    size: ImageSize,
    coefficients: Array2<Complex64>,
}

impl CoefficientGrid {
    /// Wraps an existing coefficient matrix supplied by an external transform.
    pub fn from_array(coefficients: Array2<Complex64>) -> Result<Self> {
        let (rows, cols) = coefficients.dim();
        let size = ImageSize::from_shape(rows, cols)?;
        Ok(Self { size, coefficients })
    }

    /// Computes the forward DFT of a square pixel matrix.
    pub fn forward(pixels: &Array2<f64>) -> Result<Self> {
        let (rows, cols) = pixels.dim();
        let size = ImageSize::from_shape(rows, cols)?;
        let mut coefficients = pixels.mapv(|v| Complex64::new(v, 0.0));

        let fft = FftPlanner::<f64>::new().plan_fft_forward(size.get());
        transform_in_place(&mut coefficients, &fft);

        Ok(Self { size, coefficients })
    }

    #[must_use]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    #[must_use]
    pub fn as_array(&self) -> &Array2<Complex64> {
        &self.coefficients
    }

    /// Coefficient stored for a signed frequency, wrapping negative indices.
    ///
    /// The row is the vertical frequency `y`, the column the horizontal `x`.
    #[must_use]
    pub fn coefficient(&self, coord: FrequencyCoord) -> Complex64 {
        let n = self.size.get() as i64;
        let row = coord.y.rem_euclid(n) as usize;
        let col = coord.x.rem_euclid(n) as usize;
        self.coefficients[[row, col]]
    }

    /// `|F|` for every coefficient.
    #[must_use]
    pub fn magnitudes(&self) -> Array2<f64> {
        self.coefficients.mapv(Complex64::norm)
    }

    /// Real part of the normalized inverse transform.
    #[must_use]
    pub fn inverse_real(&self) -> Array2<f64> {
        let mut data = self.coefficients.clone();
        let ifft = FftPlanner::<f64>::new().plan_fft_inverse(self.size.get());
        transform_in_place(&mut data, &ifft);

        let area = self.size.area();
        data.mapv(|c| c.re / area)
    }

    /// Checks that this grid belongs to a pixel matrix of the given shape.
    pub fn ensure_matches(&self, pixels: &Array2<f64>) -> Result<()> {
        let (rows, cols) = pixels.dim();
        let image = ImageSize::from_shape(rows, cols)?;
        if image != self.size {
            return Err(InputError::SizeMismatch {
                image: image.get(),
                spectrum: self.size.get(),
            }
            .into());
        }
        Ok(())
    }
}

/// Applies a 1D transform along every row, then along every column.
fn transform_in_place(data: &mut Array2<Complex64>, fft: &Arc<dyn Fft<f64>>) {
    let mut buffer = Vec::with_capacity(data.nrows().max(data.ncols()));
    for axis in [Axis(1), Axis(0)] {
        for mut lane in data.lanes_mut(axis) {
            buffer.clear();
            buffer.extend(lane.iter().copied());
            fft.process(&mut buffer);
            lane.assign(&ArrayView1::from(buffer.as_slice()));
        }
    }
}
