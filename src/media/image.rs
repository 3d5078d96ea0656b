// SPDX-License-Identifier: MPL-2.0
//! Grayscale image acquisition and conversion to pixel matrices.
//!
//! Any raster format supported by the `image` crate is accepted. Color input
//! is converted to 8-bit luma and resampled to the working size, so the
//! engine only ever sees a square `N x N` matrix of values in `[0, 255]`.

use crate::domain::ImageSize;
use crate::error::Result;
use image_rs::imageops::FilterType;
use image_rs::{GrayImage, Luma};
use ndarray::Array2;
use std::path::Path;

/// Loads an image as a square grayscale matrix of side `size`.
///
/// Images that are already `size x size` are not resampled.
pub fn load_grayscale<P: AsRef<Path>>(path: P, size: ImageSize) -> Result<Array2<f64>> {
    let luma = image_rs::open(path.as_ref())?.to_luma8();
    let side = u32::try_from(size.get()).unwrap_or(u32::MAX);
    let luma = if luma.dimensions() == (side, side) {
        luma
    } else {
        image_rs::imageops::resize(&luma, side, side, FilterType::Triangle)
    };
    Ok(luma_to_pixels(&luma))
}

/// Row-major pixel matrix of an 8-bit luma image.
#[must_use]
pub fn luma_to_pixels(luma: &GrayImage) -> Array2<f64> {
    let (width, height) = luma.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
        f64::from(luma.get_pixel(c as u32, r as u32).0[0])
    })
}

/// 8-bit luma image of a pixel matrix, rounding and clamping to `[0, 255]`.
#[must_use]
pub fn pixels_to_luma(pixels: &Array2<f64>) -> GrayImage {
    let (rows, cols) = pixels.dim();
    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        Luma([clamp_to_u8(pixels[[y as usize, x as usize]])])
    })
}

/// Rounds to the nearest byte. NaN maps to black.
#[must_use]
pub fn clamp_to_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}
