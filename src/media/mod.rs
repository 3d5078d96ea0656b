// SPDX-License-Identifier: MPL-2.0
//! Media loading for the reconstruction engine.

pub mod image;

pub use image::{load_grayscale, luma_to_pixels, pixels_to_luma};
