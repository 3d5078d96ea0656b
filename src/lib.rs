// SPDX-License-Identifier: MPL-2.0
//! `dft_lens` rebuilds a grayscale image one Fourier component at a time.
//!
//! The image's 2D discrete Fourier transform is consumed in a fixed
//! low-to-high frequency order. Each step adds one real sinusoid (a
//! coefficient and its conjugate mirror) to a running reconstruction, and
//! marks both cells on a visited overlay of the spectrum.
//!
//! # Layout
//!
//! - [`domain`]: Frequency coordinates, visiting order and validated newtypes
//! - [`spectrum`]: Forward and inverse 2D transforms
//! - [`reconstruction`]: Sinusoid synthesis, brightness, overlay and session state
//! - [`playback`]: Burst, step and seek policies over a scheduler
//! - [`application`]: Ports consumed by the engine (renderer)
//! - [`infrastructure`]: Concrete adapters (PNG frame output)
//! - [`media`]: Image acquisition
//! - [`config`]: `settings.toml` persistence

#![doc(html_root_url = "https://docs.rs/dft_lens/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod playback;
pub mod reconstruction;
pub mod spectrum;

#[cfg(test)]
pub(crate) mod test_utils;

pub use domain::{FrequencyCoord, FrequencyOrder, ImageSize, OrderingStrategy};
pub use error::{Error, Result};
pub use playback::{PlaybackDriver, PlaybackSettings};
pub use reconstruction::{EngineSettings, ReconstructionState};
pub use spectrum::CoefficientGrid;
