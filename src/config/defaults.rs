// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Image**: Square working size
//! - **Playback**: Burst cadence
//! - **Display**: Layer brightness remap

use crate::domain::newtypes::{brightness_bounds, steps_per_tick_bounds, tick_interval_bounds};

// ==========================================================================
// Image Defaults
// ==========================================================================

/// Default side length the input image is resized to.
pub const DEFAULT_IMAGE_SIZE: usize = 256;

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Default number of components applied per burst tick.
pub const DEFAULT_STEPS_PER_TICK: usize = steps_per_tick_bounds::DEFAULT;

/// Default delay between burst ticks (in milliseconds).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = tick_interval_bounds::DEFAULT_MS;

/// Whether a burst through the whole order starts on load.
pub const DEFAULT_AUTOPLAY: bool = true;

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Default exponent denominator of the layer brightness power law.
pub const DEFAULT_BRIGHTNESS_BIAS: f64 = brightness_bounds::DEFAULT_BIAS;

/// Default gain of the layer brightness power law.
pub const DEFAULT_BRIGHTNESS_FACTOR: f64 = brightness_bounds::DEFAULT_FACTOR;
