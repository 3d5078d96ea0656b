// SPDX-License-Identifier: MPL-2.0
//! This module handles the session configuration stored in a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[image]` - Working size of the square image
//! - `[ordering]` - Frequency visiting strategy
//! - `[playback]` - Burst cadence, autoplay and input mode
//! - `[display]` - Layer brightness tuning and overlay color scales
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with explicit path, or pass a directory to
//!    `load_with_override()`
//! 2. Set `DFT_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use dft_lens::config;
//!
//! let (config, warning) = config::load_with_override(None);
//! if let Some(warning) = warning {
//!     eprintln!("{warning}");
//! }
//! println!("{} steps per tick", config.playback_settings().steps_per_tick.value());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::{
    BrightnessBias, BrightnessFactor, ImageSize, OrderingStrategy, StepsPerTick, TickInterval,
};
use crate::error::{Error, Result};
use crate::playback::PlaybackSettings;
use crate::reconstruction::{BrightnessMapper, ColorScale, EngineSettings, OverlayPalette};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "DftLens";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "DFT_LENS_CONFIG_DIR";

// =============================================================================
// Enums
// =============================================================================

/// Which input policy the binary wires up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackMode {
    /// Timed bursts only.
    #[default]
    Burst,
    /// One step per trigger.
    Step,
    /// Absolute positions.
    Seek,
}

impl std::str::FromStr for PlaybackMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "burst" => Ok(Self::Burst),
            "step" => Ok(Self::Step),
            "seek" => Ok(Self::Seek),
            other => Err(Error::Config(format!(
                "unknown playback mode '{other}' (expected burst, step or seek)"
            ))),
        }
    }
}

// =============================================================================
// Section Structs
// =============================================================================

/// Image acquisition settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageConfig {
    /// Side length the input image is resized to.
    #[serde(default = "default_image_size", skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            size: default_image_size(),
        }
    }
}

/// Frequency ordering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<OrderingStrategy>,
}

/// Playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Components applied per burst tick.
    #[serde(
        default = "default_steps_per_tick",
        skip_serializing_if = "Option::is_none"
    )]
    pub steps_per_tick: Option<usize>,

    /// Delay between burst ticks, in milliseconds.
    #[serde(
        default = "default_tick_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub tick_interval_ms: Option<u64>,

    /// Burst through the whole order on start.
    #[serde(default = "default_autoplay", skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    /// Input policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<PlaybackMode>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            steps_per_tick: default_steps_per_tick(),
            tick_interval_ms: default_tick_interval_ms(),
            autoplay: default_autoplay(),
            mode: Some(PlaybackMode::default()),
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(
        default = "default_brightness_bias",
        skip_serializing_if = "Option::is_none"
    )]
    pub brightness_bias: Option<f64>,

    #[serde(
        default = "default_brightness_factor",
        skip_serializing_if = "Option::is_none"
    )]
    pub brightness_factor: Option<f64>,

    /// Color scale of spectrum cells not yet consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unvisited_colormap: Option<ColorScale>,

    /// Color scale of consumed spectrum cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited_colormap: Option<ColorScale>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let palette = OverlayPalette::default();
        Self {
            brightness_bias: default_brightness_bias(),
            brightness_factor: default_brightness_factor(),
            unvisited_colormap: Some(palette.unvisited),
            visited_colormap: Some(palette.visited),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub image: ImageConfig,

    #[serde(default)]
    pub ordering: OrderingConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Validated working size. A configured size of zero is rejected.
    pub fn image_size(&self) -> Result<ImageSize> {
        Ok(ImageSize::new(self.image.size.unwrap_or(DEFAULT_IMAGE_SIZE))?)
    }

    /// Engine tuning, with out-of-range values clamped.
    #[must_use]
    pub fn engine_settings(&self) -> EngineSettings {
        let palette = OverlayPalette::default();
        EngineSettings {
            strategy: self.ordering.strategy.unwrap_or_default(),
            brightness: BrightnessMapper::new(
                self.display
                    .brightness_bias
                    .map(BrightnessBias::new)
                    .unwrap_or_default(),
                self.display
                    .brightness_factor
                    .map(BrightnessFactor::new)
                    .unwrap_or_default(),
            ),
            palette: OverlayPalette {
                unvisited: self.display.unvisited_colormap.unwrap_or(palette.unvisited),
                visited: self.display.visited_colormap.unwrap_or(palette.visited),
            },
        }
    }

    /// Burst cadence, with out-of-range values clamped.
    #[must_use]
    pub fn playback_settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            steps_per_tick: self
                .playback
                .steps_per_tick
                .map(StepsPerTick::new)
                .unwrap_or_default(),
            tick_interval: self
                .playback
                .tick_interval_ms
                .map(TickInterval::from_millis)
                .unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.playback.autoplay.unwrap_or(DEFAULT_AUTOPLAY)
    }

    #[must_use]
    pub fn mode(&self) -> PlaybackMode {
        self.playback.mode.unwrap_or_default()
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_image_size() -> Option<usize> {
    Some(DEFAULT_IMAGE_SIZE)
}

fn default_steps_per_tick() -> Option<usize> {
    Some(DEFAULT_STEPS_PER_TICK)
}

fn default_tick_interval_ms() -> Option<u64> {
    Some(DEFAULT_TICK_INTERVAL_MS)
}

fn default_autoplay() -> Option<bool> {
    Some(DEFAULT_AUTOPLAY)
}

fn default_brightness_bias() -> Option<f64> {
    Some(DEFAULT_BRIGHTNESS_BIAS)
}

fn default_brightness_factor() -> Option<f64> {
    Some(DEFAULT_BRIGHTNESS_FACTOR)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory: explicit override, then environment, then platform default.
fn get_config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if base_dir.is_some() {
        return base_dir;
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from `base_dir`, or from the default directory
/// when `None`.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("{}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================
