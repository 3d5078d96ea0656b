// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Image(String),
    Config(String),
    Input(InputError),
}

/// Configuration errors detected before any ordering or reconstruction begins.
///
/// These are reported to the caller, never silently truncated. Out-of-range
/// step and seek targets are not errors: they are clamped by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// The image or coefficient grid has no pixels.
    ZeroSize,

    /// The matrix is not square.
    NonSquare { rows: usize, cols: usize },

    /// The pixel matrix and the coefficient grid disagree on the side length.
    SizeMismatch { image: usize, spectrum: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::ZeroSize => write!(f, "image size must be positive"),
            InputError::NonSquare { rows, cols } => {
                write!(f, "expected a square matrix, got {}x{}", rows, cols)
            }
            InputError::SizeMismatch { image, spectrum } => write!(
                f,
                "image is {0}x{0} but coefficient grid is {1}x{1}",
                image, spectrum
            ),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Input(e) => write!(f, "Input Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<InputError> for Error {
    fn from(err: InputError) -> Self {
        Error::Input(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
