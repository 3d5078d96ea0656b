// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for the collaborators around the engine.
//!
//! The engine pushes [`FrameView`]s to a [`Renderer`] after every completed
//! playback operation. How often a renderer actually redraws is its own
//! concern.
//!
//! # Design Notes
//!
//! - Frames borrow the engine's buffers; renderers copy what they keep
//! - Rendering failures are the renderer's to report; the engine never retries

use crate::reconstruction::{DisplayRange, Rgb};
use ndarray::Array2;

/// Everything a renderer needs to draw the current reconstruction.
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    /// Accumulated image, nominally in `[0, 255]`.
    pub reconstruction: &'a Array2<f64>,

    /// Most recent single-frequency layer.
    pub layer: &'a Array2<f64>,

    /// Display range for [`layer`](Self::layer).
    pub layer_range: DisplayRange,

    /// Status line, e.g. `"Sinusoid freq x=1 y=-2"`.
    pub label: String,

    /// Frequency-shifted spectrum colors with visited cells recolored.
    pub overlay: &'a Array2<Rgb>,

    /// `(row, col)` of the overlay cell consumed last.
    pub highlight: (usize, usize),

    /// Steps applied so far.
    pub cursor: usize,

    /// Length of the visiting order.
    pub total_steps: usize,
}

/// Receives frames from the playback driver.
pub trait Renderer {
    fn render(&mut self, frame: &FrameView<'_>);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, frame: &FrameView<'_>) {
        (**self).render(frame);
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, frame: &FrameView<'_>) {
        (**self).render(frame);
    }
}
