// SPDX-License-Identifier: MPL-2.0
//! Renderer that writes each frame as a four-panel PNG.
//!
//! Panels, left to right:
//!
//! 1. The original image
//! 2. The latest sinusoid layer, normalized by its display range
//! 3. The frequency-shifted spectrum overlay with the highlighted cell
//! 4. The running reconstruction
//!
//! Every frame overwrites `latest.png` in the output directory. With a save
//! interval configured, numbered snapshots are kept as well. The frame that
//! completes the order also writes the bare reconstruction as a grayscale
//! `reconstruction.png`.

use crate::application::port::{FrameView, Renderer};
use crate::error::Result;
use crate::media::image::{clamp_to_u8, pixels_to_luma};
use crate::reconstruction::Rgb;
use image_rs::RgbImage;
use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};

/// File overwritten on every frame.
pub const LATEST_FRAME: &str = "latest.png";

/// Grayscale reconstruction, written once the order is exhausted.
pub const FINAL_RECONSTRUCTION: &str = "reconstruction.png";

/// Color of the overlay cell consumed last.
pub const HIGHLIGHT_COLOR: Rgb = [255, 0, 0];

/// Number of side-by-side panels in a composed frame.
const PANELS: usize = 4;

/// Writes composed frames into a directory.
#[derive(Debug)]
pub struct PngFrameRenderer {
    original: Array2<f64>,
    output_dir: PathBuf,
    save_every: Option<usize>,
    frames_rendered: usize,
    last_error: Option<String>,
}

impl PngFrameRenderer {
    /// Creates the output directory if needed.
    pub fn new<P: Into<PathBuf>>(original: Array2<f64>, output_dir: P) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self {
            original,
            output_dir,
            save_every: None,
            frames_rendered: 0,
            last_error: None,
        })
    }

    /// Also keeps `frame_NNNNNN.png` whenever the cursor is a multiple of
    /// `every`, and for the final frame. Zero disables snapshots.
    #[must_use]
    pub fn with_snapshots(mut self, every: usize) -> Self {
        self.save_every = (every > 0).then_some(every);
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    /// Message of the most recent failed write, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Lays the four panels out side by side.
    #[must_use]
    pub fn compose(&self, frame: &FrameView<'_>) -> RgbImage {
        let (rows, cols) = frame.reconstruction.dim();
        let mut canvas = RgbImage::new((cols * PANELS) as u32, rows as u32);

        let panels: [&dyn Fn(usize, usize) -> Rgb; PANELS] = [
            &|r, c| gray(self.original.get((r, c)).copied().unwrap_or(0.0)),
            &|r, c| gray(frame.layer_range.normalize(frame.layer[[r, c]]) * 255.0),
            &|r, c| {
                if (r, c) == frame.highlight {
                    HIGHLIGHT_COLOR
                } else {
                    frame.overlay[[r, c]]
                }
            },
            &|r, c| gray(frame.reconstruction[[r, c]]),
        ];

        for (panel, color_at) in panels.iter().enumerate() {
            let x_offset = panel * cols;
            for r in 0..rows {
                for c in 0..cols {
                    canvas.put_pixel(
                        (x_offset + c) as u32,
                        r as u32,
                        image_rs::Rgb(color_at(r, c)),
                    );
                }
            }
        }
        canvas
    }

    fn write_frame(&self, frame: &FrameView<'_>) -> Result<()> {
        let canvas = self.compose(frame);
        canvas.save(self.output_dir.join(LATEST_FRAME))?;

        if let Some(every) = self.save_every {
            if frame.cursor % every == 0 || frame.cursor == frame.total_steps {
                let name = format!("frame_{:06}.png", frame.cursor);
                canvas.save(self.output_dir.join(name))?;
            }
        }

        if frame.cursor == frame.total_steps {
            pixels_to_luma(frame.reconstruction)
                .save(self.output_dir.join(FINAL_RECONSTRUCTION))?;
        }
        Ok(())
    }
}

impl Renderer for PngFrameRenderer {
    fn render(&mut self, frame: &FrameView<'_>) {
        log::trace!(
            "{} ({}/{})",
            frame.label,
            frame.cursor,
            frame.total_steps
        );
        match self.write_frame(frame) {
            Ok(()) => {
                self.frames_rendered += 1;
                self.last_error = None;
            }
            Err(err) => {
                log::warn!(
                    "Failed to write frame {} to {}: {}",
                    frame.cursor,
                    self.output_dir.display(),
                    err
                );
                self.last_error = Some(err.to_string());
            }
        }
    }
}

fn gray(value: f64) -> Rgb {
    let v = clamp_to_u8(value);
    [v, v, v]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruction::{EngineSettings, ReconstructionState};
    use crate::spectrum::CoefficientGrid;
    use tempfile::tempdir;

    fn checker(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, n), |(r, c)| if (r + c) % 2 == 0 { 200.0 } else { 40.0 })
    }

    fn state_for(pixels: &Array2<f64>) -> ReconstructionState {
        let grid = CoefficientGrid::forward(pixels).expect("square image");
        ReconstructionState::new(grid, &EngineSettings::default())
    }

    #[test]
    fn compose_places_four_panels_side_by_side() {
        let dir = tempdir().expect("failed to create temp dir");
        let pixels = checker(5);
        let renderer = PngFrameRenderer::new(pixels.clone(), dir.path()).expect("renderer");
        let mut state = state_for(&pixels);
        state.seek_to(state.total_steps());

        let canvas = renderer.compose(&state.frame());
        assert_eq!(canvas.dimensions(), (20, 5));

        // Original panel and the fully reconstructed panel agree.
        for r in 0..5u32 {
            for c in 0..5u32 {
                assert_eq!(canvas.get_pixel(c, r), canvas.get_pixel(15 + c, r));
            }
        }
    }

    #[test]
    fn compose_marks_the_highlighted_cell() {
        let dir = tempdir().expect("failed to create temp dir");
        let pixels = checker(4);
        let renderer = PngFrameRenderer::new(pixels.clone(), dir.path()).expect("renderer");
        let mut state = state_for(&pixels);
        state.apply_next();

        let frame = state.frame();
        let (r, c) = frame.highlight;
        let canvas = renderer.compose(&frame);
        assert_eq!(
            canvas.get_pixel((8 + c) as u32, r as u32).0,
            HIGHLIGHT_COLOR
        );
    }

    #[test]
    fn render_writes_latest_and_snapshots() {
        let dir = tempdir().expect("failed to create temp dir");
        let pixels = checker(4);
        let mut renderer = PngFrameRenderer::new(pixels.clone(), dir.path())
            .expect("renderer")
            .with_snapshots(2);
        let mut state = state_for(&pixels);

        for _ in 0..3 {
            state.apply_next();
            renderer.render(&state.frame());
        }

        assert_eq!(renderer.frames_rendered(), 3);
        assert!(renderer.last_error().is_none());
        assert!(dir.path().join(LATEST_FRAME).exists());
        assert!(dir.path().join("frame_000002.png").exists());
        assert!(!dir.path().join("frame_000001.png").exists());
        assert!(!dir.path().join("frame_000003.png").exists());
        assert!(!dir.path().join(FINAL_RECONSTRUCTION).exists());
    }

    #[test]
    fn completed_order_writes_grayscale_reconstruction() {
        let dir = tempdir().expect("failed to create temp dir");
        let pixels = checker(5);
        let mut renderer = PngFrameRenderer::new(pixels.clone(), dir.path()).expect("renderer");
        let mut state = state_for(&pixels);
        state.seek_to(state.total_steps());
        renderer.render(&state.frame());

        let saved = image_rs::open(dir.path().join(FINAL_RECONSTRUCTION))
            .expect("reconstruction written")
            .to_luma8();
        assert_eq!(saved.dimensions(), (5, 5));
        assert_eq!(saved.get_pixel(0, 0).0[0], 200);
        assert_eq!(saved.get_pixel(1, 0).0[0], 40);
    }

    #[test]
    fn render_failure_is_recorded_not_propagated() {
        let dir = tempdir().expect("failed to create temp dir");
        let pixels = checker(2);
        let out = dir.path().join("out");
        let mut renderer = PngFrameRenderer::new(pixels.clone(), &out).expect("renderer");
        fs::remove_dir_all(&out).expect("remove output dir");

        let state = state_for(&pixels);
        renderer.render(&state.frame());

        assert_eq!(renderer.frames_rendered(), 0);
        assert!(renderer.last_error().is_some());
    }
}
