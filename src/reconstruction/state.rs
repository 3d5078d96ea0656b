// SPDX-License-Identifier: MPL-2.0
//! Accumulating reconstruction driven by the frequency visiting order.
//!
//! The state owns the evolving image, the visited overlay and the preview of
//! the most recent layer. Two access patterns are supported and always agree:
//!
//! - incremental: [`ReconstructionState::apply_step`] with the next index
//! - direct: [`ReconstructionState::seek_to`], a full replay from a reset

use super::brightness::{BrightnessMapper, DisplayRange, FULL_RANGE};
use super::overlay::VisitedOverlay;
use super::synth::{hermitian_weight, layer};
use super::EngineSettings;
use crate::application::port::FrameView;
use crate::domain::{FrequencyCoord, FrequencyOrder, ImageSize};
use crate::error::Result;
use crate::spectrum::CoefficientGrid;
use ndarray::Array2;

/// The single-layer preview shown next to the reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPreview {
    layer: Array2<f64>,
    range: DisplayRange,
    coord: Option<FrequencyCoord>,
}

impl LayerPreview {
    fn neutral(size: ImageSize) -> Self {
        Self {
            layer: Array2::zeros((size.get(), size.get())),
            range: FULL_RANGE,
            coord: None,
        }
    }

    #[must_use]
    pub fn layer(&self) -> &Array2<f64> {
        &self.layer
    }

    #[must_use]
    pub fn range(&self) -> DisplayRange {
        self.range
    }

    /// Frequency of the previewed layer, `None` before the first step.
    #[must_use]
    pub fn coord(&self) -> Option<FrequencyCoord> {
        self.coord
    }

    /// Human-readable status line for the preview panel.
    #[must_use]
    pub fn label(&self) -> String {
        match self.coord {
            Some(coord) => format!("Sinusoid freq {}", coord),
            None => "Sinusoid".to_string(),
        }
    }
}

/// Reconstruction of one image, advanced step by step along a fixed order.
#[derive(Debug, Clone)]
pub struct ReconstructionState {
    grid: CoefficientGrid,
    order: FrequencyOrder,
    mapper: BrightnessMapper,
    accumulator: Array2<f64>,
    overlay: VisitedOverlay,
    preview: LayerPreview,
    cursor: usize,
}

impl ReconstructionState {
    /// Builds the visiting order and an empty reconstruction for `grid`.
    #[must_use]
    pub fn new(grid: CoefficientGrid, settings: &EngineSettings) -> Self {
        let size = grid.size();
        let order = FrequencyOrder::build(size, settings.strategy);
        let overlay = VisitedOverlay::new(&grid, settings.palette);

        Self {
            accumulator: Array2::zeros((size.get(), size.get())),
            preview: LayerPreview::neutral(size),
            cursor: 0,
            mapper: settings.brightness,
            grid,
            order,
            overlay,
        }
    }

    /// Like [`new`](Self::new), but first checks that `grid` is the transform
    /// of a matrix shaped like `pixels`.
    pub fn for_image(
        pixels: &Array2<f64>,
        grid: CoefficientGrid,
        settings: &EngineSettings,
    ) -> Result<Self> {
        grid.ensure_matches(pixels)?;
        Ok(Self::new(grid, settings))
    }

    /// Zeroes the image, rewinds the cursor and clears the overlay and preview.
    pub fn reset(&mut self) {
        self.accumulator.fill(0.0);
        self.cursor = 0;
        self.overlay.reset();
        self.preview = LayerPreview::neutral(self.grid.size());
    }

    /// Applies ordered step `index`, which must equal the current cursor.
    ///
    /// Returns the consumed coordinate, or `None` when `index` is not the next
    /// step or the order is exhausted. Nothing changes in that case.
    pub fn apply_step(&mut self, index: usize) -> Option<FrequencyCoord> {
        if index != self.cursor {
            log::debug!(
                "ignoring out-of-sequence step {} (cursor at {})",
                index,
                self.cursor
            );
            return None;
        }
        let coord = self.order.get(index)?;
        let size = self.grid.size();

        let coefficient = self.grid.coefficient(coord) * hermitian_weight(coord);
        let layer = layer(size, coord, coefficient);
        self.accumulator += &layer;

        self.overlay.mark_visited(coord);
        self.overlay.mark_visited(coord.mirrored());
        self.overlay.highlight(coord);

        self.preview = LayerPreview {
            range: self.mapper.range(coord, coefficient, size),
            layer,
            coord: Some(coord),
        };
        self.cursor += 1;

        log::trace!("applied step {} at {}", index, coord);
        Some(coord)
    }

    /// Applies the step at the cursor.
    pub fn apply_next(&mut self) -> Option<FrequencyCoord> {
        self.apply_step(self.cursor)
    }

    /// Rebuilds the state with exactly the first `target` steps applied.
    ///
    /// `target` is clamped to `[0, total_steps]`. This is always a full replay
    /// from a reset, so seeking backwards is as valid as seeking forwards.
    /// Returns the clamped target.
    pub fn seek_to(&mut self, target: usize) -> usize {
        let target = target.min(self.total_steps());
        self.reset();
        for index in 0..target {
            self.apply_step(index);
        }
        target
    }

    /// Steps applied so far.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor == self.total_steps()
    }

    #[must_use]
    pub fn size(&self) -> ImageSize {
        self.grid.size()
    }

    #[must_use]
    pub fn order(&self) -> &FrequencyOrder {
        &self.order
    }

    #[must_use]
    pub fn grid(&self) -> &CoefficientGrid {
        &self.grid
    }

    #[must_use]
    pub fn accumulator(&self) -> &Array2<f64> {
        &self.accumulator
    }

    #[must_use]
    pub fn overlay(&self) -> &VisitedOverlay {
        &self.overlay
    }

    #[must_use]
    pub fn preview(&self) -> &LayerPreview {
        &self.preview
    }

    /// Snapshot handed to a renderer.
    #[must_use]
    pub fn frame(&self) -> FrameView<'_> {
        FrameView {
            reconstruction: &self.accumulator,
            layer: &self.preview.layer,
            layer_range: self.preview.range,
            label: self.preview.label(),
            overlay: self.overlay.colors(),
            highlight: self.overlay.highlight_index(),
            cursor: self.cursor,
            total_steps: self.total_steps(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderingStrategy;
    use crate::test_utils::{assert_abs_diff_eq, F64_EPSILON, PIXEL_EPSILON};

    fn ramp_image(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, n), |(r, c)| ((r * 37 + c * 101 + r * c * 13) % 256) as f64)
    }

    fn state_for(pixels: &Array2<f64>) -> ReconstructionState {
        let grid = CoefficientGrid::forward(pixels).unwrap();
        ReconstructionState::for_image(pixels, grid, &EngineSettings::default()).unwrap()
    }

    fn assert_images_close(a: &Array2<f64>, b: &Array2<f64>, epsilon: f64) {
        assert_eq!(a.dim(), b.dim());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_abs_diff_eq!(*x, *y, epsilon = epsilon);
        }
    }

    #[test]
    fn fresh_state_is_empty() {
        let state = state_for(&ramp_image(6));
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.total_steps(), 18);
        assert!(state.accumulator().iter().all(|v| *v == 0.0));
        assert_eq!(state.overlay().visited_count(), 0);
        assert_eq!(state.preview().label(), "Sinusoid");
        assert_eq!(state.preview().range(), FULL_RANGE);
    }

    #[test]
    fn seek_to_zero_clears_everything() {
        let mut state = state_for(&ramp_image(5));
        let fresh = state.clone();
        state.seek_to(9);
        assert_eq!(state.seek_to(0), 0);

        assert!(state.accumulator().iter().all(|v| *v == 0.0));
        assert_eq!(state.overlay(), fresh.overlay());
        assert_eq!(state.preview(), fresh.preview());
    }

    #[test]
    fn full_replay_reconstructs_odd_sized_image() {
        for n in [1, 3, 5, 7] {
            let pixels = ramp_image(n);
            let mut state = state_for(&pixels);
            state.seek_to(state.total_steps());
            assert!(state.is_complete());
            assert_images_close(state.accumulator(), &pixels, PIXEL_EPSILON);
        }
    }

    #[test]
    fn full_replay_of_even_size_omits_nyquist_column() {
        let pixels = ramp_image(6);
        let grid = CoefficientGrid::forward(&pixels).unwrap();

        let mut without_nyquist = grid.as_array().clone();
        without_nyquist.column_mut(3).fill(Default::default());
        let expected = CoefficientGrid::from_array(without_nyquist)
            .unwrap()
            .inverse_real();

        let mut state = ReconstructionState::new(grid, &EngineSettings::default());
        state.seek_to(usize::MAX);
        assert_images_close(state.accumulator(), &expected, PIXEL_EPSILON);
    }

    #[test]
    fn even_image_without_nyquist_content_is_exact() {
        // Constant along rows: only the x = 0 column of the spectrum is populated.
        let pixels = Array2::from_shape_fn((8, 8), |(r, _)| (r * 30) as f64);
        let mut state = state_for(&pixels);
        state.seek_to(state.total_steps());
        assert_images_close(state.accumulator(), &pixels, PIXEL_EPSILON);
    }

    #[test]
    fn incremental_matches_seek_for_every_prefix() {
        let pixels = ramp_image(6);
        let mut incremental = state_for(&pixels);
        let mut seeker = incremental.clone();

        for n in 0..=incremental.total_steps() {
            seeker.seek_to(n);
            assert_eq!(incremental.cursor(), seeker.cursor());
            assert_images_close(incremental.accumulator(), seeker.accumulator(), 1e-12);
            assert_eq!(incremental.overlay(), seeker.overlay());
            assert_eq!(incremental.preview().coord(), seeker.preview().coord());
            assert_eq!(incremental.preview().range(), seeker.preview().range());
            incremental.apply_next();
        }
    }

    #[test]
    fn flat_image_dc_step_restores_average() {
        let mut raw = Array2::zeros((4, 4));
        raw[[0, 0]] = rustfft::num_complex::Complex64::new(128.0 * 16.0, 0.0);
        let grid = CoefficientGrid::from_array(raw).unwrap();
        let mut state = ReconstructionState::new(grid, &EngineSettings::default());

        state.seek_to(1);
        for value in state.accumulator().iter() {
            assert_abs_diff_eq!(*value, 128.0, epsilon = F64_EPSILON);
        }
        assert_eq!(state.preview().label(), "Sinusoid freq x=0 y=0");
        assert_eq!(state.preview().range(), FULL_RANGE);
    }

    #[test]
    fn overlay_recolors_at_most_two_cells_per_step() {
        let mut state = state_for(&ramp_image(8));
        for n in 1..=state.total_steps() {
            state.apply_next();
            let count = state.overlay().visited_count();
            assert!(count <= 2 * n, "{count} cells after {n} steps");
        }
    }

    #[test]
    fn step_marks_coordinate_and_its_mirror() {
        let mut state = state_for(&ramp_image(4));
        // Order for size 4 starts (0,0), (0,-1), (1,-1).
        state.seek_to(3);
        let overlay = state.overlay();
        assert!(overlay.is_visited(FrequencyCoord::new(1, -1)));
        assert!(overlay.is_visited(FrequencyCoord::new(-1, -1)));
        assert_eq!(overlay.visited_count(), 4);
        assert_eq!(
            overlay.highlight_index(),
            overlay.index_of(FrequencyCoord::new(1, -1))
        );
    }

    #[test]
    fn out_of_sequence_step_is_rejected() {
        let mut state = state_for(&ramp_image(4));
        assert_eq!(state.apply_step(3), None);
        assert_eq!(state.cursor(), 0);

        assert_eq!(state.apply_step(0), Some(FrequencyCoord::new(0, 0)));
        assert_eq!(state.apply_step(0), None);
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn apply_past_end_is_noop() {
        let mut state = state_for(&ramp_image(3));
        state.seek_to(state.total_steps());
        let done = state.accumulator().clone();

        assert_eq!(state.apply_next(), None);
        assert_eq!(state.accumulator(), &done);
        assert!(state.is_complete());
    }

    #[test]
    fn seek_clamps_and_can_move_backwards() {
        let pixels = ramp_image(5);
        let mut state = state_for(&pixels);
        assert_eq!(state.seek_to(1000), state.total_steps());

        let mut reference = state.clone();
        reference.seek_to(4);
        state.seek_to(4);
        assert_eq!(state.cursor(), 4);
        assert_images_close(state.accumulator(), reference.accumulator(), 0.0);
    }

    #[test]
    fn mismatched_image_and_grid_fail_fast() {
        let grid = CoefficientGrid::forward(&ramp_image(4)).unwrap();
        let result = ReconstructionState::for_image(&ramp_image(5), grid, &EngineSettings::default());
        assert!(result.is_err());
    }

    #[test]
    fn final_image_is_independent_of_strategy() {
        let pixels = ramp_image(7);
        let grid = CoefficientGrid::forward(&pixels).unwrap();
        let euclidean = EngineSettings {
            strategy: OrderingStrategy::Euclidean,
            ..EngineSettings::default()
        };

        let mut a = ReconstructionState::new(grid.clone(), &EngineSettings::default());
        let mut b = ReconstructionState::new(grid, &euclidean);
        a.seek_to(usize::MAX);
        b.seek_to(usize::MAX);
        assert_images_close(a.accumulator(), b.accumulator(), PIXEL_EPSILON);
    }

    #[test]
    fn frame_reflects_current_state() {
        let mut state = state_for(&ramp_image(4));
        state.seek_to(2);
        let frame = state.frame();
        assert_eq!(frame.cursor, 2);
        assert_eq!(frame.total_steps, 8);
        assert_eq!(frame.label, "Sinusoid freq x=0 y=-1");
        assert_eq!(frame.overlay.dim(), (4, 4));
    }
}
