// SPDX-License-Identifier: MPL-2.0
//! Color-coded magnitude spectrum tracking which coefficients have been consumed.
//!
//! The spectrum is displayed log-scaled and frequency-shifted, so that the
//! zero-frequency coefficient sits at the array center `(N/2, N/2)`.

use super::colormap::{ColorScale, Rgb};
use crate::domain::{FrequencyCoord, ImageSize};
use crate::spectrum::CoefficientGrid;
use ndarray::Array2;

/// Color scales used for unvisited and visited spectrum cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayPalette {
    pub unvisited: ColorScale,
    pub visited: ColorScale,
}

impl Default for OverlayPalette {
    fn default() -> Self {
        Self {
            unvisited: ColorScale::Viridis,
            visited: ColorScale::Plasma,
        }
    }
}

/// Overlay of the magnitude spectrum with consumed cells recolored.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitedOverlay {
    size: ImageSize,
    palette: OverlayPalette,
    /// Shifted `log10(|F| + 1)`, scaled into `[0, 1]`.
    normalized: Array2<f64>,
    base: Array2<Rgb>,
    colors: Array2<Rgb>,
    visited: Array2<bool>,
    visited_count: usize,
    /// `(row, col)` of the marker drawn over the latest coordinate.
    highlight: (usize, usize),
}

impl VisitedOverlay {
    #[must_use]
    pub fn new(grid: &CoefficientGrid, palette: OverlayPalette) -> Self {
        let size = grid.size();
        let normalized = shifted_log_magnitude(grid);
        let base = normalized.mapv(|t| palette.unvisited.color_at(t));

        Self {
            size,
            palette,
            colors: base.clone(),
            base,
            normalized,
            visited: Array2::from_elem((size.get(), size.get()), false),
            visited_count: 0,
            highlight: center(size),
        }
    }

    /// Restores the all-unvisited colors and centers the highlight.
    pub fn reset(&mut self) {
        self.colors.assign(&self.base);
        self.visited.fill(false);
        self.visited_count = 0;
        self.highlight = center(self.size);
    }

    /// Array `(row, col)` of a signed frequency: `(coord + N/2) mod N` per axis.
    #[must_use]
    pub fn index_of(&self, coord: FrequencyCoord) -> (usize, usize) {
        let n = self.size.get() as i64;
        let half = self.size.half() as i64;
        let row = (coord.y + half).rem_euclid(n) as usize;
        let col = (coord.x + half).rem_euclid(n) as usize;
        (row, col)
    }

    /// Recolors one cell with the visited scale. Marking twice has no further effect.
    pub fn mark_visited(&mut self, coord: FrequencyCoord) {
        let index = self.index_of(coord);
        if self.visited[index] {
            return;
        }
        self.visited[index] = true;
        self.visited_count += 1;
        self.colors[index] = self.palette.visited.color_at(self.normalized[index]);
    }

    /// Moves the highlight marker onto `coord`.
    pub fn highlight(&mut self, coord: FrequencyCoord) {
        self.highlight = self.index_of(coord);
    }

    #[must_use]
    pub fn is_visited(&self, coord: FrequencyCoord) -> bool {
        self.visited[self.index_of(coord)]
    }

    /// Number of distinct recolored cells.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    #[must_use]
    pub fn colors(&self) -> &Array2<Rgb> {
        &self.colors
    }

    #[must_use]
    pub fn highlight_index(&self) -> (usize, usize) {
        self.highlight
    }
}

fn center(size: ImageSize) -> (usize, usize) {
    (size.half(), size.half())
}

/// `log10(|F| + 1) / max`, rolled by `N/2` on both axes.
fn shifted_log_magnitude(grid: &CoefficientGrid) -> Array2<f64> {
    let n = grid.size().get();
    let half = grid.size().half();
    let log = grid.magnitudes().mapv(|m| (m + 1.0).log10());
    let max = log.iter().copied().fold(0.0_f64, f64::max);
    let scale = if max > 0.0 { 1.0 / max } else { 0.0 };

    Array2::from_shape_fn((n, n), |(r, c)| {
        log[[(r + n - half) % n, (c + n - half) % n]] * scale
    })
}
