// SPDX-License-Identifier: MPL-2.0
//! Reconstruction engine: synthesis, display mapping and accumulated state.
//!
//! Every reconstruction step consumes one coordinate of the
//! [`FrequencyOrder`](crate::domain::FrequencyOrder), synthesizes its real
//! layer, adds it to the image and recolors the overlay.

pub mod brightness;
pub mod colormap;
pub mod overlay;
mod state;
pub mod synth;

pub use brightness::{BrightnessMapper, DisplayRange};
pub use colormap::{ColorScale, Rgb};
pub use overlay::{OverlayPalette, VisitedOverlay};
pub use state::{LayerPreview, ReconstructionState};

use crate::domain::OrderingStrategy;

/// Visual tuning for one session, passed in explicitly so that sessions with
/// different settings can coexist.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineSettings {
    pub strategy: OrderingStrategy,
    pub brightness: BrightnessMapper,
    pub palette: OverlayPalette,
}
