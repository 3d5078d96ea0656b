// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure value types shared by the reconstruction engine.
//!
//! # Modules
//!
//! - [`frequency`]: [`FrequencyCoord`](frequency::FrequencyCoord),
//!   [`OrderingStrategy`](frequency::OrderingStrategy) and the
//!   [`FrequencyOrder`](frequency::FrequencyOrder) visiting sequence
//! - [`newtypes`]: bounded session parameters ([`ImageSize`](newtypes::ImageSize),
//!   [`StepsPerTick`](newtypes::StepsPerTick), [`TickInterval`](newtypes::TickInterval))

pub mod frequency;
pub mod newtypes;

pub use frequency::{FrequencyCoord, FrequencyOrder, OrderingStrategy};
pub use newtypes::{BrightnessBias, BrightnessFactor, ImageSize, StepsPerTick, TickInterval};
