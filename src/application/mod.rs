// SPDX-License-Identifier: MPL-2.0
//! Application layer - collaborator interfaces the engine is wired against.
//!
//! - [`port`]: the [`Renderer`](port::Renderer) trait and the [`FrameView`](port::FrameView) it receives

pub mod port;

pub use port::{FrameView, Renderer};
