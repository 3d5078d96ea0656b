// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`png_renderer`]: Four-panel PNG frames (implements [`Renderer`])
//!
//! [`Renderer`]: crate::application::port::Renderer

pub mod png_renderer;

pub use png_renderer::PngFrameRenderer;
