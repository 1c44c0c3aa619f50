//! Procedural spiral galaxy point clouds and an interactive wgpu viewer.
//!
//! The [`galaxy`] module is the renderer-independent core: a parameter set,
//! a generator that turns it into index-aligned position and color buffers,
//! and the handle/slot model that keeps at most one generated galaxy alive in
//! a [`galaxy::Scene`]. [`rendering`] and [`app`] provide the GPU scene,
//! orbit camera and event loop around it.

pub mod app;
pub mod config;
pub mod error;
pub mod galaxy;
pub mod rendering;

pub use error::{AppError, GalaxyError, GalaxyResult, RenderError, RenderResult};
