//! Rendering-side helpers the host consumes
//!
//! The host owns the renderer. This module only derives camera framing
//! from the viewport.

pub mod camera;

pub use camera::{responsive_framing, Camera, Framing, Viewport};
