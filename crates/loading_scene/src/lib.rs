//! # Loading Scene
//!
//! Frame-update core for an animated loading screen: a showcased model
//! gliding between anchors, a rising smoke field, a noise-displaced overlay
//! and a camera that adapts to portrait screens.
//!
//! ## Features
//!
//! - **Fog Field**: hundreds of smoke quads spawned inside a polygon
//!   footprint, rising and fading in a seamless loop
//! - **Showcase Cycle**: travel, rest, swap item, repeat
//! - **Responsive Camera**: framing derived from the viewport aspect ratio
//! - **Host Agnostic**: rendering and asset loading stay behind [`SceneHost`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loading_scene::prelude::*;
//! use rand::SeedableRng;
//!
//! struct MyHost;
//!
//! impl SceneHost for MyHost {
//!     fn load_texture(&mut self, _path: &str) -> Result<TextureHandle, HostError> {
//!         Ok(TextureHandle(1))
//!     }
//!
//!     fn request_item(&mut self, _index: usize, _item: &ShowcaseItem) -> Result<(), HostError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rng = rand::rngs::StdRng::from_entropy();
//!     let mut scene = LoadingScene::new(
//!         SceneConfig::default(),
//!         GpuTier(2),
//!         Viewport::new(1920, 1080),
//!         MyHost,
//!         rng,
//!     )?;
//!
//!     scene.on_loaded();
//!     scene.advance(1.0 / 60.0)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Scene configuration
pub mod core;
pub mod config;

pub mod foundation;
pub mod spatial;
pub mod effects;
pub mod showcase;
pub mod render;
pub mod host;

mod scene;

#[cfg(test)]
mod tests;

pub use host::{GpuTier, HostError, SceneHost, TextureHandle};
pub use scene::{ItemTransform, LoadingScene, SceneError};

/// Common imports for scene users
pub mod prelude {
    pub use crate::{
        GpuTier, HostError, SceneHost, TextureHandle,
        ItemTransform, LoadingScene, SceneError,
        foundation::math::{Euler, Vec2, Vec3},
        core::config::{Config, SceneConfig, FogConfig, ShowcaseConfig, CameraConfig},
        effects::{FogSystem, NoiseOverlay},
        showcase::{ShowcaseItem, ItemEffect, TransitionEvent, TransitionPhase},
        render::{Camera, Viewport},
    };
}
