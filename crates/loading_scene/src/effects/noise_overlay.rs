//! Noise-displaced overlay mesh
//!
//! The host owns the mesh and its displacement shader. This tracks the two
//! values the scene drives: the mesh scale (zero while hidden) and the
//! shader's time uniform.

use crate::foundation::math::Vec3;
use crate::showcase::catalog::ItemEffect;

/// Overlay state pushed to the host every frame
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseOverlay {
    scale: Vec3,
    time: f32,
    visible_scale: Vec3,
}

impl Default for NoiseOverlay {
    fn default() -> Self {
        Self::new(Vec3::new(1.0, 1.0, 1.0))
    }
}

impl NoiseOverlay {
    /// Create a hidden overlay that shows at `visible_scale`
    pub fn new(visible_scale: Vec3) -> Self {
        Self {
            scale: Vec3::zeros(),
            time: 0.0,
            visible_scale,
        }
    }

    /// Show and animate the overlay for the noise item, hide it otherwise
    pub fn update(&mut self, effect: ItemEffect, delta_time: f32) {
        match effect {
            ItemEffect::NoiseOverlay => {
                self.scale = self.visible_scale;
                self.time += delta_time;
            }
            ItemEffect::Plain => self.scale = Vec3::zeros(),
        }
    }

    /// Mesh scale for this frame
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Shader time uniform
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Whether the overlay is currently shown
    pub fn is_visible(&self) -> bool {
        self.scale != Vec3::zeros()
    }
}
