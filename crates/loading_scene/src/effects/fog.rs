//! Fog particle for the rising smoke field

use crate::foundation::math::{utils, Vec3};
use bytemuck::{Pod, Zeroable};

/// Opacity of a particle at `height` within its `[baseline, ceiling]` band
///
/// Fades in linearly over the lower half and out over the upper half, so it
/// is 0 at both ends of the band and 1 at the midpoint.
pub fn band_opacity(height: f32, baseline: f32, ceiling: f32) -> f32 {
    let midpoint = (baseline + ceiling) / 2.0;

    let opacity = if height < midpoint {
        utils::inverse_lerp(baseline, midpoint, height)
    } else {
        1.0 - utils::inverse_lerp(midpoint, ceiling, height)
    };

    utils::saturate(opacity)
}

/// A single smoke quad drifting upwards
///
/// Rises at a constant speed from its spawn height to its ceiling, then
/// jumps back to the spawn height.
#[derive(Debug, Clone, PartialEq)]
pub struct FogParticle {
    /// World position
    pub position: Vec3,

    /// Spin about the Z axis in radians
    pub rotation: f32,

    /// Scale factors
    pub scale: Vec3,

    /// Spawn height the particle resets to
    pub baseline: f32,

    /// Height at which the particle resets
    pub ceiling: f32,

    /// Rise speed in units per second
    pub speed: f32,

    /// Material opacity for the current frame
    pub opacity: f32,
}

impl FogParticle {
    /// Create a particle at its spawn position
    pub fn new(position: Vec3, rise: f32, speed: f32, rotation: f32) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::new(1.0, 1.0, 1.0),
            baseline: position.y,
            ceiling: position.y + rise,
            speed,
            opacity: 0.0,
        }
    }

    /// Advance spin, height and opacity by `delta_time` seconds
    pub fn update(&mut self, delta_time: f32, rotation_rate: f32) {
        self.rotation += rotation_rate * delta_time;

        self.position.y += self.speed * delta_time;
        if self.position.y >= self.ceiling {
            self.position.y = self.baseline;
        }

        self.opacity = band_opacity(self.position.y, self.baseline, self.ceiling);
    }

    /// Fraction of the band climbed so far
    pub fn progress(&self) -> f32 {
        utils::inverse_lerp(self.baseline, self.ceiling, self.position.y)
    }

    /// Per-instance data for the host's instanced draw
    pub fn instance_data(&self) -> FogInstanceData {
        FogInstanceData {
            position: self.position.into(),
            rotation: self.rotation,
            scale: self.scale.into(),
            opacity: self.opacity,
        }
    }
}

/// Instance data structure for GPU upload
/// Must match the host's instance attribute layout
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FogInstanceData {
    /// World position
    pub position: [f32; 3],
    /// Spin about Z in radians
    pub rotation: f32,
    /// Scale factors
    pub scale: [f32; 3],
    /// Material opacity
    pub opacity: f32,
}
