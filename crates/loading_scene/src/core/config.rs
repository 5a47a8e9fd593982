//! # Scene Configuration
//!
//! All tunables for the loading scene in one serialisable tree. The defaults
//! reproduce the shipped loading screen exactly, so an empty config file is a
//! valid config.
//!
//! ## Configuration Categories
//!
//! - **Fog Config**: particle count, spawn footprint, drift and fade rates
//! - **Showcase Config**: anchor positions, travel speed, dwell timing
//! - **Camera Config**: baseline framing and the portrait adjustment
//! - **Items**: the showcase catalog

use crate::foundation::math::{Vec2, Vec3};
use crate::showcase::catalog::{default_catalog, ShowcaseItem};
use crate::spatial::{Bounds2, DEFAULT_MAX_ATTEMPTS, MIN_POLYGON_VERTICES};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use crate::config::{Config, ConfigError, ConfigFormat};

/// Asset root used when none is configured
pub const DEFAULT_ASSET_ROOT: &str = "assets/";

/// # Fog Configuration
///
/// Controls the rising smoke field behind the showcase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    /// Number of smoke quads
    pub instance_count: usize,
    /// Edge length of each smoke quad in world units
    pub quad_size: f32,
    /// Z of the plane the fog is spawned on
    pub depth: f32,
    /// Spin about Z in radians per second
    pub rotation_rate: f32,
    /// Smallest rise above the spawn height, in whole units
    pub rise_min: i32,
    /// Largest rise above the spawn height, in whole units
    pub rise_max: i32,
    /// Slowest rise speed in units per second
    pub speed_min: f32,
    /// Fastest rise speed in units per second (exclusive)
    pub speed_max: f32,
    /// Spawn footprint in the XY plane
    pub footprint: Vec<Vec2>,
    /// Candidates the spawn sampler draws before falling back
    pub max_spawn_attempts: usize,
    /// Cloud texture, relative to the asset root
    pub cloud_texture: String,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            instance_count: 500,
            quad_size: 200.0,
            depth: -50.0,
            rotation_rate: 0.008,
            rise_min: 20,
            rise_max: 60,
            speed_min: 0.05,
            speed_max: 1.0,
            footprint: vec![
                Vec2::new(-130.0, -80.0),  // top left
                Vec2::new(-80.0, -100.0),
                Vec2::new(0.0, -150.0),
                Vec2::new(100.0, -200.0),  // bottom right
                Vec2::new(-130.0, -200.0), // bottom left
            ],
            max_spawn_attempts: DEFAULT_MAX_ATTEMPTS,
            cloud_texture: "clouds.png".to_string(),
        }
    }
}

/// Range the idle dwell at an anchor is drawn from, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DwellRange {
    /// Shortest dwell
    pub min_ms: u64,
    /// Longest dwell (inclusive)
    pub max_ms: u64,
}

impl DwellRange {
    /// Draw a dwell uniformly from the range
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let millis = if self.max_ms <= self.min_ms {
            self.min_ms
        } else {
            rng.gen_range(self.min_ms..=self.max_ms)
        };
        Duration::from_millis(millis)
    }
}

impl Default for DwellRange {
    fn default() -> Self {
        Self { min_ms: 5000, max_ms: 15000 }
    }
}

/// # Showcase Configuration
///
/// Controls how the showcased item travels between anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Positions the item travels between
    pub anchors: Vec<Vec3>,
    /// Travel speed in units per second
    pub move_speed: f32,
    /// Spin about Y in radians per second
    pub rotate_rate: f32,
    /// Distance under which the item snaps onto its target
    pub arrival_epsilon: f32,
    /// Idle time at an anchor before the next item is requested
    pub dwell: DwellRange,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            anchors: vec![
                Vec3::new(-20.0, 1.0, 30.0),   // up
                Vec3::new(-20.0, -10.0, 30.0), // front left of camera
                Vec3::new(-20.0, -10.0, 15.0), // back
            ],
            move_speed: 0.66,
            rotate_rate: 0.024,
            arrival_epsilon: 0.1,
            dwell: DwellRange::default(),
        }
    }
}

/// # Camera Configuration
///
/// Landscape framing plus how far portrait viewports pull the camera back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position for aspect ratios of 1 and wider
    pub base_position: Vec3,
    /// Look-at point for aspect ratios of 1 and wider
    pub base_look_at: Vec3,
    /// Fraction of the base distance added at the narrowest portrait aspect
    pub portrait_pushback: f32,
    /// Horizontal look-at shift at the narrowest portrait aspect
    pub portrait_look_shift: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            base_position: Vec3::new(0.0, 0.0, 80.0),
            base_look_at: Vec3::zeros(),
            portrait_pushback: 0.5,
            portrait_look_shift: -10.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

/// Complete scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Prefix for every asset path
    pub asset_root: String,
    /// Fog settings
    pub fog: FogConfig,
    /// Showcase settings
    pub showcase: ShowcaseConfig,
    /// Camera settings
    pub camera: CameraConfig,
    /// Showcase catalog
    pub items: Vec<ShowcaseItem>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_root: DEFAULT_ASSET_ROOT.to_string(),
            fog: FogConfig::default(),
            showcase: ShowcaseConfig::default(),
            camera: CameraConfig::default(),
            items: default_catalog(DEFAULT_ASSET_ROOT),
        }
    }
}

impl Config for SceneConfig {}

impl SceneConfig {
    /// Full path of the cloud texture
    pub fn cloud_texture_path(&self) -> String {
        format!("{}{}", self.asset_root, self.fog.cloud_texture)
    }

    /// Check the invariants the scene relies on
    ///
    /// Both random pickers exclude the current choice, so they need at
    /// least two candidates to ever terminate.
    pub fn validate(&self) -> Result<(), String> {
        if self.showcase.anchors.len() < 2 {
            return Err(format!(
                "showcase needs at least 2 anchors, got {}",
                self.showcase.anchors.len()
            ));
        }
        if self.items.len() < 2 {
            return Err(format!("catalog needs at least 2 items, got {}", self.items.len()));
        }
        self.validate_showcase()?;
        self.validate_fog()
    }

    fn validate_showcase(&self) -> Result<(), String> {
        let showcase = &self.showcase;
        if showcase.dwell.max_ms < showcase.dwell.min_ms {
            return Err(format!(
                "dwell range is inverted: {}..={} ms",
                showcase.dwell.min_ms, showcase.dwell.max_ms
            ));
        }
        if !(showcase.move_speed.is_finite() && showcase.move_speed > 0.0) {
            return Err(format!("move speed must be finite and positive, got {}", showcase.move_speed));
        }
        if !(showcase.arrival_epsilon.is_finite() && showcase.arrival_epsilon > 0.0) {
            return Err(format!(
                "arrival distance must be finite and positive, got {}",
                showcase.arrival_epsilon
            ));
        }
        Ok(())
    }

    fn validate_fog(&self) -> Result<(), String> {
        let fog = &self.fog;
        if fog.footprint.len() < MIN_POLYGON_VERTICES {
            return Err(format!(
                "fog footprint needs at least {MIN_POLYGON_VERTICES} vertices, got {}",
                fog.footprint.len()
            ));
        }
        if let Some(vertex) = fog.footprint.iter().find(|v| !(v.x.is_finite() && v.y.is_finite())) {
            return Err(format!("fog footprint vertex is not finite: {vertex:?}"));
        }
        // The sampler draws across the bounds, so their extent must be representable
        if let Some(bounds) = Bounds2::from_points(&fog.footprint) {
            let extent = bounds.max - bounds.min;
            if !(extent.x.is_finite() && extent.y.is_finite()) {
                return Err(format!("fog footprint is too large: extent {extent:?}"));
            }
        }
        if fog.rise_min < 0 || fog.rise_max < fog.rise_min {
            return Err(format!("fog rise range must be 0 <= min <= max, got {}..={}", fog.rise_min, fog.rise_max));
        }
        let speeds_finite = fog.speed_min.is_finite() && fog.speed_max.is_finite();
        if !(speeds_finite && fog.speed_min > 0.0 && fog.speed_min <= fog.speed_max) {
            return Err(format!(
                "fog speed range must be 0 < min <= max, got {}..{}",
                fog.speed_min, fog.speed_max
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(SceneConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_single_anchor_rejected() {
        let mut config = SceneConfig::default();
        config.showcase.anchors.truncate(1);
        assert!(config.validate().unwrap_err().contains("anchors"));
    }

    #[test]
    fn test_single_item_rejected() {
        let mut config = SceneConfig::default();
        config.items.truncate(1);
        assert!(config.validate().unwrap_err().contains("catalog"));
    }

    #[test]
    fn test_dwell_draw_within_range() {
        let range = DwellRange::default();
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..1000 {
            let dwell = range.draw(&mut rng);
            assert!(dwell >= Duration::from_millis(5000) && dwell <= Duration::from_millis(15000));
        }
    }

    #[test]
    fn test_toml_round_trip_keeps_overrides() {
        let config = SceneConfig::default();
        let text = config.to_string_with(ConfigFormat::Toml).unwrap();
        let parsed = SceneConfig::from_str_with(&text, ConfigFormat::Toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let parsed = SceneConfig::from_str_with(
            "(asset_root: \"cdn/\", showcase: (move_speed: 2.0))",
            ConfigFormat::Ron,
        )
        .unwrap();
        assert_eq!(parsed.asset_root, "cdn/");
        assert_eq!(parsed.showcase.move_speed, 2.0);
        assert_eq!(parsed.showcase.anchors.len(), 3);
        assert_eq!(parsed.fog, FogConfig::default());
        assert_eq!(parsed.cloud_texture_path(), "cdn/clouds.png");
    }

    #[test]
    fn test_non_finite_footprint_vertex_rejected() {
        let mut config = SceneConfig::default();
        config.fog.footprint[2] = Vec2::new(f32::NAN, -150.0);
        assert!(config.validate().unwrap_err().contains("not finite"));
    }

    #[test]
    fn test_overflowing_footprint_extent_rejected() {
        let mut config = SceneConfig::default();
        config.fog.footprint = vec![
            Vec2::new(-3e38, 0.0),
            Vec2::new(3e38, 10.0),
            Vec2::new(0.0, 20.0),
            Vec2::new(-3e38, 0.0),
        ];
        assert!(config.validate().unwrap_err().contains("too large"));
    }

    #[test]
    fn test_non_positive_fog_speed_rejected() {
        let mut config = SceneConfig::default();
        config.fog.speed_min = -1.0;
        config.fog.speed_max = -0.5;
        assert!(config.validate().unwrap_err().contains("speed"));

        config.fog.speed_min = 0.0;
        config.fog.speed_max = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_rise_rejected() {
        let mut config = SceneConfig::default();
        config.fog.rise_min = -5;
        assert!(config.validate().unwrap_err().contains("rise"));
    }

    #[test]
    fn test_nan_move_speed_rejected() {
        let mut config = SceneConfig::default();
        config.showcase.move_speed = f32::NAN;
        assert!(config.validate().unwrap_err().contains("move speed"));

        config.showcase.move_speed = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_arrival_distance_rejected() {
        let mut config = SceneConfig::default();
        config.showcase.arrival_epsilon = 0.0;
        assert!(config.validate().unwrap_err().contains("arrival"));

        config.showcase.arrival_epsilon = f32::NAN;
        assert!(config.validate().is_err());
    }
}
