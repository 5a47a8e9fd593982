//! # Responsive Camera
//!
//! The scene is framed for landscape screens. On portrait screens the camera
//! backs away and looks slightly to the left so the showcase stays in view.
//!
//! ## Notes
//! - **Pure framing**: [`responsive_framing`] depends only on the aspect ratio
//!   and configuration
//! - **Host-owned projection**: the host's renderer consumes the view matrix
//!   and field of view, this module does no GPU work

use crate::core::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Point3, Vec3};

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Smallest width at which the watermark is shown
    pub const WATERMARK_MIN_WIDTH: u32 = 1920;

    /// Height the viewport must exceed for the watermark to be shown
    pub const WATERMARK_MIN_HEIGHT: u32 = 800;

    /// Create a viewport
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; a zero height counts as square
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Whether there is room for the page watermark
    pub fn shows_watermark(&self) -> bool {
        self.width >= Self::WATERMARK_MIN_WIDTH && self.height > Self::WATERMARK_MIN_HEIGHT
    }
}

/// Where the camera sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    /// Camera position in world space
    pub position: Vec3,
    /// Look-at point in world space
    pub look_at: Vec3,
}

/// Frame the scene for a viewport aspect ratio
///
/// At aspect 1 and wider the configured baseline is returned. Narrower
/// aspects scale linearly towards the full portrait adjustment, reached at
/// aspect 0: the camera distance grows by `portrait_pushback` and the
/// look-at point shifts by `portrait_look_shift` along X.
pub fn responsive_framing(aspect: f32, config: &CameraConfig) -> Framing {
    let portrait = utils::saturate(1.0 - aspect);

    let mut position = config.base_position;
    position.z *= 1.0 + config.portrait_pushback * portrait;

    let mut look_at = config.base_look_at;
    look_at.x += config.portrait_look_shift * portrait;

    Framing { position, look_at }
}

/// Perspective camera following the responsive framing
///
/// The host builds its projection from `fov`, `aspect`, `near` and `far`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Look-at point
    pub target: Vec3,
    /// World up, +Y
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Viewport width over height
    pub aspect: f32,
    /// Near plane distance
    pub near: f32,
    /// Far plane distance
    pub far: f32,
}

impl Camera {
    /// Create a camera framed for `viewport`
    pub fn new(config: &CameraConfig, viewport: Viewport) -> Self {
        let aspect = viewport.aspect();
        let framing = responsive_framing(aspect, config);
        Self {
            position: framing.position,
            target: framing.look_at,
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(config.fov_degrees),
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    /// Re-frame after a viewport resize
    pub fn apply_viewport(&mut self, config: &CameraConfig, viewport: Viewport) {
        let aspect = viewport.aspect();
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Viewport {}x{} (aspect {aspect:.3}), reframing", viewport.width, viewport.height);
        }
        self.aspect = aspect;

        let framing = responsive_framing(aspect, config);
        self.position = framing.position;
        self.target = framing.look_at;
        log::trace!("Camera reframed - position: {:?}, target: {:?}", self.position, self.target);
    }

    /// World-to-camera transform (right-handed)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(self.position), &Point3::from(self.target), &self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_landscape_uses_baseline() {
        let config = CameraConfig::default();
        for aspect in [1.0, 1.5, 16.0 / 9.0, 4.0] {
            let framing = responsive_framing(aspect, &config);
            assert_eq!(framing.position, Vec3::new(0.0, 0.0, 80.0));
            assert_eq!(framing.look_at, Vec3::zeros());
        }
    }

    #[test]
    fn test_portrait_scales_linearly() {
        let config = CameraConfig::default();

        let half = responsive_framing(0.5, &config);
        assert_relative_eq!(half.position.z, 100.0);
        assert_relative_eq!(half.look_at.x, -5.0);

        let extreme = responsive_framing(0.0, &config);
        assert_relative_eq!(extreme.position.z, 120.0);
        assert_relative_eq!(extreme.look_at.x, -10.0);
    }

    #[test]
    fn test_viewport_aspect_and_watermark() {
        assert_relative_eq!(Viewport::new(1920, 1080).aspect(), 16.0 / 9.0);
        assert_eq!(Viewport::new(640, 0).aspect(), 1.0);
        assert!(Viewport::new(1920, 1080).shows_watermark());
        assert!(!Viewport::new(1920, 800).shows_watermark());
        assert!(!Viewport::new(1280, 1080).shows_watermark());
    }

    #[test]
    fn test_camera_follows_resize() {
        let config = CameraConfig::default();
        let mut camera = Camera::new(&config, Viewport::new(1600, 900));
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 80.0));

        camera.apply_viewport(&config, Viewport::new(450, 900));
        assert_relative_eq!(camera.aspect, 0.5);
        assert_relative_eq!(camera.position.z, 100.0);
        assert_relative_eq!(camera.target.x, -5.0);
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let camera = Camera::new(&CameraConfig::default(), Viewport::new(1600, 900));
        let eye = camera.view_matrix().transform_point(&Point3::from(camera.position));
        assert_relative_eq!(eye.coords, Vec3::zeros(), epsilon = 1e-4);
    }
}
