//! Vector, point and rotation types the scene animates with

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Quaternion, Unit, UnitQuaternion, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Euler angles in radians, applied in X, Y, Z order
///
/// The showcase spins one axis at a time, so the angles are stored as is and
/// only turned into a quaternion when a matrix is needed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Euler {
    /// Rotation about the X axis
    pub x: f32,

    /// Rotation about the Y axis
    pub y: f32,

    /// Rotation about the Z axis
    pub z: f32,
}

impl Euler {
    /// Create a new set of Euler angles
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// All-zero rotation
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Copy of these angles with `delta` added about the Y axis
    #[must_use]
    pub fn with_added_y(self, delta: f32) -> Self {
        Self { y: self.y + delta, ..self }
    }

    /// Convert to a unit quaternion
    pub fn to_quat(self) -> Quat {
        Quat::from_euler_angles(self.x, self.y, self.z)
    }
}

/// Scalar helpers shared by the fog, camera and showcase
pub mod utils {
    /// Degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }

    /// Clamp into `[0, 1]`, mapping NaN to 0
    pub fn saturate(value: f32) -> f32 {
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        }
    }

    /// Point `t` of the way from `a` to `b`
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        (b - a).mul_add(t, a)
    }

    /// Fraction of the way `value` sits between `a` and `b`
    ///
    /// Unclamped. An empty interval yields 0.
    pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
        if (b - a).abs() <= f32::EPSILON {
            0.0
        } else {
            (value - a) / (b - a)
        }
    }
}
