//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the
//! perspective parameters (vertical FOV, near/far planes). The aspect ratio
//! comes from the framebuffer dimensions at render time, so a resized
//! target never renders with a stale ratio.

use crate::math::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    z_near: f32,
    z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_degrees(60.0, 0.1, 100.0)
    }
}

impl Projection {
    /// Creates a new projection; `fov_y` is in radians.
    pub fn new(fov_y: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            z_near,
            z_far,
        }
    }

    /// Creates a projection from a field of view in degrees.
    pub fn from_degrees(fov_y_degrees: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), z_near, z_far)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// True when the parameters describe a usable frustum:
    /// `far > near > 0` and a FOV strictly between 0 and a half turn.
    pub fn is_valid(&self) -> bool {
        self.z_near > 0.0
            && self.z_far > self.z_near
            && self.fov_y > 0.0
            && self.fov_y < std::f32::consts::PI
    }

    /// Perspective matrix for the given aspect ratio (width / height).
    pub fn matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective(self.fov_y, aspect_ratio, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_from_degrees_converts() {
        let proj = Projection::from_degrees(45.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov_y(), FRAC_PI_4, epsilon = 1e-6);
    }

    #[test]
    fn test_validation() {
        assert!(Projection::from_degrees(60.0, 0.1, 100.0).is_valid());
        assert!(!Projection::from_degrees(60.0, 0.0, 100.0).is_valid());
        assert!(!Projection::from_degrees(60.0, 5.0, 1.0).is_valid());
        assert!(!Projection::from_degrees(0.0, 0.1, 100.0).is_valid());
        assert!(!Projection::from_degrees(200.0, 0.1, 100.0).is_valid());
    }
}
