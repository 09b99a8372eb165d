//! Model placement parameters.
//!
//! [`ModelTransform`] mirrors the knobs an interactive shell exposes:
//! position, yaw/pitch/roll in degrees, and a uniform scale. Mutating
//! methods return `&mut Self` for chaining.

use crate::math::{Mat4, Vec3};

/// Position, orientation (degrees), and uniform scale of a model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTransform {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    roll: f32,
    scale: f32,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            scale: 1.0,
        }
    }
}

impl ModelTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    /// Rotation as (yaw, pitch, roll) in degrees.
    pub fn rotation(&self) -> (f32, f32, f32) {
        (self.yaw, self.pitch, self.roll)
    }

    pub fn set_rotation(&mut self, yaw: f32, pitch: f32, roll: f32) -> &mut Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self.roll = roll;
        self
    }

    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32, d_roll: f32) -> &mut Self {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
        self.roll += d_roll;
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Model matrix: scale first, then rotation, then translation.
    pub fn matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_yaw_pitch_roll(
                self.yaw.to_radians(),
                self.pitch.to_radians(),
                self.roll.to_radians(),
            )
            * Mat4::scaling(self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_identity() {
        assert_eq!(ModelTransform::default().matrix(), Mat4::identity());
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let mut t = ModelTransform::new();
        t.set_position(Vec3::new(10.0, 0.0, 0.0)).set_scale(2.0);
        let p = t.matrix() * Vec4::point(1.0, 0.0, 0.0);
        assert_relative_eq!(p.x, 12.0);
    }

    #[test]
    fn test_fluent_chaining() {
        let mut t = ModelTransform::new();
        t.set_rotation(90.0, 0.0, 0.0).rotate(-45.0, 0.0, 0.0);
        assert_relative_eq!(t.rotation().0, 45.0);
    }
}
