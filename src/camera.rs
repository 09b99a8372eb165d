//! Camera parameters and the view matrix.
//!
//! The camera is positioned in world space with yaw/pitch/roll orientation
//! (degrees) and looks down -Z in its own space. Because the rotation
//! matrix is orthonormal, the view matrix uses the rigid-transform
//! shortcut: translate by the negative eye position, then apply the
//! *transpose* of the rotation matrix rather than a full inverse.

use crate::math::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    roll: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    /// Orientation as (yaw, pitch, roll) in degrees.
    pub fn rotation(&self) -> (f32, f32, f32) {
        (self.yaw, self.pitch, self.roll)
    }

    pub fn set_rotation(&mut self, yaw: f32, pitch: f32, roll: f32) -> &mut Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self.roll = roll;
        self
    }

    fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_yaw_pitch_roll(
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    /// World-to-view matrix: `transpose(R) * T(-eye)`.
    pub fn view_matrix(&self) -> Mat4 {
        self.rotation_matrix().transpose()
            * Mat4::translation(-self.position.x, -self.position.y, -self.position.z)
    }

    /// Direction the camera looks along in world space (-Z rotated by the
    /// camera orientation). Used as the viewer direction in specular
    /// lighting.
    pub fn forward(&self) -> Vec3 {
        self.rotation_matrix().transform_normal(Vec3::new(0.0, 0.0, -1.0))
    }
}
