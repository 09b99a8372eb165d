//! Light parameters for the shading evaluators.

use crate::math::Vec3;

/// The single directional light of a render pass.
///
/// Ambient/diffuse/specular factors are per-channel multipliers in [0, 1].
/// The per-map flags gate whether an attached texture map contributes; a
/// flag without the corresponding map (or the reverse) leaves that
/// contribution at its uniform fallback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    /// Normalized direction the light shines along.
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Channel-space (0..255) color of specular highlights.
    pub specular_color: Vec3,
    /// Phong shininess exponent.
    pub shininess: f32,
    pub use_diffuse_map: bool,
    pub use_normal_map: bool,
    pub use_specular_map: bool,
    pub use_emission_map: bool,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, 0.0, 1.0),
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::ONE,
            specular: Vec3::splat(0.5),
            specular_color: Vec3::splat(255.0),
            shininess: 32.0,
            use_diffuse_map: true,
            use_normal_map: true,
            use_specular_map: true,
            use_emission_map: true,
        }
    }
}

impl Light {
    /// A light shining along `direction`; the direction is normalized.
    ///
    /// A zero-length direction normalizes to NaN components, which the
    /// shading evaluators fold to zero contribution rather than failing the
    /// pass.
    pub fn directional(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
            ..Self::default()
        }
    }
}
