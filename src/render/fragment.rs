//! The fixed-width fragment record carried between rasterizer stages.

use crate::math::Vec3;

/// One candidate pixel produced by the rasterizer.
///
/// Every fragment carries the same fields regardless of shading mode;
/// wireframe passes simply leave `normal` and `texel` at their defaults.
/// Attributes that need perspective correction (`normal`, `texel`) are
/// stored pre-divided by the vertex `w`, with `inv_w` interpolated
/// alongside so the divide can be undone per pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    /// Depth in the (0, 1) range after the perspective divide.
    pub z: f32,
    /// Interpolated 1/w for perspective correction.
    pub inv_w: f32,
    /// Vertex normal divided by w.
    pub normal: Vec3,
    /// Texture coordinate divided by w.
    pub texel: Vec3,
}

impl Fragment {
    /// The perspective-corrected normal, re-normalized.
    pub fn corrected_normal(&self) -> Vec3 {
        (self.normal / self.inv_w).normalize()
    }

    /// The perspective-corrected texture coordinate.
    pub fn corrected_texel(&self) -> Vec3 {
        self.texel / self.inv_w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_correction_undoes_w_division() {
        let w = 4.0;
        let frag = Fragment {
            x: 0,
            y: 0,
            z: 0.5,
            inv_w: 1.0 / w,
            normal: Vec3::new(0.0, 0.0, 1.0) / w,
            texel: Vec3::new(0.25, 0.75, 0.0) / w,
        };
        let normal = frag.corrected_normal();
        assert_relative_eq!(normal.z, 1.0, epsilon = 1e-6);
        let texel = frag.corrected_texel();
        assert_relative_eq!(texel.x, 0.25, epsilon = 1e-6);
        assert_relative_eq!(texel.y, 0.75, epsilon = 1e-6);
    }
}
