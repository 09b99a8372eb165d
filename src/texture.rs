//! Decoded 2D color-sample arrays used as texture maps.

use std::path::Path;

use crate::color::Color;
use crate::math::vec3::Vec3;

/// A decoded texture: a width x height grid of color samples.
#[derive(Debug)]
pub struct Texture {
    data: Vec<Color>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        let data: Vec<Color> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                Color::argb(a, r, g, b)
            })
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a texture from raw samples, row-major.
    ///
    /// # Panics
    /// Panics if `data.len() != width * height`.
    pub fn from_samples(width: u32, height: u32, data: Vec<Color>) -> Self {
        assert_eq!(data.len(), (width * height) as usize);
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at a texel coordinate from the mesh's UV space.
    ///
    /// Addressing follows `(u * width) mod width` with V flipped
    /// (`1 - v`) before scaling, wrapping coordinates past 1.0. Returns
    /// `None` for texels that are non-finite or land at a negative address,
    /// which callers treat as transparent/base color.
    pub fn sample(&self, texel: Vec3) -> Option<Color> {
        if !texel.is_finite() {
            return None;
        }

        let u = texel.x;
        let v = 1.0 - texel.y;
        if u < 0.0 || v < 0.0 {
            return None;
        }

        let x = (u * self.width as f32) as u32 % self.width;
        let y = (v * self.height as f32) as u32 % self.height;
        Some(self.data[(y * self.width + x) as usize])
    }
}

/// The optional texture maps a mesh can carry.
///
/// Absent maps disable the corresponding shading contribution.
#[derive(Debug, Default)]
pub struct TextureSet {
    pub diffuse: Option<Texture>,
    pub normal: Option<Texture>,
    pub specular: Option<Texture>,
    pub emission: Option<Texture>,
}

impl TextureSet {
    pub fn is_empty(&self) -> bool {
        self.diffuse.is_none()
            && self.normal.is_none()
            && self.specular.is_none()
            && self.emission.is_none()
    }
}
