//! Shading evaluators: flat, Lambert, and Phong.
//!
//! All evaluators are state-free functions of (normal, base color, optional
//! texel); the rasterizer picks which one runs per face or per pixel based
//! on the [`ShadingMode`]. There is deliberately no polymorphism here: one
//! rasterizer, three color strategies.

use std::fmt;

use crate::color::Color;
use crate::light::Light;
use crate::math::{Mat4, Vec3};
use crate::render::RenderError;
use crate::texture::TextureSet;

/// How pixels of a render pass are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Face boundaries only, uniform color.
    Wireframe,
    /// One Lambert-averaged color per triangle.
    #[default]
    Flat,
    /// Per-pixel ambient + diffuse + specular, optionally texture-mapped.
    Phong,
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadingMode::Wireframe => write!(f, "Wireframe"),
            ShadingMode::Flat => write!(f, "Flat"),
            ShadingMode::Phong => write!(f, "Phong"),
        }
    }
}

/// Lambert (direction-only diffuse) color.
///
/// `factor = max(dot(normal, light_direction), 0)`; a NaN dot product
/// (zero-length light direction) folds to zero, yielding black instead of
/// poisoning the pass.
pub fn lambert(base: Color, normal: Vec3, light_direction: Vec3) -> Color {
    let factor = normal.dot(light_direction).max(0.0);
    base.scale(factor)
}

/// Flat-shading face color: each of the face's three vertex normals is
/// converted to its Lambert-lit color and the results are averaged
/// component-wise with byte rounding.
pub fn flat_face_color(base: Color, normals: [Vec3; 3], light_direction: Vec3) -> Color {
    let lit = [
        lambert(base, normals[0], light_direction),
        lambert(base, normals[1], light_direction),
        lambert(base, normals[2], light_direction),
    ];
    Color::average(&lit)
}

/// Per-pixel Phong evaluator, bound to one render pass.
///
/// Holds the light, the viewer direction, the uniform base color, and the
/// mesh's texture maps. Texture sampling is active when any enabled map is
/// present; in that case a normal map additionally requires the model
/// matrix, checked at construction time rather than mid-pass.
pub struct PhongShader<'a> {
    light: &'a Light,
    view_direction: Vec3,
    base: Color,
    maps: &'a TextureSet,
    model_matrix: Option<Mat4>,
    textured: bool,
}

impl<'a> PhongShader<'a> {
    pub fn new(
        light: &'a Light,
        view_direction: Vec3,
        base: Color,
        maps: &'a TextureSet,
        model_matrix: Option<Mat4>,
    ) -> Result<Self, RenderError> {
        let textured = (light.use_diffuse_map && maps.diffuse.is_some())
            || (light.use_normal_map && maps.normal.is_some())
            || (light.use_specular_map && maps.specular.is_some())
            || (light.use_emission_map && maps.emission.is_some());

        if light.use_normal_map && maps.normal.is_some() && model_matrix.is_none() {
            return Err(RenderError::MissingModelMatrix);
        }

        Ok(Self {
            light,
            view_direction: view_direction.normalize(),
            base,
            maps,
            model_matrix,
            textured,
        })
    }

    /// Color for one pixel given its (perspective-corrected) normal and
    /// texel.
    pub fn shade(&self, normal: Vec3, texel: Vec3) -> Color {
        if !self.textured {
            return self.evaluate(
                normal,
                self.base.channels(),
                self.base.channels() * self.light.diffuse,
                self.light.specular_color * self.light.specular,
                Vec3::ZERO,
            );
        }

        // Sampling failure (out-of-range or non-finite texel) yields the
        // transparent/base result rather than an error.
        let Some(diffuse_sample) = self.sample_enabled(&self.maps.diffuse, self.light.use_diffuse_map, texel)
        else {
            return Color::TRANSPARENT;
        };

        // Only an actual sample replaces the interpolated normal; a pass
        // without a normal map keeps it.
        let normal = match self.sample_enabled(&self.maps.normal, self.light.use_normal_map, texel)
        {
            Some(Some(sample)) => self.decode_normal(sample),
            Some(None) => normal,
            None => return Color::TRANSPARENT,
        };

        let (ambient_color, diffuse_color) = match diffuse_sample {
            Some(sample) => (sample.channels(), sample.channels()),
            None => (
                self.base.channels(),
                self.base.channels() * self.light.diffuse,
            ),
        };
        let specular_color = match self
            .sample_enabled(&self.maps.specular, self.light.use_specular_map, texel)
            .flatten()
        {
            Some(sample) => sample.channels(),
            None => self.light.specular_color * self.light.specular,
        };
        let emission = match self
            .sample_enabled(&self.maps.emission, self.light.use_emission_map, texel)
            .flatten()
        {
            Some(sample) => sample.channels(),
            None => Vec3::ZERO,
        };

        self.evaluate(normal, ambient_color, diffuse_color, specular_color, emission)
    }

    /// The Phong sum in channel space (0..255 per component):
    /// ambient + diffuse + specular (+ emission), clamped to bytes.
    ///
    /// The ambient term scales the undimmed surface color; the light's
    /// diffuse factor applies to the diffuse term only.
    fn evaluate(
        &self,
        normal: Vec3,
        ambient_color: Vec3,
        diffuse_color: Vec3,
        specular_color: Vec3,
        emission: Vec3,
    ) -> Color {
        let light = self.light;
        let ambient = ambient_color * light.ambient;
        let diffuse = diffuse_color * normal.dot(light.direction).max(0.0);
        let reflection = light.direction.reflect(normal).normalize();
        let specular = specular_color
            * self
                .view_direction
                .dot(reflection)
                .max(0.0)
                .powf(light.shininess);
        Color::from_channels(ambient + diffuse + specular + emission)
    }

    /// Sample a map when both enabled and present.
    ///
    /// Outer `None` means the texel itself was rejected (caller bails to
    /// transparent); inner `None` means the map does not participate.
    fn sample_enabled(
        &self,
        map: &Option<crate::texture::Texture>,
        enabled: bool,
        texel: Vec3,
    ) -> Option<Option<Color>> {
        match map {
            Some(texture) if enabled => texture.sample(texel).map(Some),
            _ => Some(None),
        }
    }

    /// Normal-map decode: `normalize(sample * 2 - 255)`, then into world
    /// space through the model matrix.
    fn decode_normal(&self, sample: Color) -> Vec3 {
        let tangent = (sample.channels() * 2.0 - Vec3::splat(255.0)).normalize();
        // Presence of the model matrix was checked at construction.
        match self.model_matrix {
            Some(model) => model.transform_normal(tangent).normalize(),
            None => tangent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;

    fn uniform_map(color: Color) -> Texture {
        Texture::from_samples(2, 2, vec![color; 4])
    }

    #[test]
    fn test_lambert_head_on_keeps_base() {
        let base = Color::rgb(200, 100, 50);
        let lit = lambert(base, Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(lit, base);
    }

    #[test]
    fn test_lambert_facing_away_is_black() {
        let base = Color::rgb(200, 100, 50);
        let lit = lambert(base, Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(lit, Color::rgb(0, 0, 0));
    }

    #[test]
    fn test_lambert_zero_length_light_is_black() {
        let base = Color::WHITE;
        let light = Vec3::ZERO.normalize(); // NaN components
        let lit = lambert(base, Vec3::new(0.0, 0.0, 1.0), light);
        assert_eq!(lit, Color::rgb(0, 0, 0));
    }

    #[test]
    fn test_flat_face_color_averages() {
        let base = Color::rgb(100, 100, 100);
        let facing = Vec3::new(0.0, 0.0, 1.0);
        let away = Vec3::new(0.0, 0.0, -1.0);
        let light = Vec3::new(0.0, 0.0, 1.0);

        // Two lit corners at full intensity, one dark: mean is 2/3.
        let color = flat_face_color(base, [facing, facing, away], light);
        assert_eq!(color, Color::rgb(67, 67, 67));
    }

    #[test]
    fn test_phong_ambient_only_when_unlit() {
        let light = Light {
            direction: Vec3::new(0.0, 0.0, 1.0),
            ambient: Vec3::splat(0.25),
            specular: Vec3::ZERO,
            ..Light::default()
        };
        let maps = TextureSet::default();
        let shader = PhongShader::new(
            &light,
            Vec3::new(0.0, 0.0, -1.0),
            Color::rgb(200, 200, 200),
            &maps,
            None,
        )
        .unwrap();

        // Normal faces away from the light: only the ambient term remains,
        // base * ambient = 200 * 0.25.
        let color = shader.shade(Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO);
        assert_eq!(color, Color::rgb(50, 50, 50));
    }

    #[test]
    fn test_phong_ambient_ignores_diffuse_factor() {
        let light = Light {
            direction: Vec3::new(0.0, 0.0, 1.0),
            ambient: Vec3::ONE,
            diffuse: Vec3::splat(0.5),
            specular: Vec3::ZERO,
            ..Light::default()
        };
        let maps = TextureSet::default();
        let shader = PhongShader::new(
            &light,
            Vec3::new(0.0, 0.0, -1.0),
            Color::rgb(200, 200, 200),
            &maps,
            None,
        )
        .unwrap();

        // Unlit surface, full ambient: the base color comes through
        // undimmed by the diffuse factor.
        let color = shader.shade(Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO);
        assert_eq!(color, Color::rgb(200, 200, 200));
    }

    #[test]
    fn test_phong_interpolated_normal_survives_without_normal_map() {
        let light = Light {
            direction: Vec3::new(0.0, 0.0, 1.0),
            ambient: Vec3::ZERO,
            specular: Vec3::ZERO,
            ..Light::default()
        };
        let maps = TextureSet {
            diffuse: Some(uniform_map(Color::rgb(100, 100, 100))),
            ..TextureSet::default()
        };
        let shader = PhongShader::new(
            &light,
            Vec3::new(0.0, 0.0, -1.0),
            Color::WHITE,
            &maps,
            None,
        )
        .unwrap();

        // A lit pixel keeps its diffuse contribution; a pixel facing away
        // goes dark. Both depend on the interpolated normal reaching the
        // diffuse term.
        let texel = Vec3::new(0.5, 0.5, 0.0);
        let lit = shader.shade(Vec3::new(0.0, 0.0, 1.0), texel);
        let unlit = shader.shade(Vec3::new(0.0, 0.0, -1.0), texel);
        assert_eq!(lit, Color::rgb(100, 100, 100));
        assert_eq!(unlit, Color::rgb(0, 0, 0));
    }

    #[test]
    fn test_phong_diffuse_map_overrides_base() {
        let light = Light {
            direction: Vec3::new(0.0, 0.0, 1.0),
            ambient: Vec3::ZERO,
            specular: Vec3::ZERO,
            ..Light::default()
        };
        let maps = TextureSet {
            diffuse: Some(uniform_map(Color::rgb(10, 20, 30))),
            ..TextureSet::default()
        };
        let shader = PhongShader::new(
            &light,
            Vec3::new(0.0, 0.0, -1.0),
            Color::WHITE,
            &maps,
            None,
        )
        .unwrap();

        let color = shader.shade(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(color, Color::rgb(10, 20, 30));
    }

    #[test]
    fn test_phong_out_of_range_texel_is_transparent() {
        let light = Light::default();
        let maps = TextureSet {
            diffuse: Some(uniform_map(Color::WHITE)),
            ..TextureSet::default()
        };
        let shader = PhongShader::new(
            &light,
            Vec3::new(0.0, 0.0, -1.0),
            Color::WHITE,
            &maps,
            Some(Mat4::identity()),
        )
        .unwrap();

        // Negative flipped V must not wrap around the map.
        let color = shader.shade(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.5, 1.5, 0.0));
        assert_eq!(color, Color::TRANSPARENT);
    }

    #[test]
    fn test_normal_map_without_model_matrix_is_rejected() {
        let light = Light::default();
        let maps = TextureSet {
            normal: Some(uniform_map(Color::rgb(128, 128, 255))),
            ..TextureSet::default()
        };
        let result = PhongShader::new(
            &light,
            Vec3::new(0.0, 0.0, -1.0),
            Color::WHITE,
            &maps,
            None,
        );
        assert_eq!(result.err(), Some(RenderError::MissingModelMatrix));
    }

    #[test]
    fn test_emission_map_adds() {
        let light = Light {
            ambient: Vec3::ZERO,
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            direction: Vec3::new(0.0, 0.0, 1.0),
            ..Light::default()
        };
        let maps = TextureSet {
            emission: Some(uniform_map(Color::rgb(5, 6, 7))),
            ..TextureSet::default()
        };
        let shader = PhongShader::new(
            &light,
            Vec3::new(0.0, 0.0, -1.0),
            Color::BLACK,
            &maps,
            None,
        )
        .unwrap();

        // Normal away from the light, no other terms: emission only.
        let color = shader.shade(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(color, Color::rgb(5, 6, 7));
    }
}
