//! The render pass: transform, cull, rasterize, shade, composite.
//!
//! Faces are processed in parallel with rayon; all shared state is either
//! immutable (the transformed mesh, the shader) or synchronized inside the
//! [`RenderTarget`]. The pass never fails on geometry: degenerate or
//! off-screen data is dropped per face or per fragment, and only
//! configuration problems surface as errors.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::camera::Camera;
use crate::color::Color;
use crate::light::Light;
use crate::math::{Mat4, Vec4};
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::render::{
    fill_spans, triangle_boundary, Fragment, Framebuffer, RenderError, RenderTarget,
};
use crate::shading::{flat_face_color, PhongShader, ShadingMode};
use crate::transform::ModelTransform;

/// Everything a render pass needs besides the mesh.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// Uniform surface color used by wireframe and flat shading, and as the
    /// Phong fallback when no diffuse map applies.
    pub base_color: Color,
    pub mode: ShadingMode,
    pub light: Light,
    pub camera: Camera,
    pub projection: Projection,
    pub model: ModelTransform,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::BLACK,
            base_color: Color::GRAY,
            mode: ShadingMode::default(),
            light: Light::default(),
            camera: Camera::default(),
            projection: Projection::default(),
            model: ModelTransform::default(),
        }
    }
}

impl RenderSettings {
    fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if !self.projection.is_valid() {
            return Err(RenderError::InvalidProjection);
        }
        Ok(())
    }
}

/// Render one mesh into a fresh framebuffer.
pub fn render(mesh: &Mesh, settings: &RenderSettings) -> Result<Framebuffer, RenderError> {
    settings.validate()?;
    let target = RenderTarget::new(settings.width, settings.height, settings.background);
    render_into(mesh, settings, &target)?;
    Ok(target.into_framebuffer())
}

/// Render one mesh into an existing target without clearing it, so several
/// meshes can composite through the shared depth plane.
///
/// The target's dimensions must match the settings; passes that disagree on
/// resolution are rejected.
pub fn render_into(
    mesh: &Mesh,
    settings: &RenderSettings,
    target: &RenderTarget,
) -> Result<(), RenderError> {
    settings.validate()?;
    if target.width() != settings.width || target.height() != settings.height {
        return Err(RenderError::InvalidResolution {
            width: target.width(),
            height: target.height(),
        });
    }

    let model = settings.model.matrix();
    let view = settings.camera.view_matrix();
    let aspect = settings.width as f32 / settings.height as f32;
    let projection = settings.projection.matrix(aspect);
    let viewport = Mat4::viewport(0.0, 0.0, settings.width as f32, settings.height as f32);

    let transformed = mesh.transform(viewport, projection, view, model);

    let shader = match settings.mode {
        ShadingMode::Phong => Some(PhongShader::new(
            &settings.light,
            settings.camera.forward(),
            settings.base_color,
            transformed.maps(),
            Some(model),
        )?),
        _ => None,
    };

    let triangles: Vec<_> = transformed.triangles().collect();
    let culled = AtomicUsize::new(0);
    let skipped = AtomicUsize::new(0);

    triangles.par_iter().for_each(|corners| {
        let positions = [
            transformed.positions()[corners[0].position],
            transformed.positions()[corners[1].position],
            transformed.positions()[corners[2].position],
        ];

        // Clipping is per fragment, but a vertex behind the camera or with
        // non-finite coordinates poisons interpolation across the whole
        // face, so such triangles are dropped outright.
        if positions.iter().any(|p| !p.is_finite() || p.w <= 0.0) {
            skipped.fetch_add(1, Ordering::Relaxed);
            return;
        }

        // A vertex with a tiny positive w lands far outside the viewport,
        // and the edge walk visits every pixel on the way. Faces whose
        // vertices all sit past one screen edge can never produce a valid
        // fragment, so they are rejected before any walking.
        let (width, height) = (settings.width as f32, settings.height as f32);
        if positions.iter().all(|p| p.x < 0.0)
            || positions.iter().all(|p| p.x >= width)
            || positions.iter().all(|p| p.y < 0.0)
            || positions.iter().all(|p| p.y >= height)
        {
            skipped.fetch_add(1, Ordering::Relaxed);
            return;
        }

        if !is_front_facing(positions) {
            culled.fetch_add(1, Ordering::Relaxed);
            return;
        }

        let fragments = [
            corner_fragment(&transformed, corners[0], positions[0]),
            corner_fragment(&transformed, corners[1], positions[1]),
            corner_fragment(&transformed, corners[2], positions[2]),
        ];

        match settings.mode {
            ShadingMode::Wireframe => {
                for frag in triangle_boundary(fragments) {
                    write_fragment(target, settings, frag, settings.base_color);
                }
            }
            ShadingMode::Flat => {
                let normals = [
                    transformed.normals()[corners[0].normal],
                    transformed.normals()[corners[1].normal],
                    transformed.normals()[corners[2].normal],
                ];
                let color =
                    flat_face_color(settings.base_color, normals, settings.light.direction);
                let boundary: Vec<_> = triangle_boundary(fragments).collect();
                for frag in boundary.iter().copied().chain(fill_spans(&boundary)) {
                    write_fragment(target, settings, frag, color);
                }
            }
            ShadingMode::Phong => {
                // Constructed above whenever the mode is Phong.
                let Some(shader) = shader.as_ref() else {
                    return;
                };
                let boundary: Vec<_> = triangle_boundary(fragments).collect();
                for frag in boundary.iter().copied().chain(fill_spans(&boundary)) {
                    let color = shader.shade(frag.corrected_normal(), frag.corrected_texel());
                    write_fragment(target, settings, frag, color);
                }
            }
        }
    });

    log::debug!(
        "pass done: {} triangles, {} culled, {} skipped, mode {}",
        triangles.len(),
        culled.load(Ordering::Relaxed),
        skipped.load(Ordering::Relaxed),
        settings.mode,
    );

    Ok(())
}

/// Screen-space back-face test: the face is visible when the z component of
/// the winding cross product is negative (screen y grows downward).
fn is_front_facing(positions: [Vec4; 3]) -> bool {
    let a = positions[1].to_vec3() - positions[0].to_vec3();
    let b = positions[2].to_vec3() - positions[0].to_vec3();
    a.cross(b).z < 0.0
}

/// Corner fragment with attributes pre-divided by w for perspective
/// correction.
fn corner_fragment(mesh: &Mesh, corner: crate::mesh::VertexRef, position: Vec4) -> Fragment {
    let inv_w = 1.0 / position.w;
    Fragment {
        x: position.x.round() as i32,
        y: position.y.round() as i32,
        z: position.z,
        inv_w,
        normal: mesh.normals()[corner.normal] * inv_w,
        texel: mesh.texcoords()[corner.texcoord] * inv_w,
    }
}

/// Bounds- and depth-range check, then the depth-tested write. Fragments
/// outside the viewport or the (0, 1) depth range are dropped silently.
fn write_fragment(target: &RenderTarget, settings: &RenderSettings, frag: Fragment, color: Color) {
    if frag.x < 0
        || frag.x as u32 >= settings.width
        || frag.y < 0
        || frag.y as u32 >= settings.height
        || !(frag.z > 0.0 && frag.z < 1.0)
    {
        return;
    }
    target.test_and_write(frag.x, frag.y, frag.z, color);
}
