//! A CPU software 3D rasterizer.
//!
//! Meshes loaded from Wavefront OBJ files go through a matrix transform
//! chain into screen space, get rasterized with a Bresenham edge walk plus
//! scanline fill, and composite through a depth-tested target. Shading is
//! wireframe, flat, or per-pixel Phong with optional texture maps. SDL2 is
//! used only for window management and display; every pixel is produced on
//! the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use rastrix::prelude::*;
//!
//! let mesh = rastrix::obj::load("model.obj")?;
//! let settings = RenderSettings::default();
//! let frame = render(&mesh, &settings)?;
//! ```

pub mod camera;
pub mod color;
pub mod light;
pub mod math;
pub mod mesh;
pub mod obj;
pub mod projection;
pub mod render;
pub mod shading;
pub mod texture;
pub mod transform;
pub mod window;

pub use color::Color;
pub use mesh::Mesh;
pub use obj::LoadError;
pub use projection::Projection;
pub use render::{render, render_into, Framebuffer, RenderError, RenderSettings};
pub use shading::ShadingMode;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use rastrix::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::color::Color;
    pub use crate::light::Light;
    pub use crate::math::{Mat4, Vec3, Vec4};
    pub use crate::mesh::Mesh;
    pub use crate::projection::Projection;
    pub use crate::render::{render, render_into, Framebuffer, RenderError, RenderSettings};
    pub use crate::shading::ShadingMode;
    pub use crate::texture::{Texture, TextureSet};
    pub use crate::transform::ModelTransform;
    pub use crate::window::{FrameLimiter, Key, Window, WindowEvent};
}
