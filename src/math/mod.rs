//! Linear algebra primitives for the rendering pipeline.
//!
//! Column-major convention throughout: vectors are column vectors on the
//! right (`Mat4 * Vec4`), transforms chain right-to-left.

pub mod mat4;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use vec3::Vec3;
pub use vec4::Vec4;
