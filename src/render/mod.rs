//! The transform-and-rasterize core: fragments, the edge-walking
//! rasterizer, the depth-tested render target, and the pipeline entry
//! point.

mod edgewalk;
mod fragment;
mod pipeline;
mod target;

pub use edgewalk::{fill_spans, triangle_boundary, EdgeWalk};
pub use fragment::Fragment;
pub use pipeline::{render, render_into, RenderSettings};
pub use target::{Framebuffer, RenderTarget};

use std::fmt;

/// Configuration-level failures, rejected before any rendering work begins.
///
/// Geometry-level anomalies (degenerate faces, non-finite vertices) are
/// never errors; they are dropped locally during the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// Framebuffer width or height of zero.
    InvalidResolution { width: u32, height: u32 },
    /// Projection parameters that do not describe a frustum
    /// (requires `far > near > 0` and a FOV inside (0, pi)).
    InvalidProjection,
    /// A normal map is enabled but no model matrix was supplied to
    /// transform the decoded normals into world space.
    MissingModelMatrix,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidResolution { width, height } => {
                write!(f, "invalid framebuffer resolution {width}x{height}")
            }
            RenderError::InvalidProjection => {
                write!(f, "projection parameters do not form a frustum")
            }
            RenderError::MissingModelMatrix => {
                write!(f, "normal mapping requires a model matrix")
            }
        }
    }
}

impl std::error::Error for RenderError {}
