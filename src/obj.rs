//! Text-based mesh description parser (Wavefront OBJ subset).
//!
//! Recognized records:
//!
//! ```text
//! v  x y z [w]          vertex position (w defaults to 1)
//! vt u v [w]            texture coordinate (w defaults to 0)
//! vn x y z              normal
//! f  i[/t[/n]] ...      face; 1-based indices, texture/normal optional
//! ```
//!
//! Unknown record types and blank/comment lines are skipped. A malformed
//! record aborts parsing of the whole file with the offending line attached
//! to the error; no partial mesh is returned.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::{Face, Mesh, VertexRef};
use crate::texture::{Texture, TextureSet};

/// Failure to load a mesh or its texture maps.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Image(image::ImageError),
    /// A record line that could not be parsed; carries the line content.
    Malformed { line: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "i/o error: {e}"),
            LoadError::Image(e) => write!(f, "texture decode error: {e}"),
            LoadError::Malformed { line } => write!(f, "malformed mesh record: {line:?}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Image(e) => Some(e),
            LoadError::Malformed { .. } => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<image::ImageError> for LoadError {
    fn from(e: image::ImageError) -> Self {
        LoadError::Image(e)
    }
}

/// Parse a mesh description from text.
pub fn parse(source: &str) -> Result<Mesh, LoadError> {
    let mut positions = Vec::new();
    let mut texcoords = Vec::new();
    let mut normals = Vec::new();
    let mut faces = Vec::new();

    for line in source.lines() {
        let mut tokens = line.split_whitespace();
        let Some(kind) = tokens.next() else {
            continue;
        };
        let parsed = match kind {
            "v" => parse_position(tokens).map(|v| positions.push(v)),
            "vt" => parse_texcoord(tokens).map(|t| texcoords.push(t)),
            "vn" => parse_normal(tokens).map(|n| normals.push(n)),
            "f" => parse_face(tokens).map(|f| faces.push(f)),
            // Comments and unsupported records are skipped.
            _ => Some(()),
        };
        if parsed.is_none() {
            return Err(LoadError::Malformed {
                line: line.to_string(),
            });
        }
    }

    Ok(Mesh::new(positions, texcoords, normals, faces))
}

/// Load a mesh file along with its sibling texture maps.
///
/// Maps follow the naming convention of the mesh's directory: `Diffuse.png`,
/// `Normal.png`, `Specular.png`, and `Emission.png`. Each map is optional;
/// a missing or undecodable file simply leaves that map disabled.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let mut mesh = parse(&source)?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let maps = TextureSet {
        diffuse: Texture::from_file(dir.join("Diffuse.png")).ok(),
        normal: Texture::from_file(dir.join("Normal.png")).ok(),
        specular: Texture::from_file(dir.join("Specular.png")).ok(),
        emission: Texture::from_file(dir.join("Emission.png")).ok(),
    };
    if !maps.is_empty() {
        mesh.set_maps(maps);
    }
    Ok(mesh)
}

fn parse_position<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<Vec4> {
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    let w = match tokens.next() {
        Some(t) => t.parse().ok()?,
        None => 1.0,
    };
    Some(Vec4::new(x, y, z, w))
}

fn parse_texcoord<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<Vec3> {
    let u = tokens.next()?.parse().ok()?;
    let v = tokens.next()?.parse().ok()?;
    let w = match tokens.next() {
        Some(t) => t.parse().ok()?,
        None => 0.0,
    };
    Some(Vec3::new(u, v, w))
}

fn parse_normal<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<Vec3> {
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    Some(Vec3::new(x, y, z))
}

fn parse_face<'a>(tokens: impl Iterator<Item = &'a str>) -> Option<Face> {
    let mut corners = Vec::new();
    for token in tokens {
        corners.push(parse_corner(token)?);
    }
    if corners.len() < 3 {
        return None;
    }
    Some(Face { corners })
}

/// Parse one `i[/t[/n]]` corner, converting 1-based indices to 0-based.
/// An absent or empty texture/normal part defaults to index 0 ("unused").
fn parse_corner(token: &str) -> Option<VertexRef> {
    let mut parts = token.split('/');

    let position = to_index(parts.next()?)?;
    let texcoord = match parts.next() {
        Some("") | None => 0,
        Some(part) => to_index(part)?,
    };
    let normal = match parts.next() {
        Some("") | None => 0,
        Some(part) => to_index(part)?,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(VertexRef {
        position,
        texcoord,
        normal,
    })
}

fn to_index(part: &str) -> Option<usize> {
    let value: usize = part.parse().ok()?;
    value.checked_sub(1)
}
