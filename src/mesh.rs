//! Polygonal mesh container and its transform stage.
//!
//! A [`Mesh`] owns vertex positions, texture coordinates, normals, and
//! polygonal faces, plus an optional [`TextureSet`]. Transforming a mesh
//! produces a *new* mesh with screen-space positions and re-normalized
//! normals; faces, texture coordinates, and maps are shared with the source
//! (`Arc`), so geometry is immutable per transform and no frame mutates
//! state another frame can observe.

use std::sync::Arc;

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::texture::TextureSet;

/// One corner of a face: indices into the mesh's position, texture
/// coordinate, and normal arrays (0-based).
///
/// A corner without an explicit texture or normal reference uses index 0,
/// which the mesh guarantees to exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexRef {
    pub position: usize,
    pub texcoord: usize,
    pub normal: usize,
}

/// A polygonal face: an ordered ring of three or more corners.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Face {
    pub corners: Vec<VertexRef>,
}

#[derive(Debug)]
pub struct Mesh {
    positions: Vec<Vec4>,
    normals: Vec<Vec3>,
    texcoords: Arc<Vec<Vec3>>,
    faces: Arc<Vec<Face>>,
    maps: Arc<TextureSet>,
}

impl Mesh {
    /// Build a mesh from parsed arrays.
    ///
    /// Empty texture-coordinate or normal arrays get a single zero entry so
    /// that the default index 0 stays in range for faces that omit them.
    pub fn new(
        positions: Vec<Vec4>,
        mut texcoords: Vec<Vec3>,
        mut normals: Vec<Vec3>,
        faces: Vec<Face>,
    ) -> Self {
        if texcoords.is_empty() {
            texcoords.push(Vec3::ZERO);
        }
        if normals.is_empty() {
            normals.push(Vec3::ZERO);
        }
        Self {
            positions,
            normals,
            texcoords: Arc::new(texcoords),
            faces: Arc::new(faces),
            maps: Arc::new(TextureSet::default()),
        }
    }

    pub fn positions(&self) -> &[Vec4] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn texcoords(&self) -> &[Vec3] {
        &self.texcoords
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn maps(&self) -> &TextureSet {
        &self.maps
    }

    /// Attach texture maps, replacing any existing set.
    pub fn set_maps(&mut self, maps: TextureSet) {
        self.maps = Arc::new(maps);
    }

    /// True when a corner's indices are all within this mesh's arrays.
    fn corner_in_range(&self, corner: &VertexRef) -> bool {
        corner.position < self.positions.len()
            && corner.texcoord < self.texcoords.len()
            && corner.normal < self.normals.len()
    }

    /// Fan-triangulate every face: corner 0 paired with each consecutive
    /// pair of the remaining corners, so an n-gon yields n-2 triangles.
    ///
    /// Faces with fewer than three corners or with any out-of-range index
    /// are skipped; degenerate input never aborts a render pass.
    pub fn triangles(&self) -> impl Iterator<Item = [VertexRef; 3]> + '_ {
        self.faces
            .iter()
            .filter(|face| {
                face.corners.len() >= 3 && face.corners.iter().all(|c| self.corner_in_range(c))
            })
            .flat_map(|face| {
                let anchor = face.corners[0];
                face.corners
                    .windows(2)
                    .skip(1)
                    .map(move |pair| [anchor, pair[0], pair[1]])
                    .collect::<Vec<_>>()
            })
    }

    /// Run the full transform stage, producing a new mesh in viewport pixel
    /// space.
    ///
    /// Each position goes through `projection * view * model`, is divided by
    /// the resulting `w`, mapped by the viewport matrix, and then has `w`
    /// restored so the rasterizer can interpolate perspective-correct
    /// attributes. The divide must happen in clip space, before the viewport
    /// mapping; `w` is carried through untouched.
    ///
    /// Normals are rotated by the model matrix and re-normalized. Vertices
    /// that come out non-finite or behind the camera (`w <= 0`) are kept in
    /// the array; the rasterizer excludes any triangle touching them.
    pub fn transform(
        &self,
        viewport: Mat4,
        projection: Mat4,
        view: Mat4,
        model: Mat4,
    ) -> Self {
        let world_projection = projection * view * model;

        let positions = self
            .positions
            .iter()
            .map(|&v| {
                let clip = world_projection * v;
                let w = clip.w;
                let screen = viewport * (clip / w);
                Vec4::new(screen.x, screen.y, screen.z, w)
            })
            .collect();

        let normals = self
            .normals
            .iter()
            .map(|&n| model.transform_normal(n).normalize())
            .collect();

        Self {
            positions,
            normals,
            texcoords: Arc::clone(&self.texcoords),
            faces: Arc::clone(&self.faces),
            maps: Arc::clone(&self.maps),
        }
    }
}
