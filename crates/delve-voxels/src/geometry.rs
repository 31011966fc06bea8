//! Unit-box face geometry shared by every voxel type.
//!
//! Each face owns four vertices listed counter-clockwise when seen from
//! outside the box, so `(v1 - v0) x (v2 - v0)` points along the face normal.

use delve_geom::{Rect, Vec2, Vec3, Vec4};

use crate::types::{BoxFace, VoxelVertex};

pub const FACE_VERTS: usize = 4;
pub const FACE_INDICES: usize = 6;
pub const BOX_VERTS: usize = FACE_VERTS * 6;
pub const BOX_INDICES: usize = FACE_INDICES * 6;

/// Triangulation of one quad across its `0-2` diagonal.
const QUAD_INDICES: [u16; FACE_INDICES] = [0, 1, 2, 0, 2, 3];
/// Triangulation of one quad across its `1-3` diagonal.
const QUAD_INDICES_FLIPPED: [u16; FACE_INDICES] = [0, 1, 3, 1, 2, 3];

#[inline]
fn face_corners(face: BoxFace) -> [VoxelVertex; FACE_VERTS] {
    use VoxelVertex::*;
    match face {
        BoxFace::Top => [BackTopLeft, FrontTopLeft, FrontTopRight, BackTopRight],
        BoxFace::Bottom => [
            BackBottomLeft,
            BackBottomRight,
            FrontBottomRight,
            FrontBottomLeft,
        ],
        BoxFace::Left => [BackBottomLeft, FrontBottomLeft, FrontTopLeft, BackTopLeft],
        BoxFace::Right => [
            FrontBottomRight,
            BackBottomRight,
            BackTopRight,
            FrontTopRight,
        ],
        BoxFace::Front => [
            FrontBottomLeft,
            FrontBottomRight,
            FrontTopRight,
            FrontTopLeft,
        ],
        BoxFace::Back => [BackBottomRight, BackBottomLeft, BackTopLeft, BackTopRight],
    }
}

/// Local texture coordinates of a face's four corners before atlas mapping.
#[inline]
fn face_local_uvs(face: BoxFace) -> [Vec2; FACE_VERTS] {
    if face.is_side() {
        [
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
        ]
    } else {
        [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryVertex {
    /// Offset inside the unit box.
    pub position: Vec3,
    pub corner: VoxelVertex,
}

/// Where one face's vertices and indices live in a [`BoxPrimitive`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceRange {
    pub vertex_start: usize,
    pub vertex_count: usize,
    pub index_start: usize,
    pub index_count: usize,
}

/// Atlas UVs for all 24 box vertices plus per-face clamp bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxTextureCoords {
    pub uvs: [Vec2; BOX_VERTS],
    pub bounds: [Vec4; 6],
}

impl BoxTextureCoords {
    pub fn new(top: Rect, bottom: Rect, side: Rect) -> Self {
        let mut uvs = [Vec2::ZERO; BOX_VERTS];
        let mut bounds = [Vec4::default(); 6];
        for face in BoxFace::ALL {
            let rect = match face {
                BoxFace::Top => top,
                BoxFace::Bottom => bottom,
                _ => side,
            };
            let local = face_local_uvs(face);
            let start = face.index() * FACE_VERTS;
            for (i, t) in local.iter().enumerate() {
                uvs[start + i] = rect.lerp(*t);
            }
            bounds[face.index()] = rect.as_vec4();
        }
        Self { uvs, bounds }
    }

    #[inline]
    pub fn uv(&self, vertex: usize) -> Vec2 {
        self.uvs[vertex]
    }

    #[inline]
    pub fn face_bounds(&self, face: BoxFace) -> Vec4 {
        self.bounds[face.index()]
    }
}

/// Face-indexed unit box with a type's textures baked in.
#[derive(Clone, Debug)]
pub struct BoxPrimitive {
    pub vertices: [GeometryVertex; BOX_VERTS],
    /// Absolute indices into `vertices`, six per face.
    pub indices: [u16; BOX_INDICES],
    pub flipped_indices: [u16; BOX_INDICES],
    pub faces: [FaceRange; 6],
    pub uvs: BoxTextureCoords,
}

impl BoxPrimitive {
    pub fn new(uvs: BoxTextureCoords) -> Self {
        let mut vertices = [GeometryVertex {
            position: Vec3::ZERO,
            corner: VoxelVertex::BackBottomLeft,
        }; BOX_VERTS];
        let mut indices = [0u16; BOX_INDICES];
        let mut flipped_indices = [0u16; BOX_INDICES];
        let mut faces = [FaceRange {
            vertex_start: 0,
            vertex_count: FACE_VERTS,
            index_start: 0,
            index_count: FACE_INDICES,
        }; 6];
        for face in BoxFace::ALL {
            let fi = face.index();
            let vs = fi * FACE_VERTS;
            let is = fi * FACE_INDICES;
            for (i, corner) in face_corners(face).into_iter().enumerate() {
                let (x, y, z) = corner.offset();
                vertices[vs + i] = GeometryVertex {
                    position: Vec3::from_grid(x, y, z),
                    corner,
                };
            }
            for i in 0..FACE_INDICES {
                indices[is + i] = vs as u16 + QUAD_INDICES[i];
                flipped_indices[is + i] = vs as u16 + QUAD_INDICES_FLIPPED[i];
            }
            faces[fi] = FaceRange {
                vertex_start: vs,
                vertex_count: FACE_VERTS,
                index_start: is,
                index_count: FACE_INDICES,
            };
        }
        Self {
            vertices,
            indices,
            flipped_indices,
            faces,
            uvs,
        }
    }

    #[inline]
    pub fn face(&self, face: BoxFace) -> FaceRange {
        self.faces[face.index()]
    }

    #[inline]
    pub fn face_indices(&self, face: BoxFace, flipped: bool) -> &[u16] {
        let r = self.face(face);
        let src = if flipped {
            &self.flipped_indices
        } else {
            &self.indices
        };
        &src[r.index_start..r.index_start + r.index_count]
    }
}
