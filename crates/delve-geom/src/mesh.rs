//! Renderer-facing mesh output. Plain arrays, ready for upload by any backend.

use crate::{Rect, Vec2, Vec3, Vec4};

/// One terrain vertex as consumed by the renderer.
///
/// `color` packs the three light channels as `(sun, ambient, dynamic, 255)`;
/// `tint` is the voxel type's RGBA multiplier.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExtendedVertex {
    pub position: Vec3,
    pub color: [u8; 4],
    pub tint: [u8; 4],
    pub uv: Vec2,
    pub uv_bounds: Vec4,
    pub lightmap_uv: Vec2,
}

impl ExtendedVertex {
    #[inline]
    pub fn new(position: Vec3, color: [u8; 4], tint: [u8; 4], uv: Vec2, uv_bounds: Vec4) -> Self {
        Self {
            position,
            color,
            tint,
            uv,
            uv_bounds,
            lightmap_uv: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn sun(&self) -> u8 {
        self.color[0]
    }

    #[inline]
    pub fn ambient(&self) -> u8 {
        self.color[1]
    }

    #[inline]
    pub fn dynamic(&self) -> u8 {
        self.color[2]
    }
}

/// Per-chunk light texture: one 2x2 texel cell per quad, holding the packed
/// vertex light of its four corners.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lightmap {
    pub width: usize,
    pub height: usize,
    pub texels: Vec<[u8; 4]>,
    pub bounds: Rect,
}

impl Lightmap {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.texels.is_empty()
    }

    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.texels.get(y * self.width + x).copied()
    }
}

/// Immutable snapshot of one chunk's visible surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrimitiveMesh {
    pub vertices: Vec<ExtendedVertex>,
    pub indices: Vec<u16>,
    pub lightmap: Lightmap,
}

impl PrimitiveMesh {
    #[inline]
    pub fn max_vertex(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn max_index(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
