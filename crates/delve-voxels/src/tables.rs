use crate::types::{BoxFace, VoxelVertex};

pub type Offset = (i32, i32, i32);

/// Static neighbor offset tables. Build once and pass by reference.
#[derive(Clone, Debug)]
pub struct VoxelTables {
    /// Indexed by [`BoxFace::index`].
    pub face_deltas: [Offset; 6],
    /// The 7 cells sharing each corner, indexed by [`VoxelVertex::index`].
    pub vertex_neighbors: [[Offset; 7]; 8],
    /// The 3 same-height cells around each corner.
    pub vertex_neighbors_2d: [[Offset; 3]; 8],
    /// `-Z, +X, +Z, -X` neighbors used for transition values.
    pub manhattan: [Offset; 4],
    pub manhattan_weights: [u8; 4],
}

impl Default for VoxelTables {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxelTables {
    pub fn new() -> Self {
        let mut face_deltas = [(0, 0, 0); 6];
        for face in BoxFace::ALL {
            face_deltas[face.index()] = face.delta();
        }
        let mut vertex_neighbors = [[(0, 0, 0); 7]; 8];
        let mut vertex_neighbors_2d = [[(0, 0, 0); 3]; 8];
        for v in VoxelVertex::ALL {
            let (cx, cy, cz) = v.offset();
            let sx = if cx == 1 { 1 } else { -1 };
            let sy = if cy == 1 { 1 } else { -1 };
            let sz = if cz == 1 { 1 } else { -1 };
            let mut n = 0;
            for bits in 1..8 {
                let dx = if bits & 4 != 0 { sx } else { 0 };
                let dy = if bits & 1 != 0 { sy } else { 0 };
                let dz = if bits & 2 != 0 { sz } else { 0 };
                vertex_neighbors[v.index()][n] = (dx, dy, dz);
                n += 1;
            }
            vertex_neighbors_2d[v.index()] = [(sx, 0, 0), (sx, 0, sz), (0, 0, sz)];
        }
        Self {
            face_deltas,
            vertex_neighbors,
            vertex_neighbors_2d,
            manhattan: [(0, 0, -1), (1, 0, 0), (0, 0, 1), (-1, 0, 0)],
            manhattan_weights: [1, 2, 4, 8],
        }
    }

    #[inline]
    pub fn face_delta(&self, face: BoxFace) -> Offset {
        self.face_deltas[face.index()]
    }
}
