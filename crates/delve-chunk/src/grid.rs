use crate::voxel::VoxelData;

/// Dense voxel storage for one chunk, laid out `(y * sz + z) * sx + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    pub voxels: Vec<VoxelData>,
}

impl VoxelGrid {
    pub fn new(sx: usize, sy: usize, sz: usize) -> Self {
        Self {
            sx,
            sy,
            sz,
            voxels: vec![VoxelData::EMPTY; sx * sy * sz],
        }
    }

    pub fn from_voxels(sx: usize, sy: usize, sz: usize, voxels: Vec<VoxelData>) -> Self {
        let mut v = voxels;
        let expect = sx * sy * sz;
        if v.len() != expect {
            v.resize(expect, VoxelData::EMPTY);
        }
        Self {
            sx,
            sy,
            sz,
            voxels: v,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.sx
            && (y as usize) < self.sy
            && (z as usize) < self.sz
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> VoxelData {
        self.voxels[self.idx(x, y, z)]
    }

    /// Signed lookup; `None` outside the grid.
    #[inline]
    pub fn get_i(&self, x: i32, y: i32, z: i32) -> Option<VoxelData> {
        if !self.contains(x, y, z) {
            return None;
        }
        Some(self.get(x as usize, y as usize, z as usize))
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize, z: usize) -> &mut VoxelData {
        let i = self.idx(x, y, z);
        &mut self.voxels[i]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, v: VoxelData) {
        let i = self.idx(x, y, z);
        self.voxels[i] = v;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn has_solid(&self) -> bool {
        self.voxels.iter().any(|v| !v.is_empty())
    }
}

/// Lightweight cursor into a grid. Repositioning never allocates.
#[derive(Clone, Copy, Debug)]
pub struct VoxelHandle<'a> {
    grid: &'a VoxelGrid,
    x: i32,
    y: i32,
    z: i32,
}

impl<'a> VoxelHandle<'a> {
    #[inline]
    pub fn new(grid: &'a VoxelGrid, x: i32, y: i32, z: i32) -> Self {
        Self { grid, x, y, z }
    }

    #[inline]
    pub fn set_grid_position(&mut self, x: i32, y: i32, z: i32) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    #[inline]
    pub fn grid(&self) -> &'a VoxelGrid {
        self.grid
    }

    #[inline]
    pub fn position(&self) -> (i32, i32, i32) {
        (self.x, self.y, self.z)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.grid.contains(self.x, self.y, self.z)
    }

    /// Voxel under the cursor, or `EMPTY` if the cursor is off the grid.
    #[inline]
    pub fn voxel(&self) -> VoxelData {
        self.grid
            .get_i(self.x, self.y, self.z)
            .unwrap_or(VoxelData::EMPTY)
    }

    /// Neighbor inside the same grid; `None` when the offset leaves it.
    #[inline]
    pub fn neighbor(&self, dx: i32, dy: i32, dz: i32) -> Option<VoxelData> {
        self.grid.get_i(self.x + dx, self.y + dy, self.z + dz)
    }
}
