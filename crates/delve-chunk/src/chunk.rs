use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use delve_geom::PrimitiveMesh;
use delve_world::ChunkCoord;

use crate::chunk_data::ChunkData;
use crate::grid::{VoxelGrid, VoxelHandle};
use crate::rules;
use crate::slot::PublishSlot;
use crate::voxel::VoxelData;

/// One loaded chunk: its voxels plus the mesh slot the renderer polls.
#[derive(Debug)]
pub struct VoxelChunk {
    pub coord: ChunkCoord,
    /// World cell of local `(0, 0, 0)`.
    pub origin: (i32, i32, i32),
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    grid: RwLock<VoxelGrid>,
    pub primitive: PublishSlot<PrimitiveMesh>,
}

impl VoxelChunk {
    pub fn new(coord: ChunkCoord, origin: (i32, i32, i32), grid: VoxelGrid) -> Self {
        Self {
            coord,
            origin,
            sx: grid.sx,
            sy: grid.sy,
            sz: grid.sz,
            grid: RwLock::new(grid),
            primitive: PublishSlot::new(),
        }
    }

    pub fn read_grid(&self) -> RwLockReadGuard<'_, VoxelGrid> {
        self.grid.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write_grid(&self) -> RwLockWriteGuard<'_, VoxelGrid> {
        self.grid.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cursor at local `(x, y, z)` over a grid guard borrowed from this chunk.
    #[inline]
    pub fn make_handle<'g>(&self, grid: &'g VoxelGrid, x: i32, y: i32, z: i32) -> VoxelHandle<'g> {
        VoxelHandle::new(grid, x, y, z)
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        self.world_to_local(wx, wy, wz).is_some()
    }

    #[inline]
    pub fn world_to_local(&self, wx: i32, wy: i32, wz: i32) -> Option<(usize, usize, usize)> {
        let lx = wx - self.origin.0;
        let ly = wy - self.origin.1;
        let lz = wz - self.origin.2;
        if lx < 0 || ly < 0 || lz < 0 {
            return None;
        }
        let (lx, ly, lz) = (lx as usize, ly as usize, lz as usize);
        (lx < self.sx && ly < self.sy && lz < self.sz).then_some((lx, ly, lz))
    }

    /// Resolves local coordinates that may fall outside this chunk.
    ///
    /// Cells inside come from `grid` (a guard the caller already holds);
    /// cells outside are read through `world`, never from this chunk's lock.
    #[inline]
    pub fn sample(
        &self,
        grid: &VoxelGrid,
        world: &ChunkData,
        x: i32,
        y: i32,
        z: i32,
    ) -> Option<VoxelData> {
        if let Some(v) = grid.get_i(x, y, z) {
            return Some(v);
        }
        world.get_non_null_voxel_at_world_location(
            self.origin.0 + x,
            self.origin.1 + y,
            self.origin.2 + z,
        )
    }

    pub fn compute_transition_value(
        &self,
        grid: &VoxelGrid,
        world: &ChunkData,
        x: i32,
        y: i32,
        z: i32,
    ) -> usize {
        let Some(voxel) = grid.get_i(x, y, z) else {
            return 0;
        };
        let Some(ty) = world.library().get_type(voxel.type_id) else {
            return 0;
        };
        rules::transition_value(world.tables(), ty.transitions, voxel.type_id, |dx, dy, dz| {
            self.sample(grid, world, x + dx, y + dy, z + dz)
        })
    }

    /// Re-derives the visible flag of every voxel. Returns how many changed.
    pub fn refresh_visibility(&self, world: &ChunkData) -> usize {
        let library = world.library();
        let tables = world.tables();
        let max_view = world.max_viewing_level();
        let updates = self.collect(|grid, x, y, z, v| {
            let visible =
                rules::compute_visible(library, tables, self.origin.1 + y, max_view, |dx, dy, dz| {
                    self.sample(grid, world, x + dx, y + dy, z + dz)
                });
            (visible != v.is_visible()).then(|| {
                let mut n = v;
                n.set_visible(visible);
                n
            })
        });
        self.apply(&updates)
    }

    /// Re-derives ramp corners for every voxel. Returns how many changed.
    pub fn update_ramps(&self, world: &ChunkData) -> usize {
        let library = world.library();
        let tables = world.tables();
        let updates = self.collect(|grid, x, y, z, v| {
            let ramp = rules::derive_ramp(library, tables, v, |dx, dy, dz| {
                self.sample(grid, world, x + dx, y + dy, z + dz)
            });
            (ramp != v.ramp).then(|| {
                let mut n = v;
                n.ramp = ramp;
                n
            })
        });
        self.apply(&updates)
    }

    /// Marks voxels that touch explored empty space as explored.
    pub fn explore_surface(&self, world: &ChunkData) -> usize {
        let tables = world.tables();
        let updates = self.collect(|grid, x, y, z, v| {
            if v.is_explored() {
                return None;
            }
            let touches = tables.face_deltas.iter().any(|&(dx, dy, dz)| {
                self.sample(grid, world, x + dx, y + dy, z + dz)
                    .is_some_and(|n| n.is_explored() && n.is_empty())
            });
            touches.then(|| v.explored())
        });
        self.apply(&updates)
    }

    /// Evaluates `f` over every voxel under a read guard, gathering replacements.
    fn collect(
        &self,
        f: impl Fn(&VoxelGrid, i32, i32, i32, VoxelData) -> Option<VoxelData>,
    ) -> Vec<(usize, VoxelData)> {
        let grid = self.read_grid();
        let mut out = Vec::new();
        for y in 0..grid.sy {
            for z in 0..grid.sz {
                for x in 0..grid.sx {
                    let v = grid.get(x, y, z);
                    if let Some(n) = f(&grid, x as i32, y as i32, z as i32, v) {
                        out.push((grid.idx(x, y, z), n));
                    }
                }
            }
        }
        out
    }

    // Cells whose type changed since the read pass are left alone.
    fn apply(&self, updates: &[(usize, VoxelData)]) -> usize {
        if updates.is_empty() {
            return 0;
        }
        let mut grid = self.write_grid();
        for &(i, n) in updates {
            if let Some(cur) = grid.voxels.get_mut(i) {
                if cur.type_id == n.type_id {
                    cur.flags = n.flags;
                    cur.ramp = n.ramp;
                }
            }
        }
        updates.len()
    }
}
