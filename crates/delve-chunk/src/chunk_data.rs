use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use delve_geom::Rect;
use delve_voxels::{VoxelLibrary, VoxelTables};
use delve_world::{ChunkCoord, World};
use hashbrown::{HashMap, HashSet};

use crate::chunk::VoxelChunk;
use crate::rules;
use crate::sunlight::{self, compute_sunlight};
use crate::voxel::VoxelData;

/// Owner of every loaded chunk and the answer to cross-chunk queries.
///
/// Lookups clone the chunk `Arc` under a brief map lock, then read the
/// chunk's own grid lock. Writers lock one chunk at a time and never hold a
/// grid lock while acquiring another.
pub struct ChunkData {
    chunks: RwLock<HashMap<ChunkCoord, Arc<VoxelChunk>>>,
    chunk_size: (usize, usize, usize),
    library: Arc<VoxelLibrary>,
    tables: VoxelTables,
    max_viewing_level: AtomicI32,
    dirty: Mutex<HashSet<ChunkCoord>>,
    tilemap_bounds: Rect,
}

impl ChunkData {
    pub fn new(chunk_size: (usize, usize, usize), library: Arc<VoxelLibrary>) -> Self {
        Self {
            chunks: RwLock::new(HashMap::new()),
            chunk_size,
            library,
            tables: VoxelTables::new(),
            max_viewing_level: AtomicI32::new(i32::MAX),
            dirty: Mutex::new(HashSet::new()),
            tilemap_bounds: Rect::UNIT,
        }
    }

    /// Sized for `world`, with the view level at its top layer.
    pub fn for_world(world: &World, library: Arc<VoxelLibrary>) -> Self {
        let data = Self::new(world.chunk_size(), library);
        data.max_viewing_level
            .store(world.world_size_y() as i32 - 1, Ordering::Relaxed);
        data
    }

    pub fn with_tilemap_bounds(mut self, bounds: Rect) -> Self {
        self.tilemap_bounds = bounds;
        self
    }

    #[inline]
    pub fn library(&self) -> &VoxelLibrary {
        &self.library
    }

    #[inline]
    pub fn library_arc(&self) -> Arc<VoxelLibrary> {
        Arc::clone(&self.library)
    }

    #[inline]
    pub fn tables(&self) -> &VoxelTables {
        &self.tables
    }

    #[inline]
    pub fn chunk_size(&self) -> (usize, usize, usize) {
        self.chunk_size
    }

    #[inline]
    pub fn tilemap_bounds(&self) -> Rect {
        self.tilemap_bounds
    }

    #[inline]
    pub fn max_viewing_level(&self) -> i32 {
        self.max_viewing_level.load(Ordering::Acquire)
    }

    #[inline]
    pub fn containing_coord(&self, wx: i32, wy: i32, wz: i32) -> ChunkCoord {
        let (sx, sy, sz) = self.chunk_size;
        ChunkCoord::containing(wx, wy, wz, sx, sy, sz)
    }

    #[inline]
    pub fn origin_of(&self, coord: ChunkCoord) -> (i32, i32, i32) {
        let (sx, sy, sz) = self.chunk_size;
        (
            coord.cx * sx as i32,
            coord.cy * sy as i32,
            coord.cz * sz as i32,
        )
    }

    /// Adds or replaces a chunk. It and its face neighbors become dirty.
    pub fn insert_chunk(&self, chunk: VoxelChunk) -> Arc<VoxelChunk> {
        let coord = chunk.coord;
        let chunk = Arc::new(chunk);
        self.chunks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(coord, Arc::clone(&chunk));
        self.mark_dirty_with_neighbors(coord);
        chunk
    }

    /// Unloads a chunk and drops its published meshes.
    pub fn remove_chunk(&self, coord: ChunkCoord) -> Option<Arc<VoxelChunk>> {
        let removed = self
            .chunks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&coord)?;
        removed.primitive.clear();
        self.dirty
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&coord);
        self.mark_dirty_with_neighbors(coord);
        Some(removed)
    }

    #[inline]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<Arc<VoxelChunk>> {
        self.chunks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&coord)
            .cloned()
    }

    #[inline]
    pub fn chunk_at_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Arc<VoxelChunk>> {
        self.chunk(self.containing_coord(wx, wy, wz))
    }

    /// Loaded coordinates in a stable order.
    pub fn coords(&self) -> Vec<ChunkCoord> {
        let mut v: Vec<ChunkCoord> = self
            .chunks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        v.sort();
        v
    }

    pub fn len(&self) -> usize {
        self.chunks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_cell_valid(&self, wx: i32, wy: i32, wz: i32) -> bool {
        self.chunk_at_world(wx, wy, wz).is_some()
    }

    /// Voxel at a world cell, empty or not; `None` when no chunk holds it.
    pub fn get_non_null_voxel_at_world_location(
        &self,
        wx: i32,
        wy: i32,
        wz: i32,
    ) -> Option<VoxelData> {
        let chunk = self.chunk_at_world(wx, wy, wz)?;
        let (lx, ly, lz) = chunk.world_to_local(wx, wy, wz)?;
        Some(chunk.read_grid().get(lx, ly, lz))
    }

    /// Applies `f` to one cell under its chunk's write lock.
    pub fn update_voxel_world(
        &self,
        wx: i32,
        wy: i32,
        wz: i32,
        f: impl FnOnce(&mut VoxelData),
    ) -> bool {
        let Some(chunk) = self.chunk_at_world(wx, wy, wz) else {
            return false;
        };
        let Some((lx, ly, lz)) = chunk.world_to_local(wx, wy, wz) else {
            return false;
        };
        let mut grid = chunk.write_grid();
        f(grid.get_mut(lx, ly, lz));
        true
    }

    /// Replaces one voxel and repairs everything derived from it: exploration
    /// of its face neighbors, the column's sunlight, nearby visibility and
    /// ramps. Every chunk whose mesh could change is marked dirty.
    pub fn set_voxel_world(&self, wx: i32, wy: i32, wz: i32, voxel: VoxelData) -> bool {
        let written = self.update_voxel_world(wx, wy, wz, |v| {
            let sun = v.sun;
            *v = voxel;
            v.sun = sun;
        });
        if !written {
            return false;
        }

        if voxel.is_empty() && voxel.is_explored() {
            for &(dx, dy, dz) in &self.tables.face_deltas {
                self.update_voxel_world(wx + dx, wy + dy, wz + dz, |n| n.set_explored(true));
            }
        }

        let mut touched: HashSet<ChunkCoord> = self.relight_column(wx, wz).into_iter().collect();

        for dy in -2..=2 {
            for dz in -2..=2 {
                for dx in -2..=2 {
                    self.refresh_visibility_at(wx + dx, wy + dy, wz + dz);
                }
            }
        }
        for dz in -1..=1 {
            for dx in -1..=1 {
                self.update_ramp_at(wx + dx, wy, wz + dz);
            }
        }
        self.update_ramp_at(wx, wy - 1, wz);

        let lo = self.containing_coord(wx - 2, wy - 2, wz - 2);
        let hi = self.containing_coord(wx + 2, wy + 2, wz + 2);
        for cy in lo.cy..=hi.cy {
            for cz in lo.cz..=hi.cz {
                for cx in lo.cx..=hi.cx {
                    touched.insert(ChunkCoord::new(cx, cy, cz));
                }
            }
        }
        for coord in touched {
            self.mark_dirty(coord);
        }
        log::debug!("voxel edit at ({wx},{wy},{wz}) -> type {}", voxel.type_id);
        true
    }

    fn refresh_visibility_at(&self, wx: i32, wy: i32, wz: i32) {
        let Some(v) = self.get_non_null_voxel_at_world_location(wx, wy, wz) else {
            return;
        };
        let visible = rules::compute_visible(
            &self.library,
            &self.tables,
            wy,
            self.max_viewing_level(),
            |dx, dy, dz| self.get_non_null_voxel_at_world_location(wx + dx, wy + dy, wz + dz),
        );
        if visible != v.is_visible() {
            self.update_voxel_world(wx, wy, wz, |n| n.set_visible(visible));
        }
    }

    fn update_ramp_at(&self, wx: i32, wy: i32, wz: i32) {
        let Some(v) = self.get_non_null_voxel_at_world_location(wx, wy, wz) else {
            return;
        };
        let ramp = rules::derive_ramp(&self.library, &self.tables, v, |dx, dy, dz| {
            self.get_non_null_voxel_at_world_location(wx + dx, wy + dy, wz + dz)
        });
        if ramp != v.ramp {
            self.update_voxel_world(wx, wy, wz, |n| n.ramp = ramp);
        }
    }

    /// Re-lights one world column through every loaded chunk stacked on it.
    /// Returns the chunks whose sunlight changed.
    pub fn relight_column(&self, wx: i32, wz: i32) -> Vec<ChunkCoord> {
        let (sx, _, sz) = self.chunk_size;
        let probe = self.containing_coord(wx, 0, wz);
        let mut column: Vec<Arc<VoxelChunk>> = self
            .chunks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|c| c.coord.cx == probe.cx && c.coord.cz == probe.cz)
            .cloned()
            .collect();
        column.sort_by(|a, b| b.coord.cy.cmp(&a.coord.cy));
        let lx = wx.rem_euclid(sx as i32) as usize;
        let lz = wz.rem_euclid(sz as i32) as usize;
        let mut lit = true;
        let mut changed = Vec::new();
        for chunk in column {
            let mut grid = chunk.write_grid();
            let (out, c) = sunlight::sun_column(&self.library, &mut grid, lx, lz, lit);
            lit = out;
            if c {
                changed.push(chunk.coord);
            }
        }
        changed
    }

    /// Sunlight for every loaded chunk, top layer first.
    pub fn relight_all(&self) {
        let mut coords = self.coords();
        coords.sort_by(|a, b| b.cy.cmp(&a.cy).then(a.cmp(b)));
        for coord in coords {
            if let Some(chunk) = self.chunk(coord) {
                compute_sunlight(&chunk, self);
            }
        }
    }

    /// Moves the cutaway plane. Visibility is re-derived and every chunk
    /// becomes dirty.
    pub fn set_max_viewing_level(&self, level: i32) {
        let prev = self.max_viewing_level.swap(level, Ordering::AcqRel);
        if prev == level {
            return;
        }
        for coord in self.coords() {
            if let Some(chunk) = self.chunk(coord) {
                chunk.refresh_visibility(self);
            }
            self.mark_dirty(coord);
        }
        log::debug!("max viewing level {prev} -> {level}");
    }

    pub fn mark_dirty(&self, coord: ChunkCoord) {
        if self.chunk(coord).is_none() {
            return;
        }
        self.dirty
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(coord);
    }

    fn mark_dirty_with_neighbors(&self, coord: ChunkCoord) {
        self.mark_dirty(coord);
        for &(dx, dy, dz) in &self.tables.face_deltas {
            self.mark_dirty(coord.offset(dx, dy, dz));
        }
    }

    /// Drains the dirty set in a stable order.
    pub fn take_dirty(&self) -> Vec<ChunkCoord> {
        let mut v: Vec<ChunkCoord> = self
            .dirty
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect();
        v.sort();
        v
    }

    pub fn dirty_len(&self) -> usize {
        self.dirty
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
