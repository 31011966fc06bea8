//! Top-down sunlight: full strength through empty and transparent cells,
//! zero beneath the first opaque one. The first opaque cell itself is lit.

use delve_voxels::VoxelLibrary;

use crate::chunk::VoxelChunk;
use crate::chunk_data::ChunkData;
use crate::grid::VoxelGrid;
use crate::voxel::VoxelData;

pub const SUN_FULL: u8 = 255;

#[inline]
pub fn passes_sun(library: &VoxelLibrary, v: VoxelData) -> bool {
    v.is_empty() || library.is_transparent(v.type_id)
}

/// Lights one column of `grid` given whether sun reaches its top.
/// Returns whether sun leaves the bottom, and whether any cell changed.
pub fn sun_column(
    library: &VoxelLibrary,
    grid: &mut VoxelGrid,
    x: usize,
    z: usize,
    lit_from_above: bool,
) -> (bool, bool) {
    let mut lit = lit_from_above;
    let mut changed = false;
    for y in (0..grid.sy).rev() {
        let v = grid.get_mut(x, y, z);
        let sun = if lit { SUN_FULL } else { 0 };
        if v.sun != sun {
            v.sun = sun;
            changed = true;
        }
        if !passes_sun(library, *v) {
            lit = false;
        }
    }
    (lit, changed)
}

/// Recomputes sun for every column of `chunk`, reading the cell above its top
/// through `world`. Chunks above must be lit first.
pub fn compute_sunlight(chunk: &VoxelChunk, world: &ChunkData) -> bool {
    let library = world.library();
    let top = chunk.origin.1 + chunk.sy as i32;
    let mut incoming = Vec::with_capacity(chunk.sx * chunk.sz);
    for z in 0..chunk.sz {
        for x in 0..chunk.sx {
            let above = world.get_non_null_voxel_at_world_location(
                chunk.origin.0 + x as i32,
                top,
                chunk.origin.2 + z as i32,
            );
            incoming.push(match above {
                None => true,
                Some(a) => a.sun == SUN_FULL && passes_sun(library, a),
            });
        }
    }
    let mut grid = chunk.write_grid();
    let mut changed = false;
    for z in 0..chunk.sz {
        for x in 0..chunk.sx {
            let (_, c) = sun_column(library, &mut grid, x, z, incoming[z * chunk.sx + x]);
            changed |= c;
        }
    }
    changed
}
