//! Per-vertex light sampling: sunlight, ambient occlusion, and emissive light.
#![forbid(unsafe_code)]

use delve_chunk::{ChunkData, VoxelHandle};
use delve_voxels::{VoxelTables, VoxelVertex};


/// Light carried by one mesh vertex, each channel in `[0, 255]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexColorInfo {
    pub sun: u8,
    pub ambient: u8,
    pub dynamic: u8,
}

impl VertexColorInfo {
    /// Packed as `(sun, ambient, dynamic, 255)` for the vertex color attribute.
    #[inline]
    pub fn as_color(self) -> [u8; 4] {
        [self.sun, self.ambient, self.dynamic, 255]
    }
}

/// Samples light at `corner` of the voxel under `handle`.
///
/// The voxel and the seven cells sharing the corner are averaged. Cells the
/// handle's grid does not cover are read through `world` with `grid_origin`
/// as the grid's world offset; cells nobody holds are skipped. Solid or
/// unexplored cells darken the ambient term, and an emissive one lights the
/// dynamic channel fully.
pub fn calculate_vertex_light(
    handle: &VoxelHandle<'_>,
    corner: VoxelVertex,
    grid_origin: (i32, i32, i32),
    world: &ChunkData,
    tables: &VoxelTables,
) -> VertexColorInfo {
    let library = world.library();
    let (x, y, z) = handle.position();
    let me = handle.voxel();

    let mut sun_sum = me.sun as u32;
    let mut hit = 1u32;
    let mut checked = 1u32;
    let mut dynamic = 0u8;

    for &(dx, dy, dz) in &tables.vertex_neighbors[corner.index()] {
        let neighbor = handle.neighbor(dx, dy, dz).or_else(|| {
            world.get_non_null_voxel_at_world_location(
                grid_origin.0 + x + dx,
                grid_origin.1 + y + dy,
                grid_origin.2 + z + dz,
            )
        });
        let Some(n) = neighbor else {
            continue;
        };
        checked += 1;
        sun_sum += n.sun as u32;
        if !n.is_empty() || !n.is_explored() {
            hit += 1;
            if library.emits_light(n.type_id) {
                dynamic = 255;
            }
        }
    }

    let ambient = ((1.0 - hit as f32 / checked as f32) * 255.0).round() as u8;
    VertexColorInfo {
        sun: (sun_sum / checked) as u8,
        ambient,
        dynamic,
    }
}
