use delve_voxels::{VoxelLibrary, VoxelTypeId};
use delve_world::{ChunkCoord, World};

use crate::chunk::VoxelChunk;
use crate::chunk_data::ChunkData;
use crate::grid::VoxelGrid;
use crate::voxel::VoxelData;

fn resolve(library: &VoxelLibrary, name: &str) -> VoxelTypeId {
    match library.id_by_name(name) {
        Some(id) => id,
        None => {
            log::warn!("terrain block {name:?} is not a voxel type; using bedrock");
            library.bedrock()
        }
    }
}

/// Fills one chunk from the world heightmap.
///
/// Columns are bedrock at the floor, subsoil up to the topsoil band, then
/// surface material. Open air and the topmost solid cell are explored.
pub fn generate_chunk(world: &World, coord: ChunkCoord, library: &VoxelLibrary) -> VoxelChunk {
    let (sx, sy, sz) = world.chunk_size();
    let origin = world.chunk_origin(coord);
    let terrain = &world.terrain;
    let surface = resolve(library, &terrain.surface);
    let subsoil = resolve(library, &terrain.subsoil);
    let floor = resolve(library, &terrain.floor);
    let sampler = world.make_sampler();

    let mut grid = VoxelGrid::new(sx, sy, sz);
    for z in 0..sz {
        for x in 0..sx {
            let wx = origin.0 + x as i32;
            let wz = origin.2 + z as i32;
            let h = sampler.height_at(wx, wz);
            for y in 0..sy {
                let wy = origin.1 + y as i32;
                let v = if wy > h {
                    VoxelData::EMPTY.explored()
                } else {
                    let ty = if wy < terrain.bedrock_thickness {
                        floor
                    } else if wy > h - terrain.topsoil_thickness {
                        surface
                    } else {
                        subsoil
                    };
                    let v = VoxelData::new(ty);
                    if wy == h { v.explored() } else { v }
                };
                grid.set(x, y, z, v);
            }
        }
    }
    VoxelChunk::new(coord, origin, grid)
}

/// Generates every chunk of `world` into `data` and runs the derived passes
/// in dependency order: exploration, sunlight, visibility, ramps.
pub fn generate_world(world: &World, data: &ChunkData) {
    for coord in world.chunk_coords() {
        data.insert_chunk(generate_chunk(world, coord, data.library()));
    }
    let coords = data.coords();
    for &coord in &coords {
        if let Some(chunk) = data.chunk(coord) {
            chunk.explore_surface(data);
        }
    }
    data.relight_all();
    for &coord in &coords {
        if let Some(chunk) = data.chunk(coord) {
            chunk.refresh_visibility(data);
            chunk.update_ramps(data);
        }
    }
    log::info!(
        "generated {} chunks ({}x{}x{} voxels)",
        coords.len(),
        world.world_size_x(),
        world.world_size_y(),
        world.world_size_z()
    );
}
