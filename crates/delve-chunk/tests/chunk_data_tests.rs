use std::sync::Arc;

use delve_chunk::{
    ChunkData, VoxelChunk, VoxelData, VoxelGrid, compute_sunlight, generate_chunk, generate_world,
};
use delve_geom::PrimitiveMesh;
use delve_voxels::{RampType, VoxelLibrary};
use delve_world::{ChunkCoord, World};

const N: usize = 4;

fn library() -> Arc<VoxelLibrary> {
    Arc::new(
        VoxelLibrary::from_toml_str(include_str!("../../../assets/voxels/voxels.toml"))
            .expect("voxel config"),
    )
}

/// Two 4^3 chunks side by side along X: solid stone up to y=1, explored air above.
fn two_chunks() -> ChunkData {
    let lib = library();
    let stone = lib.id_by_name("stone").unwrap();
    let data = ChunkData::new((N, N, N), lib);
    for cx in 0..2 {
        let coord = ChunkCoord::new(cx, 0, 0);
        let mut grid = VoxelGrid::new(N, N, N);
        for y in 0..N {
            for z in 0..N {
                for x in 0..N {
                    let v = if y <= 1 {
                        VoxelData::new(stone)
                    } else {
                        VoxelData::EMPTY.explored()
                    };
                    grid.set(x, y, z, v);
                }
            }
        }
        data.insert_chunk(VoxelChunk::new(coord, data.origin_of(coord), grid));
    }
    for coord in data.coords() {
        let c = data.chunk(coord).unwrap();
        c.explore_surface(&data);
        c.refresh_visibility(&data);
    }
    data.take_dirty();
    data
}

#[test]
fn lookups_cross_chunk_borders() {
    let data = two_chunks();
    let stone = data.library().id_by_name("stone").unwrap();
    assert!(data.is_cell_valid(7, 0, 0));
    assert!(!data.is_cell_valid(8, 0, 0));
    assert!(!data.is_cell_valid(-1, 0, 0));
    assert_eq!(
        data.get_non_null_voxel_at_world_location(5, 1, 3).map(|v| v.type_id),
        Some(stone)
    );
    assert!(data.get_non_null_voxel_at_world_location(5, 2, 3).unwrap().is_empty());
    assert!(data.get_non_null_voxel_at_world_location(0, -1, 0).is_none());
    assert_eq!(data.chunk_at_world(6, 0, 0).unwrap().coord, ChunkCoord::new(1, 0, 0));
}

#[test]
fn surface_is_explored_and_visible_buried_is_not() {
    let data = two_chunks();
    let top = data.get_non_null_voxel_at_world_location(2, 1, 2).unwrap();
    assert!(top.is_explored() && top.is_visible());
    let buried = data.get_non_null_voxel_at_world_location(2, 0, 2).unwrap();
    assert!(!buried.is_explored());
    // Nothing loaded below y=0, so the bottom layer borders missing space.
    assert!(buried.is_visible());
}

#[test]
fn digging_reveals_and_dirties_border_neighbors() {
    let data = two_chunks();
    // Dig the top cell on the +X edge of chunk 0.
    assert!(data.set_voxel_world(3, 1, 1, VoxelData::EMPTY.explored()));
    let below = data.get_non_null_voxel_at_world_location(3, 0, 1).unwrap();
    assert!(below.is_explored());
    assert!(below.is_visible());
    // The neighbor across the chunk border sees the new hole.
    let across = data.get_non_null_voxel_at_world_location(4, 1, 1).unwrap();
    assert!(across.is_explored());
    let dirty = data.take_dirty();
    assert!(dirty.contains(&ChunkCoord::new(0, 0, 0)));
    assert!(dirty.contains(&ChunkCoord::new(1, 0, 0)));
    assert!(data.take_dirty().is_empty());
}

#[test]
fn editing_outside_loaded_chunks_is_ignored() {
    let data = two_chunks();
    assert!(!data.set_voxel_world(100, 0, 0, VoxelData::EMPTY));
    assert_eq!(data.dirty_len(), 0);
}

#[test]
fn cutaway_exposes_voxels_and_dirties_everything() {
    let data = two_chunks();
    let buried = data.get_non_null_voxel_at_world_location(2, 0, 2).unwrap();
    assert!(buried.is_visible());
    // A fully enclosed cell: give it a solid floor by stacking a chunk below.
    let stone = data.library().id_by_name("stone").unwrap();
    let below = ChunkCoord::new(0, -1, 0);
    let mut grid = VoxelGrid::new(N, N, N);
    grid.voxels.iter_mut().for_each(|v| *v = VoxelData::new(stone));
    data.insert_chunk(VoxelChunk::new(below, data.origin_of(below), grid));
    data.chunk(ChunkCoord::new(0, 0, 0))
        .unwrap()
        .refresh_visibility(&data);
    assert!(!data.get_non_null_voxel_at_world_location(2, 0, 2).unwrap().is_visible());
    data.take_dirty();

    data.set_max_viewing_level(0);
    assert!(data.get_non_null_voxel_at_world_location(2, 0, 2).unwrap().is_visible());
    assert_eq!(data.take_dirty().len(), 3);
}

#[test]
fn remove_chunk_drops_published_mesh() {
    let data = two_chunks();
    let c = data.chunk(ChunkCoord::new(1, 0, 0)).unwrap();
    c.primitive.publish(Arc::new(PrimitiveMesh::default()));
    c.primitive.take_new();
    let removed = data.remove_chunk(ChunkCoord::new(1, 0, 0)).unwrap();
    assert!(removed.primitive.current().is_none());
    assert!(data.chunk(ChunkCoord::new(1, 0, 0)).is_none());
    assert_eq!(data.take_dirty(), vec![ChunkCoord::new(0, 0, 0)]);
}

#[test]
fn sunlight_stops_at_first_opaque_cell() {
    let data = two_chunks();
    let glass = data.library().id_by_name("glass").unwrap();
    data.set_voxel_world(1, 2, 1, VoxelData::new(glass));
    data.relight_all();
    let at = |y| data.get_non_null_voxel_at_world_location(1, y, 1).unwrap().sun;
    assert_eq!(at(3), 255);
    assert_eq!(at(2), 255);
    assert_eq!(at(1), 255);
    assert_eq!(at(0), 0);

    let stone = data.library().id_by_name("stone").unwrap();
    data.set_voxel_world(1, 3, 1, VoxelData::new(stone));
    assert_eq!(at(3), 255);
    assert_eq!(at(2), 0);
    assert_eq!(at(1), 0);
}

#[test]
fn ramps_follow_edits() {
    let lib = library();
    let dirt = lib.id_by_name("dirt").unwrap();
    let data = ChunkData::new((N, N, N), lib);
    let coord = ChunkCoord::new(0, 0, 0);
    let mut grid = VoxelGrid::new(N, N, N);
    for z in 0..N {
        for x in 0..N {
            grid.set(x, 0, z, VoxelData::new(dirt).explored());
            for y in 1..N {
                grid.set(x, y, z, VoxelData::EMPTY.explored());
            }
        }
    }
    let chunk = data.insert_chunk(VoxelChunk::new(coord, (0, 0, 0), grid));
    chunk.update_ramps(&data);
    // Flat ground: nothing empty beside the top layer.
    assert_eq!(data.get_non_null_voxel_at_world_location(1, 0, 1).unwrap().ramp, RampType::NONE);
    // Dig a hole; the cell at +X gets its left corners ramped.
    data.set_voxel_world(1, 0, 1, VoxelData::EMPTY.explored());
    let r = data.get_non_null_voxel_at_world_location(2, 0, 1).unwrap().ramp;
    assert!(r.contains(RampType::TOP_FRONT_LEFT));
    assert!(r.contains(RampType::TOP_BACK_LEFT));
    assert!(!r.contains(RampType::TOP_FRONT_RIGHT));
}

#[test]
fn transition_value_reads_across_chunks() {
    let lib = library();
    let dirt = lib.id_by_name("dirt").unwrap();
    let data = ChunkData::new((N, N, N), lib);
    for cx in 0..2 {
        let coord = ChunkCoord::new(cx, 0, 0);
        let mut grid = VoxelGrid::new(N, N, N);
        grid.voxels.iter_mut().for_each(|v| *v = VoxelData::new(dirt));
        data.insert_chunk(VoxelChunk::new(coord, data.origin_of(coord), grid));
    }
    let c0 = data.chunk(ChunkCoord::new(0, 0, 0)).unwrap();
    let grid = c0.read_grid();
    // Every same-height neighbor is dirt or unloaded.
    assert_eq!(c0.compute_transition_value(&grid, &data, 3, 0, 0), 15);
    drop(grid);
    data.set_voxel_world(4, 0, 1, VoxelData::EMPTY.explored());
    let grid = c0.read_grid();
    assert_eq!(c0.compute_transition_value(&grid, &data, 3, 0, 1), 15 - 2);
}

#[test]
fn generated_world_is_lit_explored_and_bounded() {
    let lib = library();
    let world = World::new([8, 8, 8], [2, 2, 2], 11);
    let data = ChunkData::for_world(&world, Arc::clone(&lib));
    generate_world(&world, &data);
    assert_eq!(data.len(), 8);
    assert_eq!(data.max_viewing_level(), 15);
    let bedrock = lib.bedrock();
    let sampler = world.make_sampler();
    for (wx, wz) in [(0, 0), (5, 9), (15, 15)] {
        let h = sampler.height_at(wx, wz);
        let top = data.get_non_null_voxel_at_world_location(wx, h, wz).unwrap();
        assert!(!top.is_empty());
        assert!(top.is_explored());
        assert!(top.is_visible());
        assert_eq!(top.sun, 255);
        let floor = data.get_non_null_voxel_at_world_location(wx, 0, wz).unwrap();
        if h > 0 {
            assert_eq!(floor.type_id, bedrock);
            assert_eq!(floor.sun, 0);
        }
        if h + 1 < 16 {
            let air = data.get_non_null_voxel_at_world_location(wx, h + 1, wz).unwrap();
            assert!(air.is_empty() && air.is_explored());
        }
    }
}

#[test]
fn single_chunk_sunlight_pass() {
    let lib = library();
    let world = World::new([4, 4, 4], [1, 1, 1], 3);
    let data = ChunkData::for_world(&world, lib);
    let chunk = generate_chunk(&world, ChunkCoord::new(0, 0, 0), data.library());
    let chunk = data.insert_chunk(chunk);
    assert!(compute_sunlight(&chunk, &data));
    assert!(!compute_sunlight(&chunk, &data));
}
