use std::sync::Arc;

use delve_chunk::{ChunkData, VoxelChunk, VoxelData, VoxelGrid};
use delve_lighting::calculate_vertex_light;
use delve_voxels::{VoxelLibrary, VoxelVertex};
use delve_world::ChunkCoord;
use proptest::prelude::*;

const N: usize = 3;

fn library() -> Arc<VoxelLibrary> {
    Arc::new(
        VoxelLibrary::from_toml_str(include_str!("../../../assets/voxels/voxels.toml")).unwrap(),
    )
}

fn arb_voxel() -> impl Strategy<Value = VoxelData> {
    (0u8..8, any::<bool>(), prop_oneof![Just(0u8), Just(255u8)]).prop_map(|(ty, explored, sun)| {
        let mut v = VoxelData::new(ty);
        v.set_explored(explored);
        v.sun = sun;
        v
    })
}

proptest! {
    #[test]
    fn light_is_bounded_and_deterministic(
        cells in prop::collection::vec(arb_voxel(), N * N * N),
        x in 0i32..N as i32, y in 0i32..N as i32, z in 0i32..N as i32,
        corner in 0usize..8,
    ) {
        let data = ChunkData::new((N, N, N), library());
        let coord = ChunkCoord::new(0, 0, 0);
        data.insert_chunk(VoxelChunk::new(coord, (0, 0, 0), VoxelGrid::from_voxels(N, N, N, cells)));
        let chunk = data.chunk(coord).unwrap();
        let grid = chunk.read_grid();
        let h = chunk.make_handle(&grid, x, y, z);
        let corner = VoxelVertex::ALL[corner];
        let a = calculate_vertex_light(&h, corner, chunk.origin, &data, data.tables());
        let b = calculate_vertex_light(&h, corner, chunk.origin, &data, data.tables());
        prop_assert_eq!(a, b);
        // The sampled voxel always counts as a hit, so at most 7 of 8 are open.
        prop_assert!(a.ambient <= 223);
        prop_assert!(a.dynamic == 0 || a.dynamic == 255);
    }
}
