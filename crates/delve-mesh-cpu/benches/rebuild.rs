use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use delve_chunk::{ChunkData, VoxelChunk, VoxelData, VoxelGrid, generate_world};
use delve_mesh_cpu::{MeshConfig, MeshContext, VoxelListPrimitive};
use delve_voxels::VoxelLibrary;
use delve_world::{ChunkCoord, World};

fn load_library() -> Arc<VoxelLibrary> {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let path = root.join("../../assets/voxels/voxels.toml");
    Arc::new(VoxelLibrary::load_from_path(&path).unwrap())
}

fn bench_rebuild_generated(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild_generated");
    let lib = load_library();
    let world = World::new([16, 16, 16], [3, 2, 3], 1337);
    let data = ChunkData::for_world(&world, Arc::clone(&lib));
    generate_world(&world, &data);
    let ctx = MeshContext::new(Arc::clone(&lib), MeshConfig::default());
    let chunk = data.chunk(ChunkCoord::new(1, 0, 1)).unwrap();
    let prim = VoxelListPrimitive::new();
    group.bench_function("center_16x16x16", |b| {
        b.iter(|| {
            let out = prim.rebuild(Some(&*chunk), &data, &ctx);
            black_box(out);
        })
    });
    group.finish();
}

fn bench_rebuild_checkerboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild_checkerboard");
    let lib = load_library();
    let stone = lib.id_by_name("stone").unwrap_or(1);
    let data = ChunkData::new((16, 16, 16), Arc::clone(&lib));
    let mut grid = VoxelGrid::new(16, 16, 16);
    for y in 0..16 {
        for z in 0..16 {
            for x in 0..16 {
                let v = if (x + y + z) % 2 == 0 {
                    VoxelData::new(stone).explored()
                } else {
                    VoxelData::EMPTY.explored()
                };
                grid.set(x, y, z, v);
            }
        }
    }
    let coord = ChunkCoord::new(0, 0, 0);
    let chunk = data.insert_chunk(VoxelChunk::new(coord, (0, 0, 0), grid));
    chunk.refresh_visibility(&data);
    let ctx = MeshContext::new(Arc::clone(&lib), MeshConfig::default());
    let prim = VoxelListPrimitive::new();
    // Worst case: every solid shows all six faces.
    group.bench_function("worst_case_16x16x16", |b| {
        b.iter(|| {
            let out = prim.rebuild(Some(&*chunk), &data, &ctx);
            black_box(out);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_rebuild_generated, bench_rebuild_checkerboard);
criterion_main!(benches);
