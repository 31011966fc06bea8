use delve_world::{ChunkCoord, World, WorldConfig};
use proptest::prelude::*;

fn arb_world() -> impl Strategy<Value = World> {
    (1usize..20, 1usize..20, 1usize..20, 1usize..5, 1usize..5, 1usize..5, any::<i32>())
        .prop_map(|(sx, sy, sz, cx, cy, cz, seed)| World::new([sx, sy, sz], [cx, cy, cz], seed))
}

proptest! {
    #[test]
    fn containing_chunk_holds_the_cell(w in arb_world(), wx in -100i32..100, wy in -100i32..100, wz in -100i32..100) {
        let c = w.chunk_containing(wx, wy, wz);
        let (ox, oy, oz) = w.chunk_origin(c);
        prop_assert!(wx >= ox && wx < ox + w.chunk_size_x as i32);
        prop_assert!(wy >= oy && wy < oy + w.chunk_size_y as i32);
        prop_assert!(wz >= oz && wz < oz + w.chunk_size_z as i32);
    }

    #[test]
    fn heights_stay_inside_world(w in arb_world(), wx in -500i32..500, wz in -500i32..500) {
        let s = w.make_sampler();
        let h = s.height_at(wx, wz);
        prop_assert!(h >= 0 && h < w.world_size_y() as i32);
    }
}

#[test]
fn chunk_coords_cover_the_grid_once() {
    let w = World::new([8, 8, 8], [3, 2, 4], 7);
    let coords: Vec<ChunkCoord> = w.chunk_coords().collect();
    assert_eq!(coords.len(), 24);
    let mut sorted = coords.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), 24);
    assert!(coords.iter().all(|c| w.contains_chunk(*c)));
    assert!(!w.contains_chunk(ChunkCoord::new(3, 0, 0)));
    assert!(!w.contains_chunk(ChunkCoord::new(0, -1, 0)));
}

#[test]
fn sampler_is_deterministic_per_seed() {
    let w = World::new([16, 16, 16], [2, 2, 2], 42);
    let a = w.make_sampler();
    let b = w.make_sampler();
    for x in -10..10 {
        assert_eq!(a.height_at(x, x * 3), b.height_at(x, x * 3));
    }
}

#[test]
fn world_config_defaults_fill_missing_fields() {
    let cfg: WorldConfig = toml::from_str("seed = 9\nchunks = [2, 1, 2]").unwrap();
    assert_eq!(cfg.seed, 9);
    assert_eq!(cfg.chunk_size, [16, 16, 16]);
    assert_eq!(cfg.terrain.surface, "dirt");
    let w = World::from_config(&cfg);
    assert_eq!(w.world_size_x(), 32);
    assert_eq!(w.world_size_y(), 16);
}
