use delve_chunk::{VoxelData, VoxelGrid, VoxelHandle};
use proptest::prelude::*;

proptest! {
    #[test]
    fn idx_is_a_bijection(sx in 1usize..12, sy in 1usize..12, sz in 1usize..12) {
        let g = VoxelGrid::new(sx, sy, sz);
        let mut seen = vec![false; g.len()];
        for y in 0..sy {
            for z in 0..sz {
                for x in 0..sx {
                    let i = g.idx(x, y, z);
                    prop_assert!(i < g.len());
                    prop_assert!(!seen[i]);
                    seen[i] = true;
                }
            }
        }
    }

    #[test]
    fn handle_reads_what_was_written(
        sx in 1usize..8, sy in 1usize..8, sz in 1usize..8,
        x in -2i32..10, y in -2i32..10, z in -2i32..10, ty in 1u8..10,
    ) {
        let mut g = VoxelGrid::new(sx, sy, sz);
        let inside = g.contains(x, y, z);
        if inside {
            g.set(x as usize, y as usize, z as usize, VoxelData::new(ty));
        }
        let mut h = VoxelHandle::new(&g, 0, 0, 0);
        h.set_grid_position(x, y, z);
        prop_assert_eq!(h.position(), (x, y, z));
        prop_assert_eq!(h.is_valid(), inside);
        if inside {
            prop_assert_eq!(h.voxel().type_id, ty);
        } else {
            prop_assert!(h.voxel().is_empty());
        }
    }
}

#[test]
fn from_voxels_pads_short_input() {
    let g = VoxelGrid::from_voxels(2, 2, 2, vec![VoxelData::new(3)]);
    assert_eq!(g.len(), 8);
    assert_eq!(g.get(0, 0, 0).type_id, 3);
    assert!(g.get(1, 1, 1).is_empty());
}

#[test]
fn voxel_flags_toggle_independently() {
    let mut v = VoxelData::new(2);
    v.set_visible(true);
    v.set_explored(true);
    assert!(v.is_visible() && v.is_explored());
    v.set_visible(false);
    assert!(!v.is_visible() && v.is_explored());
}
