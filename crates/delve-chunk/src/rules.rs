//! Per-voxel derivation rules shared by the chunk passes, world edits and the mesher.
//!
//! `lookup(dx, dy, dz)` resolves a neighbor relative to the voxel being
//! evaluated; `None` means no voxel exists there (unloaded or off-world).

use delve_voxels::{
    BoxFace, RampType, TransitionMode, VoxelLibrary, VoxelTables, VoxelTypeId, VoxelVertex,
    should_ramp,
};

use crate::voxel::VoxelData;

/// Whether the face of `voxel` pointing at `neighbor` must be drawn.
///
/// `neighbor_wy` is the neighbor's world Y, compared against the cutaway level.
pub fn is_face_visible(
    library: &VoxelLibrary,
    voxel: VoxelData,
    neighbor: VoxelData,
    face: BoxFace,
    neighbor_wy: i32,
    max_viewing_level: i32,
) -> bool {
    if neighbor.is_explored() && neighbor.is_empty() {
        return true;
    }
    if neighbor_wy > max_viewing_level {
        return true;
    }
    let Some(ntype) = library.get_type(neighbor.type_id) else {
        return true;
    };
    let self_transparent = library.is_transparent(voxel.type_id);
    if ntype.transparent && (!self_transparent || ntype.id != voxel.type_id) {
        return true;
    }
    if ntype.can_ramp && face.is_side() {
        let self_can_ramp = library.can_ramp(voxel.type_id);
        let shared = face.opposite();
        for corner in VoxelVertex::ALL {
            if !corner.is_top() || !corner.on_face(shared) {
                continue;
            }
            if !should_ramp(corner, neighbor.ramp) {
                continue;
            }
            let mine = corner.mirrored_across(face);
            if !(self_can_ramp && should_ramp(mine, voxel.ramp)) {
                return true;
            }
        }
    }
    false
}

/// True when `neighbor` lets light and sight through a shared face.
#[inline]
pub fn is_open(
    library: &VoxelLibrary,
    neighbor: Option<VoxelData>,
    neighbor_wy: i32,
    max_viewing_level: i32,
) -> bool {
    match neighbor {
        None => true,
        Some(n) => {
            (n.is_explored() && n.is_empty())
                || library.is_transparent(n.type_id)
                || neighbor_wy > max_viewing_level
        }
    }
}

/// A voxel is visible when any of its six neighbors is open.
pub fn compute_visible(
    library: &VoxelLibrary,
    tables: &VoxelTables,
    wy: i32,
    max_viewing_level: i32,
    lookup: impl Fn(i32, i32, i32) -> Option<VoxelData>,
) -> bool {
    tables
        .face_deltas
        .iter()
        .any(|&(dx, dy, dz)| is_open(library, lookup(dx, dy, dz), wy + dy, max_viewing_level))
}

/// Top corners next to empty same-height cells are lowered, provided the
/// type can ramp and nothing sits on top of it.
pub fn derive_ramp(
    library: &VoxelLibrary,
    tables: &VoxelTables,
    voxel: VoxelData,
    lookup: impl Fn(i32, i32, i32) -> Option<VoxelData>,
) -> RampType {
    if voxel.is_empty() || !library.can_ramp(voxel.type_id) {
        return RampType::NONE;
    }
    if lookup(0, 1, 0).is_some_and(|above| !above.is_empty()) {
        return RampType::NONE;
    }
    let mut ramp = RampType::NONE;
    for corner in VoxelVertex::ALL {
        if !corner.is_top() {
            continue;
        }
        let open = tables.vertex_neighbors_2d[corner.index()]
            .iter()
            .any(|&(dx, dy, dz)| lookup(dx, dy, dz).is_some_and(|n| n.is_empty()));
        if open {
            ramp = ramp.union(RampType::for_corner(corner));
        }
    }
    ramp
}

/// Sum of Manhattan weights over connected neighbors; missing neighbors connect.
pub fn transition_value(
    tables: &VoxelTables,
    mode: TransitionMode,
    type_id: VoxelTypeId,
    lookup: impl Fn(i32, i32, i32) -> Option<VoxelData>,
) -> usize {
    if mode == TransitionMode::None {
        return 0;
    }
    let mut value = 0usize;
    for (i, &(dx, dy, dz)) in tables.manhattan.iter().enumerate() {
        let connected = match lookup(dx, dy, dz) {
            None => true,
            Some(n) => match mode {
                TransitionMode::SameType => n.type_id == type_id,
                TransitionMode::AnySolid => !n.is_empty(),
                TransitionMode::None => false,
            },
        };
        if connected {
            value += tables.manhattan_weights[i] as usize;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib() -> VoxelLibrary {
        VoxelLibrary::from_toml_str(
            r#"
            [[voxels]]
            name = "bedrock"
            all = [0, 0]
            [[voxels]]
            name = "dirt"
            all = [1, 0]
            can_ramp = true
            [[voxels]]
            name = "glass"
            all = [2, 0]
            transparent = true
            [[voxels]]
            name = "water"
            all = [3, 0]
            transparent = true
        "#,
        )
        .unwrap()
    }

    fn id(lib: &VoxelLibrary, n: &str) -> VoxelTypeId {
        lib.id_by_name(n).unwrap()
    }

    #[test]
    fn explored_air_shows_face_unexplored_air_hides_it() {
        let lib = lib();
        let dirt = VoxelData::new(id(&lib, "dirt"));
        let air = VoxelData::EMPTY;
        assert!(is_face_visible(&lib, dirt, air.explored(), BoxFace::Top, 5, 100));
        assert!(!is_face_visible(&lib, dirt, air, BoxFace::Top, 5, 100));
    }

    #[test]
    fn transparent_neighbors() {
        let lib = lib();
        let dirt = VoxelData::new(id(&lib, "dirt"));
        let glass = VoxelData::new(id(&lib, "glass"));
        let water = VoxelData::new(id(&lib, "water"));
        assert!(is_face_visible(&lib, dirt, glass, BoxFace::Left, 0, 100));
        assert!(!is_face_visible(&lib, glass, glass, BoxFace::Left, 0, 100));
        assert!(is_face_visible(&lib, glass, water, BoxFace::Left, 0, 100));
        assert!(!is_face_visible(&lib, glass, dirt, BoxFace::Left, 0, 100));
    }

    #[test]
    fn cutaway_shows_face() {
        let lib = lib();
        let dirt = VoxelData::new(id(&lib, "dirt"));
        assert!(!is_face_visible(&lib, dirt, dirt, BoxFace::Top, 10, 10));
        assert!(is_face_visible(&lib, dirt, dirt, BoxFace::Top, 11, 10));
    }

    #[test]
    fn ramped_neighbor_exposes_side_face() {
        let lib = lib();
        let dirt = VoxelData::new(id(&lib, "dirt"));
        let bedrock = VoxelData::new(lib.bedrock());
        // Neighbor sits at +X; its left-edge top corners face us.
        let mut n = dirt;
        n.ramp = RampType::TOP_FRONT_LEFT;
        assert!(is_face_visible(&lib, bedrock, n, BoxFace::Right, 0, 100));
        assert!(is_face_visible(&lib, dirt, n, BoxFace::Right, 0, 100));
        // Our matching corner is ramped too, so the seam is closed.
        let mut me = dirt;
        me.ramp = RampType::TOP_FRONT_RIGHT;
        assert!(!is_face_visible(&lib, me, n, BoxFace::Right, 0, 100));
        // A ramp on the far edge does not open this face.
        n.ramp = RampType::TOP_FRONT_RIGHT;
        assert!(!is_face_visible(&lib, bedrock, n, BoxFace::Right, 0, 100));
        // Ramps never open top or bottom faces.
        n.ramp = RampType::ALL;
        assert!(!is_face_visible(&lib, bedrock, n, BoxFace::Top, 0, 100));
    }

    #[test]
    fn ramp_needs_open_top_and_empty_side() {
        let lib = lib();
        let t = VoxelTables::new();
        let dirt = VoxelData::new(id(&lib, "dirt"));
        // Empty everywhere except below: all four corners ramp.
        let all = derive_ramp(&lib, &t, dirt, |_, dy, _| {
            Some(if dy < 0 { dirt } else { VoxelData::EMPTY })
        });
        assert_eq!(all, RampType::ALL);
        // Covered top: no ramp.
        let covered = derive_ramp(&lib, &t, dirt, |_, _, _| Some(dirt));
        assert_eq!(covered, RampType::NONE);
        // Only -X side empty: left corners ramp.
        let left = derive_ramp(&lib, &t, dirt, |dx, dy, _| {
            Some(if (dy == 0 && dx < 0) || dy > 0 { VoxelData::EMPTY } else { dirt })
        });
        assert_eq!(left, RampType::TOP_FRONT_LEFT.union(RampType::TOP_BACK_LEFT));
        // Non-rampable types never ramp.
        let bedrock = VoxelData::new(lib.bedrock());
        assert_eq!(
            derive_ramp(&lib, &t, bedrock, |_, _, _| Some(VoxelData::EMPTY)),
            RampType::NONE
        );
    }

    #[test]
    fn transition_weights() {
        let t = VoxelTables::new();
        let me = 3;
        let same = VoxelData::new(me);
        let other = VoxelData::new(4);
        // Only +X matches.
        let v = transition_value(&t, TransitionMode::SameType, me, |dx, _, _| {
            Some(if dx == 1 { same } else { other })
        });
        assert_eq!(v, 2);
        // AnySolid: every non-empty neighbor counts.
        let v = transition_value(&t, TransitionMode::AnySolid, me, |_, _, dz| {
            Some(if dz == -1 { VoxelData::EMPTY } else { other })
        });
        assert_eq!(v, 2 + 4 + 8);
        assert_eq!(
            transition_value(&t, TransitionMode::SameType, me, |_, _, _| None),
            15
        );
        assert_eq!(
            transition_value(&t, TransitionMode::None, me, |_, _, _| Some(same)),
            0
        );
    }

    #[test]
    fn visibility_requires_an_open_neighbor() {
        let lib = lib();
        let t = VoxelTables::new();
        let dirt = VoxelData::new(id(&lib, "dirt"));
        assert!(!compute_visible(&lib, &t, 5, 100, |_, _, _| Some(dirt)));
        assert!(compute_visible(&lib, &t, 5, 100, |_, dy, _| {
            Some(if dy == 1 { VoxelData::EMPTY.explored() } else { dirt })
        }));
        assert!(compute_visible(&lib, &t, 5, 100, |dx, _, _| {
            if dx == -1 { None } else { Some(dirt) }
        }));
        // Sliced away above the view level.
        assert!(compute_visible(&lib, &t, 5, 5, |_, _, _| Some(dirt)));
    }
}
