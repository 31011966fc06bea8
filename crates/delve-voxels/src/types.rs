use serde::Deserialize;

use crate::geometry::BoxTextureCoords;

/// Registry index of a voxel type. `0` is always the empty type.
pub type VoxelTypeId = u8;

pub const EMPTY_TYPE: VoxelTypeId = 0;

/// The six axis-aligned faces of a voxel box.
///
/// Left/Right run along X, Back/Front along Z (front is +Z).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BoxFace {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
    Front = 4,
    Back = 5,
}

impl BoxFace {
    pub const ALL: [BoxFace; 6] = [
        BoxFace::Top,
        BoxFace::Bottom,
        BoxFace::Left,
        BoxFace::Right,
        BoxFace::Front,
        BoxFace::Back,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            BoxFace::Top => (0, 1, 0),
            BoxFace::Bottom => (0, -1, 0),
            BoxFace::Left => (-1, 0, 0),
            BoxFace::Right => (1, 0, 0),
            BoxFace::Front => (0, 0, 1),
            BoxFace::Back => (0, 0, -1),
        }
    }

    #[inline]
    pub fn is_side(self) -> bool {
        !matches!(self, BoxFace::Top | BoxFace::Bottom)
    }

    #[inline]
    pub fn opposite(self) -> BoxFace {
        match self {
            BoxFace::Top => BoxFace::Bottom,
            BoxFace::Bottom => BoxFace::Top,
            BoxFace::Left => BoxFace::Right,
            BoxFace::Right => BoxFace::Left,
            BoxFace::Front => BoxFace::Back,
            BoxFace::Back => BoxFace::Front,
        }
    }
}

/// The eight corners of a voxel box.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VoxelVertex {
    BackBottomLeft = 0,
    BackTopLeft = 1,
    FrontBottomLeft = 2,
    FrontTopLeft = 3,
    BackBottomRight = 4,
    BackTopRight = 5,
    FrontBottomRight = 6,
    FrontTopRight = 7,
}

impl VoxelVertex {
    pub const ALL: [VoxelVertex; 8] = [
        VoxelVertex::BackBottomLeft,
        VoxelVertex::BackTopLeft,
        VoxelVertex::FrontBottomLeft,
        VoxelVertex::FrontTopLeft,
        VoxelVertex::BackBottomRight,
        VoxelVertex::BackTopRight,
        VoxelVertex::FrontBottomRight,
        VoxelVertex::FrontTopRight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Corner offset inside the unit box; each component is 0 or 1.
    #[inline]
    pub fn offset(self) -> (i32, i32, i32) {
        let i = self as i32;
        ((i >> 2) & 1, i & 1, (i >> 1) & 1)
    }

    #[inline]
    pub fn from_offset(x: i32, y: i32, z: i32) -> VoxelVertex {
        let i = (((x & 1) << 2) | ((z & 1) << 1) | (y & 1)) as usize;
        VoxelVertex::ALL[i]
    }

    #[inline]
    pub fn is_top(self) -> bool {
        self.offset().1 == 1
    }

    #[inline]
    pub fn on_face(self, face: BoxFace) -> bool {
        let (x, y, z) = self.offset();
        match face {
            BoxFace::Top => y == 1,
            BoxFace::Bottom => y == 0,
            BoxFace::Left => x == 0,
            BoxFace::Right => x == 1,
            BoxFace::Front => z == 1,
            BoxFace::Back => z == 0,
        }
    }

    /// The corner a neighbor across `face` shares with this one.
    #[inline]
    pub fn mirrored_across(self, face: BoxFace) -> VoxelVertex {
        let (x, y, z) = self.offset();
        match face {
            BoxFace::Left | BoxFace::Right => VoxelVertex::from_offset(1 - x, y, z),
            BoxFace::Top | BoxFace::Bottom => VoxelVertex::from_offset(x, 1 - y, z),
            BoxFace::Front | BoxFace::Back => VoxelVertex::from_offset(x, y, 1 - z),
        }
    }
}

/// Which top corners of a voxel are lowered into a slope.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct RampType(pub u8);

impl RampType {
    pub const NONE: RampType = RampType(0);
    pub const TOP_FRONT_LEFT: RampType = RampType(1);
    pub const TOP_FRONT_RIGHT: RampType = RampType(2);
    pub const TOP_BACK_LEFT: RampType = RampType(4);
    pub const TOP_BACK_RIGHT: RampType = RampType(8);
    pub const ALL: RampType = RampType(15);

    /// Ramp bit owned by a top corner; bottom corners own none.
    #[inline]
    pub fn for_corner(v: VoxelVertex) -> RampType {
        match v {
            VoxelVertex::FrontTopLeft => RampType::TOP_FRONT_LEFT,
            VoxelVertex::FrontTopRight => RampType::TOP_FRONT_RIGHT,
            VoxelVertex::BackTopLeft => RampType::TOP_BACK_LEFT,
            VoxelVertex::BackTopRight => RampType::TOP_BACK_RIGHT,
            _ => RampType::NONE,
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn contains(self, other: RampType) -> bool {
        other.0 != 0 && (self.0 & other.0) == other.0
    }

    #[inline]
    pub fn union(self, other: RampType) -> RampType {
        RampType(self.0 | other.0)
    }
}

/// True if `corner` is lowered under `ramp`.
#[inline]
pub fn should_ramp(corner: VoxelVertex, ramp: RampType) -> bool {
    ramp.contains(RampType::for_corner(corner))
}

/// How a type picks its context-sensitive edge texture.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    #[default]
    None,
    /// Neighbors of the same type count as connected.
    SameType,
    /// Any non-empty neighbor counts as connected.
    AnySolid,
}

#[derive(Clone, Debug)]
pub struct VoxelType {
    pub id: VoxelTypeId,
    pub name: String,
    pub tint: [u8; 4],
    pub transparent: bool,
    pub emits_light: bool,
    pub can_ramp: bool,
    pub ramp_size: f32,
    pub transitions: TransitionMode,
    /// Indexed by transition value `[0..16)`; empty when `transitions` is `None`.
    pub transition_textures: Vec<BoxTextureCoords>,
}

impl VoxelType {
    #[inline]
    pub fn is_empty_type(&self) -> bool {
        self.id == EMPTY_TYPE
    }

    #[inline]
    pub fn has_transition_textures(&self) -> bool {
        self.transitions != TransitionMode::None && !self.transition_textures.is_empty()
    }

    #[inline]
    pub fn transition_texture(&self, value: usize) -> Option<&BoxTextureCoords> {
        self.transition_textures.get(value)
    }
}
