use delve_voxels::{EMPTY_TYPE, RampType, VoxelTypeId};

/// One cell of a chunk grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VoxelData {
    pub type_id: VoxelTypeId,
    pub flags: u8,
    pub ramp: RampType,
    pub sun: u8,
}

impl VoxelData {
    pub const EXPLORED: u8 = 1 << 0;
    pub const VISIBLE: u8 = 1 << 1;

    pub const EMPTY: VoxelData = VoxelData {
        type_id: EMPTY_TYPE,
        flags: 0,
        ramp: RampType::NONE,
        sun: 0,
    };

    #[inline]
    pub const fn new(type_id: VoxelTypeId) -> Self {
        Self {
            type_id,
            flags: 0,
            ramp: RampType::NONE,
            sun: 0,
        }
    }

    #[inline]
    pub fn explored(mut self) -> Self {
        self.flags |= Self::EXPLORED;
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_id == EMPTY_TYPE
    }

    #[inline]
    pub fn is_explored(&self) -> bool {
        self.flags & Self::EXPLORED != 0
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.flags & Self::VISIBLE != 0
    }

    #[inline]
    pub fn set_explored(&mut self, on: bool) {
        self.set_flag(Self::EXPLORED, on);
    }

    #[inline]
    pub fn set_visible(&mut self, on: bool) {
        self.set_flag(Self::VISIBLE, on);
    }

    #[inline]
    fn set_flag(&mut self, bit: u8, on: bool) {
        if on {
            self.flags |= bit;
        } else {
            self.flags &= !bit;
        }
    }
}
