use serde::Deserialize;

use crate::atlas::TileRef;
use crate::types::TransitionMode;

#[derive(Clone, Debug, Deserialize)]
pub struct VoxelsConfig {
    #[serde(default)]
    pub atlas: AtlasConfig,
    #[serde(default)]
    pub voxels: Vec<VoxelDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AtlasConfig {
    #[serde(default = "default_grid")]
    pub columns: u16,
    #[serde(default = "default_grid")]
    pub rows: u16,
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            columns: default_grid(),
            rows: default_grid(),
            tile_size: default_tile_size(),
        }
    }
}

fn default_grid() -> u16 {
    16
}

fn default_tile_size() -> u32 {
    32
}

fn default_tint() -> [u8; 4] {
    [255, 255, 255, 255]
}

fn default_true() -> bool {
    true
}

fn default_ramp_size() -> f32 {
    0.5
}

/// One `[[voxels]]` entry. `all` fills any of `top`, `bottom`, `side` left unset.
#[derive(Clone, Debug, Deserialize)]
pub struct VoxelDef {
    pub name: String,
    #[serde(default)]
    pub all: Option<TileRef>,
    #[serde(default)]
    pub top: Option<TileRef>,
    #[serde(default)]
    pub bottom: Option<TileRef>,
    #[serde(default)]
    pub side: Option<TileRef>,
    #[serde(default = "default_tint")]
    pub tint: [u8; 4],
    #[serde(default)]
    pub transparent: bool,
    #[serde(default)]
    pub emits_light: bool,
    #[serde(default)]
    pub can_ramp: bool,
    #[serde(default = "default_ramp_size")]
    pub ramp_size: f32,
    #[serde(default)]
    pub transitions: TransitionMode,
    /// First tile of a 4x4 block of top textures, one per transition value.
    #[serde(default)]
    pub transition_tiles: Option<TileRef>,
    /// Types with `render = false` exist in the grid but emit no geometry.
    #[serde(default = "default_true")]
    pub render: bool,
}

impl VoxelDef {
    pub fn top_tile(&self) -> Option<TileRef> {
        self.top.or(self.all)
    }

    pub fn bottom_tile(&self) -> Option<TileRef> {
        self.bottom.or(self.all)
    }

    pub fn side_tile(&self) -> Option<TileRef> {
        self.side.or(self.all)
    }
}
