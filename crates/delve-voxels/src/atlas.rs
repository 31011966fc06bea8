use delve_geom::{Rect, Vec2};

use crate::config::AtlasConfig;

/// Tile position in the atlas grid as `[column, row]`.
pub type TileRef = [u16; 2];

/// Uniform grid of square tiles packed into one texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureAtlas {
    pub columns: u16,
    pub rows: u16,
    pub tile_size: u32,
}

impl Default for TextureAtlas {
    fn default() -> Self {
        Self {
            columns: 16,
            rows: 16,
            tile_size: 32,
        }
    }
}

impl TextureAtlas {
    pub fn from_config(cfg: &AtlasConfig) -> Self {
        Self {
            columns: cfg.columns.max(1),
            rows: cfg.rows.max(1),
            tile_size: cfg.tile_size,
        }
    }

    #[inline]
    pub fn contains(&self, tile: TileRef) -> bool {
        tile[0] < self.columns && tile[1] < self.rows
    }

    /// Normalized UV rectangle of `tile`, or `None` when it falls off the grid.
    pub fn tile_rect(&self, tile: TileRef) -> Option<Rect> {
        if !self.contains(tile) {
            return None;
        }
        let cw = 1.0 / self.columns as f32;
        let ch = 1.0 / self.rows as f32;
        let min = Vec2::new(tile[0] as f32 * cw, tile[1] as f32 * ch);
        Some(Rect::new(min, Vec2::new(min.x + cw, min.y + ch)))
    }

    /// Tile holding transition frame `value` of a 4x4 block starting at `base`.
    #[inline]
    pub fn transition_tile(base: TileRef, value: usize) -> TileRef {
        let v = (value & 15) as u16;
        [base[0] + (v & 3), base[1] + (v >> 2)]
    }
}
