use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::CHUNK_SIZE;

/// `[world]` section: grid extents, seed, and terrain shaping.
#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: [usize; 3],
    #[serde(default = "default_chunks")]
    pub chunks: [usize; 3],
    #[serde(default = "default_seed")]
    pub seed: i32,
    /// Highest world Y drawn; `None` shows the full height.
    #[serde(default)]
    pub max_viewing_level: Option<i32>,
    #[serde(default)]
    pub terrain: TerrainConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunks: default_chunks(),
            seed: default_seed(),
            max_viewing_level: None,
            terrain: TerrainConfig::default(),
        }
    }
}

fn default_chunk_size() -> [usize; 3] {
    [CHUNK_SIZE, CHUNK_SIZE, CHUNK_SIZE]
}
fn default_chunks() -> [usize; 3] {
    [4, 4, 4]
}
fn default_seed() -> i32 {
    1337
}

#[derive(Clone, Debug, Deserialize)]
pub struct TerrainConfig {
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "default_min_y_ratio")]
    pub min_y_ratio: f32,
    #[serde(default = "default_max_y_ratio")]
    pub max_y_ratio: f32,
    #[serde(default = "default_topsoil")]
    pub topsoil_thickness: i32,
    #[serde(default = "default_floor")]
    pub bedrock_thickness: i32,
    #[serde(default = "default_surface")]
    pub surface: String,
    #[serde(default = "default_subsoil")]
    pub subsoil: String,
    #[serde(default = "default_floor_block")]
    pub floor: String,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            min_y_ratio: default_min_y_ratio(),
            max_y_ratio: default_max_y_ratio(),
            topsoil_thickness: default_topsoil(),
            bedrock_thickness: default_floor(),
            surface: default_surface(),
            subsoil: default_subsoil(),
            floor: default_floor_block(),
        }
    }
}

fn default_frequency() -> f32 {
    0.02
}
fn default_min_y_ratio() -> f32 {
    0.35
}
fn default_max_y_ratio() -> f32 {
    0.75
}
fn default_topsoil() -> i32 {
    3
}
fn default_floor() -> i32 {
    1
}
fn default_surface() -> String {
    "dirt".into()
}
fn default_subsoil() -> String {
    "stone".into()
}
fn default_floor_block() -> String {
    "bedrock".into()
}

pub fn load_world_config(path: &Path) -> Result<WorldConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: WorldConfig = toml::from_str(&s)?;
    Ok(cfg)
}
