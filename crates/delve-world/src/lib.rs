//! World sizing, chunk addressing, and terrain sampling.
#![forbid(unsafe_code)]

mod chunk_coord;
pub mod config;
mod world;

pub use chunk_coord::ChunkCoord;
pub use config::{TerrainConfig, WorldConfig, load_world_config};
pub use world::{TerrainSampler, World};

/// Default edge length of a chunk along each axis.
pub const CHUNK_SIZE: usize = 16;
