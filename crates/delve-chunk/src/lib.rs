//! Voxel storage, the chunk manager, and the per-voxel rules the mesher reads.
#![forbid(unsafe_code)]

mod chunk;
mod chunk_data;
pub mod generate;
mod grid;
pub mod rules;
mod slot;
pub mod sunlight;
mod voxel;

pub use chunk::VoxelChunk;
pub use chunk_data::ChunkData;
pub use generate::{generate_chunk, generate_world};
pub use grid::{VoxelGrid, VoxelHandle};
pub use rules::is_face_visible;
pub use slot::PublishSlot;
pub use sunlight::compute_sunlight;
pub use voxel::VoxelData;
