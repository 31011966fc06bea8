//! CPU voxel-list mesher: culled, lit, ramp-aware chunk surfaces.
#![forbid(unsafe_code)]

mod buffer;
mod config;
mod context;
mod guard;
mod lightmap;
mod noise;
mod primitive;

pub use buffer::GrowBuffer;
pub use config::MeshConfig;
pub use context::MeshContext;
pub use guard::{RebuildGuard, RebuildState, RebuildTicket};
pub use lightmap::generate_lightmap;
pub use noise::VertexNoise;
pub use primitive::{RebuildOutcome, VoxelListPrimitive};
