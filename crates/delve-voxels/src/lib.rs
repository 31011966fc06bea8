//! Voxel types, texture atlas, and the per-type face geometry library.
#![forbid(unsafe_code)]

pub mod atlas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod registry;
pub mod tables;
pub mod types;

pub use atlas::{TextureAtlas, TileRef};
pub use error::LibraryError;
pub use geometry::{BoxPrimitive, BoxTextureCoords, FaceRange, GeometryVertex};
pub use registry::{BEDROCK_NAME, VoxelLibrary};
pub use tables::VoxelTables;
pub use types::{
    BoxFace, EMPTY_TYPE, RampType, TransitionMode, VoxelType, VoxelTypeId, VoxelVertex, should_ramp,
};
