use thiserror::Error;

/// Errors raised while building a [`crate::VoxelLibrary`] from configuration.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("failed to read voxel config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid voxel config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("voxel type {voxel:?}: tile ({col}, {row}) is outside the {columns}x{rows} atlas")]
    TileOutOfRange {
        voxel: String,
        col: u16,
        row: u16,
        columns: u16,
        rows: u16,
    },

    #[error("voxel type {0:?} has no texture; set `all` or each of `top`, `bottom`, `side`")]
    MissingTexture(String),

    #[error("voxel config does not define a `bedrock` type")]
    MissingBedrock,

    #[error("voxel config defines {0} types; at most 255 are supported")]
    TooManyTypes(usize),

    #[error("voxel type {0:?} is defined more than once")]
    DuplicateType(String),
}
