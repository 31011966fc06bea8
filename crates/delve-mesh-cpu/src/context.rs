use std::sync::Arc;

use delve_voxels::{VoxelLibrary, VoxelTables};

use crate::config::MeshConfig;
use crate::noise::VertexNoise;

/// Read-only state shared by every chunk's mesher.
#[derive(Clone, Debug)]
pub struct MeshContext {
    pub library: Arc<VoxelLibrary>,
    pub tables: VoxelTables,
    pub noise: VertexNoise,
    pub config: MeshConfig,
}

impl MeshContext {
    pub fn new(library: Arc<VoxelLibrary>, config: MeshConfig) -> Self {
        let noise = if config.noise_amplitude == 0.0 {
            VertexNoise::flat()
        } else {
            VertexNoise::new(config.noise_seed, config.noise_period, config.noise_amplitude)
        };
        Self {
            library,
            tables: VoxelTables::new(),
            noise,
            config,
        }
    }
}
