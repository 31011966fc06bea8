use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::config::{TerrainConfig, WorldConfig};
use crate::ChunkCoord;

/// Fixed-size grid of chunks plus the seed that shapes its terrain.
#[derive(Clone, Debug)]
pub struct World {
    pub chunk_size_x: usize,
    pub chunk_size_y: usize,
    pub chunk_size_z: usize,
    pub chunks_x: usize,
    pub chunks_y: usize,
    pub chunks_z: usize,
    pub seed: i32,
    pub terrain: TerrainConfig,
}

impl World {
    pub fn new(chunk_size: [usize; 3], chunks: [usize; 3], seed: i32) -> Self {
        Self {
            chunk_size_x: chunk_size[0].max(1),
            chunk_size_y: chunk_size[1].max(1),
            chunk_size_z: chunk_size[2].max(1),
            chunks_x: chunks[0],
            chunks_y: chunks[1],
            chunks_z: chunks[2],
            seed,
            terrain: TerrainConfig::default(),
        }
    }

    pub fn from_config(cfg: &WorldConfig) -> Self {
        let mut w = Self::new(cfg.chunk_size, cfg.chunks, cfg.seed);
        w.terrain = cfg.terrain.clone();
        w
    }

    #[inline]
    pub fn world_size_x(&self) -> usize {
        self.chunk_size_x * self.chunks_x
    }

    #[inline]
    pub fn world_size_y(&self) -> usize {
        self.chunk_size_y * self.chunks_y
    }

    #[inline]
    pub fn world_size_z(&self) -> usize {
        self.chunk_size_z * self.chunks_z
    }

    #[inline]
    pub fn chunk_size(&self) -> (usize, usize, usize) {
        (self.chunk_size_x, self.chunk_size_y, self.chunk_size_z)
    }

    /// World-space cell of a chunk's `(0,0,0)` voxel.
    #[inline]
    pub fn chunk_origin(&self, coord: ChunkCoord) -> (i32, i32, i32) {
        (
            coord.cx * self.chunk_size_x as i32,
            coord.cy * self.chunk_size_y as i32,
            coord.cz * self.chunk_size_z as i32,
        )
    }

    #[inline]
    pub fn chunk_containing(&self, wx: i32, wy: i32, wz: i32) -> ChunkCoord {
        ChunkCoord::containing(
            wx,
            wy,
            wz,
            self.chunk_size_x,
            self.chunk_size_y,
            self.chunk_size_z,
        )
    }

    #[inline]
    pub fn contains_chunk(&self, coord: ChunkCoord) -> bool {
        coord.cx >= 0
            && coord.cy >= 0
            && coord.cz >= 0
            && (coord.cx as usize) < self.chunks_x
            && (coord.cy as usize) < self.chunks_y
            && (coord.cz as usize) < self.chunks_z
    }

    /// Every chunk coordinate in the world, Y-major.
    pub fn chunk_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        (0..self.chunks_y as i32).flat_map(move |cy| {
            (0..self.chunks_z as i32).flat_map(move |cz| {
                (0..self.chunks_x as i32).map(move |cx| ChunkCoord::new(cx, cy, cz))
            })
        })
    }

    pub fn make_sampler(&self) -> TerrainSampler {
        let mut noise = FastNoiseLite::with_seed(self.seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(self.terrain.frequency));
        TerrainSampler {
            noise,
            world_height: self.world_size_y() as i32,
            min_y_ratio: self.terrain.min_y_ratio,
            max_y_ratio: self.terrain.max_y_ratio,
        }
    }
}

/// Seeded 2D heightmap over world columns.
pub struct TerrainSampler {
    noise: FastNoiseLite,
    world_height: i32,
    min_y_ratio: f32,
    max_y_ratio: f32,
}

impl TerrainSampler {
    /// World Y of the topmost solid cell in column `(wx, wz)`.
    pub fn height_at(&self, wx: i32, wz: i32) -> i32 {
        let n = self.noise.get_noise_2d(wx as f32, wz as f32);
        let hf = self.world_height as f32;
        let min_h = (hf * self.min_y_ratio) as i32;
        let max_h = (hf * self.max_y_ratio) as i32;
        let span = (max_h - min_h).max(0) as f32;
        let h = ((n + 1.0) * 0.5 * span) as i32 + min_h;
        h.clamp(0, (self.world_height - 1).max(0))
    }
}
