use delve_geom::Vec3;
use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Repeating 3D table of small vertex displacements.
///
/// Keyed by the rounded world position modulo the period, so every face
/// sharing a corner moves it identically and chunk seams stay closed.
#[derive(Clone, Debug)]
pub struct VertexNoise {
    period: usize,
    table: Vec<Vec3>,
}

impl VertexNoise {
    pub fn new(seed: i32, period: usize, amplitude: f32) -> Self {
        let period = period.max(1);
        let channel = |salt: i32| {
            let mut n = FastNoiseLite::with_seed(seed ^ salt);
            n.set_noise_type(Some(NoiseType::OpenSimplex2));
            n.set_frequency(Some(0.37));
            n
        };
        let nx = channel(0x1F2E_3D4C);
        let ny = channel(0x0A0B_0C0D);
        let nz = channel(0x7788_99AA);
        let mut table = Vec::with_capacity(period * period * period);
        for y in 0..period {
            for z in 0..period {
                for x in 0..period {
                    let (fx, fy, fz) = (x as f32, y as f32, z as f32);
                    let sample = |n: &FastNoiseLite| n.get_noise_3d(fx, fy, fz).clamp(-1.0, 1.0);
                    table.push(Vec3::new(sample(&nx), sample(&ny), sample(&nz)) * amplitude);
                }
            }
        }
        Self { period, table }
    }

    /// All-zero table.
    pub fn flat() -> Self {
        Self {
            period: 1,
            table: vec![Vec3::ZERO],
        }
    }

    #[inline]
    pub fn period(&self) -> usize {
        self.period
    }

    #[inline]
    pub fn offset(&self, position: Vec3) -> Vec3 {
        let p = self.period as i32;
        let x = (position.x.round() as i32).rem_euclid(p) as usize;
        let y = (position.y.round() as i32).rem_euclid(p) as usize;
        let z = (position.z.round() as i32).rem_euclid(p) as usize;
        self.table[(y * self.period + z) * self.period + x]
    }
}
