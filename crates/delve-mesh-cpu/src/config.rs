use serde::Deserialize;

/// `[mesh]` section.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MeshConfig {
    #[serde(default = "default_initial_vertices")]
    pub initial_vertices: usize,
    #[serde(default = "default_initial_indices")]
    pub initial_indices: usize,
    /// Maximum vertex displacement per axis; `0` disables noise.
    #[serde(default = "default_noise_amplitude")]
    pub noise_amplitude: f32,
    #[serde(default = "default_noise_period")]
    pub noise_period: usize,
    #[serde(default = "default_noise_seed")]
    pub noise_seed: i32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            initial_vertices: default_initial_vertices(),
            initial_indices: default_initial_indices(),
            noise_amplitude: default_noise_amplitude(),
            noise_period: default_noise_period(),
            noise_seed: default_noise_seed(),
        }
    }
}

fn default_initial_vertices() -> usize {
    1024
}
fn default_initial_indices() -> usize {
    512
}
fn default_noise_amplitude() -> f32 {
    0.1
}
fn default_noise_period() -> usize {
    16
}
fn default_noise_seed() -> i32 {
    0x5EED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_defaults() {
        let cfg: MeshConfig = toml::from_str("noise_amplitude = 0.0\ninitial_indices = 96").unwrap();
        assert_eq!(cfg.noise_amplitude, 0.0);
        assert_eq!(cfg.initial_indices, 96);
        assert_eq!(cfg.initial_vertices, MeshConfig::default().initial_vertices);
        assert_eq!(cfg.noise_period, 16);
    }
}
