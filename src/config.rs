use std::error::Error;
use std::fs;
use std::path::Path;

use delve_mesh_cpu::MeshConfig;
use delve_runtime::RuntimeConfig;
use delve_world::WorldConfig;
use serde::Deserialize;

/// `assets/delve.toml`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub mesh: MeshConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

pub fn load_app_config(path: &Path) -> Result<AppConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&s)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_default_independently() {
        let cfg: AppConfig = toml::from_str("[runtime]\nworkers = 2\n").unwrap();
        assert_eq!(cfg.runtime.workers, 2);
        assert_eq!(cfg.mesh, MeshConfig::default());
        assert_eq!(cfg.world.chunks, WorldConfig::default().chunks);
    }

    #[test]
    fn shipped_config_parses() {
        let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let cfg = load_app_config(&root.join("assets/delve.toml")).unwrap();
        assert_eq!(cfg.world.chunk_size, [16, 16, 16]);
        assert_eq!(cfg.world.terrain.surface, "dirt");
        assert_eq!(cfg.mesh.noise_seed, 0x5EED);
        assert_eq!(cfg.runtime.workers, 0);
    }
}
