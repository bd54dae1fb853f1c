//! Engine configuration loader.

use std::path::Path;

use gambit_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::from_str(&content)
    }

    /// Parse config data from TOML text. Missing keys fall back to defaults.
    pub fn from_str(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_parses() {
        let config = ConfigLoader::from_str(
            "starting_energy = 60\nenergy_regen_per_turn = 10\n",
        )
        .unwrap();
        assert_eq!(config.starting_energy, 60);
        assert_eq!(config.energy_regen_per_turn, 10);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config = ConfigLoader::from_str("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(ConfigLoader::from_str("starting_energy = \"lots\"").is_err());
    }
}
