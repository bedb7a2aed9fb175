//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("visibility_radius = 5\n").unwrap();
        assert_eq!(config.visibility_radius, 5);
        assert_eq!(config.tile_width, GameConfig::DEFAULT_TILE_WIDTH);
        assert_eq!(config.tile_height, GameConfig::DEFAULT_TILE_HEIGHT);
    }

    #[test]
    fn builtin_config_parses() {
        let config = ConfigLoader::parse(crate::builtin::CONFIG_TOML).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(ConfigLoader::parse("tile_width = \"wide\"").is_err());
    }
}
