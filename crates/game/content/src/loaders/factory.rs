//! Content factory for loading scenarios from a data directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use game_core::{Catalog, GameConfig, SceneData};

use crate::loaders::{CatalogLoader, ConfigLoader, ContentBundle, LoadResult, SceneLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── catalog.ron
/// └── scenes/
///     └── basement.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or defaults when it is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the investigation catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<Arc<Catalog>> {
        let path = self.data_dir.join("catalog.ron");
        CatalogLoader::load(&path)
    }

    /// Load a scene from `scenes/{scene_name}.json`.
    pub fn load_scene(&self, scene_name: &str) -> LoadResult<SceneData> {
        let path = self
            .data_dir
            .join("scenes")
            .join(format!("{}.json", scene_name));
        SceneLoader::load(&path)
    }

    /// Load configuration, catalog and the named scene.
    pub fn load_bundle(&self, scene_name: &str) -> LoadResult<ContentBundle> {
        Ok(ContentBundle {
            config: self.load_config()?,
            scene: self.load_scene(scene_name)?,
            catalog: self.load_catalog()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
