//! Scene payload loader.
//!
//! Scenes use the world-data JSON shape:
//! `{ "tiles": [{ "x", "y", "type" }], "items": [{ "id", "name", ... }] }`.

use std::path::Path;

use game_core::{SceneData, WorldModel};

use crate::loaders::{LoadResult, read_file};

/// Loader for scene payloads from JSON files.
pub struct SceneLoader;

impl SceneLoader {
    pub fn load(path: &Path) -> LoadResult<SceneData> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<SceneData> {
        let scene: SceneData = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scene JSON: {}", e))?;

        tracing::debug!(
            "Parsed scene payload: {} tiles, {} items",
            scene.tiles.len(),
            scene.items.len()
        );
        Ok(scene)
    }

    /// Parses and validates a scene into a world model.
    pub fn build(content: &str) -> LoadResult<WorldModel> {
        let scene = Self::parse(content)?;
        WorldModel::from_scene(&scene).map_err(|e| anyhow::anyhow!("Invalid scene: {}", e))
    }
}
