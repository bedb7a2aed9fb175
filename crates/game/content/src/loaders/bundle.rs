//! Everything needed to start a session, loaded together.

use std::sync::Arc;

use game_core::{Catalog, GameConfig, GameSession, Position, SceneData, WorldModel};

use crate::builtin;
use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, SceneLoader};

/// Configuration, scene payload and catalog for one scenario.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    pub config: GameConfig,
    pub scene: SceneData,
    pub catalog: Arc<Catalog>,
}

impl ContentBundle {
    /// The basement scenario embedded in the crate.
    pub fn builtin() -> LoadResult<Self> {
        Self::builtin_scene(builtin::SCENE_NAME)
    }

    pub fn builtin_scene(name: &str) -> LoadResult<Self> {
        let scene = builtin::scene(name)
            .ok_or_else(|| anyhow::anyhow!("No built-in scene named '{}'", name))?;

        Ok(Self {
            config: ConfigLoader::parse(builtin::CONFIG_TOML)?,
            scene: SceneLoader::parse(scene)?,
            catalog: CatalogLoader::builtin()?,
        })
    }

    pub fn world(&self) -> LoadResult<WorldModel> {
        WorldModel::from_scene(&self.scene).map_err(|e| anyhow::anyhow!("Invalid scene: {}", e))
    }

    /// Builds a fresh world and starts a session with the player on `spawn`.
    pub fn start_session(&self, spawn: Position) -> LoadResult<GameSession> {
        let session = GameSession::new(
            self.world()?,
            Arc::clone(&self.catalog),
            self.config.clone(),
            spawn,
        )
        .map_err(|e| anyhow::anyhow!("Failed to start session: {}", e))?;

        tracing::debug!("Session ready at {}", spawn);
        Ok(session)
    }
}
