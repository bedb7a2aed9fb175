//! Terminal driver for the basement game.
//!
//! Loads content (built-in or from a data directory), starts one
//! [`game_core::GameSession`] and runs a line-oriented command loop over it,
//! persisting snapshots to disk on request.
pub mod app;
pub mod command;
pub mod config;
pub mod dirs;
pub mod logging;
pub mod store;

pub use app::{App, Flow};
pub use command::Command;
pub use config::ClientConfig;
pub use store::{SnapshotStore, StoreError};

use anyhow::Result;
use game_content::{ContentBundle, ContentFactory};

/// Loads the configured content and starts a session at the configured spawn.
pub fn build_app(config: &ClientConfig) -> Result<App> {
    let bundle = match &config.data_dir {
        Some(dir) => {
            tracing::info!("Loading content from {}", dir.display());
            ContentFactory::new(dir).load_bundle(&config.scene)?
        }
        None => {
            tracing::info!("Using built-in content");
            ContentBundle::builtin_scene(&config.scene)?
        }
    };

    let session = bundle.start_session(config.spawn)?;
    let store = SnapshotStore::new(&config.save_dir)?;
    tracing::info!("Saves directory: {}", store.base_dir().display());

    Ok(App::new(session, store))
}
