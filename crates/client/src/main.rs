//! Basement game terminal client.
//!
//! ```bash
//! cargo run -p basement-client
//! BASEMENT_DATA_DIR=crates/game/content/data BASEMENT_SPAWN=2,2 cargo run -p basement-client
//! ```

use std::io;

use anyhow::Result;
use basement_client::{ClientConfig, build_app, logging};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config.log_dir)?;

    tracing::info!("Starting basement client");
    tracing::info!("Scene: {}, spawn: {}", config.scene, config.spawn);

    let mut app = build_app(&config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    app.run(stdin.lock(), &mut stdout)?;

    Ok(())
}
