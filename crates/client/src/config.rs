//! Client configuration from environment variables.
use std::env;
use std::path::PathBuf;

use game_core::Position;

use crate::dirs;

/// Where content comes from and where saves go.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Content directory; `None` uses the content built into the binary.
    pub data_dir: Option<PathBuf>,
    pub scene: String,
    pub save_dir: PathBuf,
    pub spawn: Position,
    pub log_dir: PathBuf,
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BASEMENT_DATA_DIR` - content directory (default: built-in content)
    /// - `BASEMENT_SCENE` - scene name (default: `basement`)
    /// - `BASEMENT_SAVE_DIR` - snapshot directory (default: platform data dir)
    /// - `BASEMENT_SPAWN` - spawn cell as `x,y` (default: `0,0`)
    /// - `BASEMENT_LOG_DIR` - log directory (default: platform cache dir)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("BASEMENT_DATA_DIR") {
            config.data_dir = Some(dir);
        }
        if let Some(scene) = read_env::<String>("BASEMENT_SCENE") {
            config.scene = scene;
        }
        if let Some(dir) = read_env::<PathBuf>("BASEMENT_SAVE_DIR") {
            config.save_dir = dir;
        }
        if let Some(spawn) = env::var("BASEMENT_SPAWN")
            .ok()
            .and_then(|value| parse_position(&value))
        {
            config.spawn = spawn;
        }
        if let Some(dir) = read_env::<PathBuf>("BASEMENT_LOG_DIR") {
            config.log_dir = dir;
        }

        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            scene: game_content::builtin::SCENE_NAME.to_string(),
            save_dir: dirs::save_directory(),
            spawn: Position::ORIGIN,
            log_dir: dirs::log_directory(),
        }
    }
}

/// Parses `x,y` (whitespace around either number is ignored).
pub fn parse_position(value: &str) -> Option<Position> {
    let (x, y) = value.split_once(',')?;
    Some(Position::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_parse_with_spaces_and_negatives() {
        assert_eq!(parse_position("0,0"), Some(Position::ORIGIN));
        assert_eq!(parse_position(" -1 , 4"), Some(Position::new(-1, 4)));
        assert_eq!(parse_position("3"), None);
        assert_eq!(parse_position("a,b"), None);
    }

    #[test]
    fn defaults_use_builtin_scene() {
        let config = ClientConfig::default();
        assert!(config.data_dir.is_none());
        assert_eq!(config.scene, "basement");
        assert_eq!(config.spawn, Position::ORIGIN);
    }
}
