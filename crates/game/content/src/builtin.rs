//! Content compiled into the crate.
//!
//! Raw file contents only; parsing happens in [`crate::loaders`].

/// Name of the scene shipped with the crate.
pub const SCENE_NAME: &str = "basement";

pub const CONFIG_TOML: &str = include_str!("../data/config.toml");

pub const CATALOG_RON: &str = include_str!("../data/catalog.ron");

pub const BASEMENT_SCENE_JSON: &str = include_str!("../data/scenes/basement.json");

/// Looks up an embedded scene by name.
pub fn scene(name: &str) -> Option<&'static str> {
    match name {
        SCENE_NAME => Some(BASEMENT_SCENE_JSON),
        _ => None,
    }
}
