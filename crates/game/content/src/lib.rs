//! Data-driven content for the basement game and loaders for it.
//!
//! This crate houses static game content and the loaders that turn data files
//! into `game-core` values:
//! - Scene payloads (tiles and items, JSON)
//! - Investigation catalog (objects, clues, quests, RON)
//! - Engine configuration (TOML)
//!
//! The basement scenario ships embedded in the crate (see [`builtin`]), so a
//! client can start without any data directory.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentBundle, ContentFactory, SceneLoader};
