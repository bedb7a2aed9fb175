//! Tile and item layout of the current scene.
//!
//! The model is populated once from a [`SceneData`] payload and is read-only
//! afterwards, apart from removing items the player picks up.

mod item;
mod model;
mod scene;
mod tile;

pub use item::{ItemId, WorldItem};
pub(crate) use model::RemovedItem;
pub use model::{Drawable, DrawableKind, WorldModel};
pub use scene::{ItemSpec, SceneData, SceneError, TileSpec};
pub use tile::{Tile, TileKind};
