//! Scene payload delivered by the world-data collaborator.
//!
//! Field names follow the wire format (`type`, `position_x`, `is_pickable`, ...)
//! so the payload can be deserialized as-is. Tile kinds stay strings here and
//! are validated when the payload is turned into a [`super::WorldModel`].

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

use super::{ItemId, WorldItem};

/// Raw scene description: tiles and items, consumed once per session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneData {
    #[cfg_attr(feature = "serde", serde(default))]
    pub tiles: Vec<TileSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<ItemSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileSpec {
    pub x: i32,
    pub y: i32,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
}

impl TileSpec {
    pub fn new(x: i32, y: i32, kind: impl Into<String>) -> Self {
        Self {
            x,
            y,
            kind: kind.into(),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSpec {
    pub id: u32,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub position_x: i32,
    pub position_y: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_pickable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_important: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: Option<String>,
}

impl From<&ItemSpec> for WorldItem {
    fn from(spec: &ItemSpec) -> Self {
        WorldItem {
            id: ItemId(spec.id),
            name: spec.name.clone(),
            description: spec.description.clone(),
            position: Position::new(spec.position_x, spec.position_y),
            pickable: spec.is_pickable,
            important: spec.is_important,
            icon: spec.icon.clone(),
        }
    }
}

/// Errors raised while building a world model from a scene payload.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("unknown tile type '{kind}' at {position}")]
    UnknownTileKind { position: Position, kind: String },

    #[error("more than one tile at {0}")]
    DuplicateTile(Position),

    #[error("item {0} appears more than once")]
    DuplicateItem(ItemId),

    #[error("item {item} placed at {position}, already holding item {existing}")]
    CellOccupied {
        item: ItemId,
        existing: ItemId,
        position: Position,
    },
}

impl GameError for SceneError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use SceneError::*;
        match self {
            UnknownTileKind { .. } => "SCENE_UNKNOWN_TILE_KIND",
            DuplicateTile(_) => "SCENE_DUPLICATE_TILE",
            DuplicateItem(_) => "SCENE_DUPLICATE_ITEM",
            CellOccupied { .. } => "SCENE_CELL_OCCUPIED",
        }
    }
}
