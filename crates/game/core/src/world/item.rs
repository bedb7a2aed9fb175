//! Items lying in the scene.

use std::fmt;

use crate::state::Position;

/// Identifier of a scene item, as issued by the world-data collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An item placed on a grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub position: Position,
    pub pickable: bool,
    pub important: bool,
    /// Asset key for the renderer; opaque to the engine.
    pub icon: Option<String>,
}

impl WorldItem {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        description: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            position,
            pickable: false,
            important: false,
            icon: None,
        }
    }

    pub fn pickable(mut self, pickable: bool) -> Self {
        self.pickable = pickable;
        self
    }

    pub fn important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}
