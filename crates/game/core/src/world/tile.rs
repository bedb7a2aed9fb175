use crate::state::Position;

/// Canonical terrain classes for scene tiles.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TileKind {
    Floor,
    Wall,
    Door,
    Water,
    Stairs,
    Void,
}

impl TileKind {
    /// Floor, doors and stairs can be stood on; everything else blocks.
    pub fn is_walkable(self) -> bool {
        matches!(self, TileKind::Floor | TileKind::Door | TileKind::Stairs)
    }
}

/// Immutable tile placed in a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub position: Position,
    pub kind: TileKind,
}

impl Tile {
    pub const fn new(position: Position, kind: TileKind) -> Self {
        Self { position, kind }
    }

    pub fn is_walkable(&self) -> bool {
        self.kind.is_walkable()
    }
}
