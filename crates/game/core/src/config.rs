use crate::iso::IsoProjection;

/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Width of a tile's diamond in screen pixels.
    pub tile_width: u32,
    /// Height of a tile's diamond in screen pixels.
    pub tile_height: u32,
    /// Radius (in tiles) revealed around the player after every move.
    pub visibility_radius: u32,
}

impl GameConfig {
    // ===== engine constants =====
    /// Number of completed quests required before the player may escape.
    pub const ESCAPE_QUEST_THRESHOLD: usize = 2;
    /// Upper bound applied to any visibility radius.
    pub const MAX_VISIBILITY_RADIUS: u32 = 256;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TILE_WIDTH: u32 = 64;
    pub const DEFAULT_TILE_HEIGHT: u32 = 32;
    pub const DEFAULT_VISIBILITY_RADIUS: u32 = 3;

    pub fn new() -> Self {
        Self {
            tile_width: Self::DEFAULT_TILE_WIDTH,
            tile_height: Self::DEFAULT_TILE_HEIGHT,
            visibility_radius: Self::DEFAULT_VISIBILITY_RADIUS,
        }
    }

    pub fn with_visibility_radius(mut self, visibility_radius: u32) -> Self {
        self.visibility_radius = visibility_radius;
        self
    }

    pub fn with_tile_size(mut self, tile_width: u32, tile_height: u32) -> Self {
        self.tile_width = tile_width;
        self.tile_height = tile_height;
        self
    }

    /// Projection matching the configured tile dimensions.
    pub fn projection(&self) -> IsoProjection {
        IsoProjection::new(self.tile_width, self.tile_height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
