//! Pure exploration and investigation rules for the isometric basement game.
//!
//! `game-core` owns the isometric projection, the tile/item world model, the
//! fog-of-war tracker and the clue/quest state machine. It performs no I/O;
//! content arrives as already-parsed [`world::SceneData`] and
//! [`investigation::CatalogSpec`] values. Applications hold one
//! [`session::GameSession`] per player and drive everything through it.
pub mod config;
pub mod error;
pub mod investigation;
pub mod iso;
pub mod session;
pub mod state;
pub mod visibility;
pub mod world;

pub use config::GameConfig;
pub use error::{ErrorSeverity, GameError};
pub use investigation::{
    Catalog, CatalogError, CatalogSpec, ClueId, DescriptionTier, EscapeRoute, EscapeStatus,
    InvestigationEngine, InvestigationError, InvestigationOutcome, ObjectId, PlayerKnowledge,
    QuestCompletion, QuestId, RouteDifficulty,
};
pub use iso::{IsoProjection, ScreenPoint, paint_order};
pub use session::{GameSession, InteractOutcome, ItemAction, SessionError};
pub use state::{InvestigationState, Position, QuestStatus, SessionSnapshot, SnapshotError};
pub use visibility::{TileVisibility, VisibilityTracker};
pub use world::{
    Drawable, DrawableKind, ItemId, SceneData, SceneError, Tile, TileKind, WorldItem, WorldModel,
};
