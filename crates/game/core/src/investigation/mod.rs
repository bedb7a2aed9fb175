//! Clue-driven investigation.
//!
//! Objects yield clues on repeated investigation, quests unlock once their
//! required clues are all discovered, and escape opens after enough quests
//! are completed. Content lives in an immutable [`Catalog`]; per-player
//! progress lives in [`crate::state::InvestigationState`].

mod catalog;
mod engine;
mod error;

pub use catalog::{
    Catalog, CatalogError, CatalogSpec, ClueDef, ClueId, ClueSpec, DescriptionTier,
    DescriptionTiers, EscapeRoute, ObjectDef, ObjectId, ObjectSpec, QuestDef, QuestId, QuestSpec,
    RouteDifficulty,
};
pub use engine::{
    ClueDetails, EscapeStatus, InvestigationEngine, InvestigationOutcome, PlayerKnowledge,
    QuestCompletion,
};
pub use error::InvestigationError;

#[cfg(test)]
pub(crate) use catalog::fixtures;
