//! Persistable view of a [`crate::session::GameSession`].
//!
//! Snapshots name objects, clues and quests by their catalog keys rather than
//! by index so that a save survives catalog reordering. Collections are kept
//! sorted so equal sessions produce byte-identical snapshots.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Position, QuestStatus};
use crate::world::ItemId;

/// Full mutable state of one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub player_position: Position,
    pub explored: Vec<Position>,
    pub visible: Vec<Position>,
    /// Object key → number of completed investigations.
    pub investigation_counts: BTreeMap<String, u8>,
    pub discovered_clues: Vec<String>,
    /// Quest key → status. Locked quests are omitted.
    pub quest_status: BTreeMap<String, QuestStatus>,
    /// Items taken out of the world by the player.
    #[cfg_attr(feature = "serde", serde(default))]
    pub removed_items: Vec<ItemId>,
}

/// Reasons a snapshot cannot be applied to a session.
///
/// Restoring is all-or-nothing: on any of these the session is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot references unknown object '{0}'")]
    UnknownObject(String),

    #[error("snapshot references unknown clue '{0}'")]
    UnknownClue(String),

    #[error("snapshot references unknown quest '{0}'")]
    UnknownQuest(String),

    #[error("snapshot references item {0} which this scene never contained")]
    UnknownItem(ItemId),

    #[error("clue '{0}' is discovered but no recorded investigation yields it")]
    ClueNotYielded(String),

    #[error("object '{object}' investigated {count} times, maximum is {max}")]
    CountExceedsMax { object: String, count: u8, max: u8 },

    #[error("quest '{quest}' is {status} but its required clues are not all discovered")]
    QuestPrerequisitesMissing { quest: String, status: QuestStatus },

    #[error("player position {0} is not walkable")]
    PlayerNotWalkable(Position),

    #[error("tile {0} is visible but was never explored")]
    VisibleNotExplored(Position),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        use SnapshotError::*;
        match self {
            UnknownObject(_) | UnknownClue(_) | UnknownQuest(_) | UnknownItem(_) => {
                ErrorSeverity::Validation
            }
            CountExceedsMax { .. }
            | ClueNotYielded(_)
            | QuestPrerequisitesMissing { .. }
            | PlayerNotWalkable(_)
            | VisibleNotExplored(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use SnapshotError::*;
        match self {
            UnknownObject(_) => "SNAPSHOT_UNKNOWN_OBJECT",
            UnknownClue(_) => "SNAPSHOT_UNKNOWN_CLUE",
            UnknownQuest(_) => "SNAPSHOT_UNKNOWN_QUEST",
            UnknownItem(_) => "SNAPSHOT_UNKNOWN_ITEM",
            CountExceedsMax { .. } => "SNAPSHOT_COUNT_EXCEEDS_MAX",
            ClueNotYielded(_) => "SNAPSHOT_CLUE_NOT_YIELDED",
            QuestPrerequisitesMissing { .. } => "SNAPSHOT_QUEST_PREREQUISITES_MISSING",
            PlayerNotWalkable(_) => "SNAPSHOT_PLAYER_NOT_WALKABLE",
            VisibleNotExplored(_) => "SNAPSHOT_VISIBLE_NOT_EXPLORED",
        }
    }
}
