use std::collections::{BTreeMap, BTreeSet};

use crate::investigation::{ClueId, ObjectId, QuestId};

/// Lifecycle of a quest: `Locked -> Unlocked -> Completed`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum QuestStatus {
    #[default]
    Locked,
    Unlocked,
    Completed,
}

/// Per-player investigation progress.
///
/// Mutated only by [`crate::investigation::InvestigationEngine`]; quests that were
/// never touched are implicitly [`QuestStatus::Locked`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvestigationState {
    discovered_clues: BTreeSet<ClueId>,
    investigation_counts: BTreeMap<ObjectId, u8>,
    quest_status: BTreeMap<QuestId, QuestStatus>,
}

impl InvestigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discovered_clues(&self) -> &BTreeSet<ClueId> {
        &self.discovered_clues
    }

    pub fn has_clue(&self, clue: ClueId) -> bool {
        self.discovered_clues.contains(&clue)
    }

    pub fn investigation_count(&self, object: ObjectId) -> u8 {
        self.investigation_counts.get(&object).copied().unwrap_or(0)
    }

    pub fn investigation_counts(&self) -> &BTreeMap<ObjectId, u8> {
        &self.investigation_counts
    }

    pub fn quest_status(&self, quest: QuestId) -> QuestStatus {
        self.quest_status.get(&quest).copied().unwrap_or_default()
    }

    /// Quests that have left the `Locked` state.
    pub fn quest_statuses(&self) -> &BTreeMap<QuestId, QuestStatus> {
        &self.quest_status
    }

    pub fn completed_count(&self) -> usize {
        self.quest_status
            .values()
            .filter(|status| **status == QuestStatus::Completed)
            .count()
    }

    /// Returns true if the clue was not known before.
    pub(crate) fn discover(&mut self, clue: ClueId) -> bool {
        self.discovered_clues.insert(clue)
    }

    pub(crate) fn set_investigation_count(&mut self, object: ObjectId, count: u8) {
        if count == 0 {
            self.investigation_counts.remove(&object);
        } else {
            self.investigation_counts.insert(object, count);
        }
    }

    pub(crate) fn set_quest_status(&mut self, quest: QuestId, status: QuestStatus) {
        if status == QuestStatus::Locked {
            self.quest_status.remove(&quest);
        } else {
            self.quest_status.insert(quest, status);
        }
    }
}
