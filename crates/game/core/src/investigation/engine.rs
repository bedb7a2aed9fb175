use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::GameConfig;
use crate::state::{InvestigationState, QuestStatus};

use super::{
    Catalog, ClueId, DescriptionTier, EscapeRoute, InvestigationError, ObjectId, QuestId,
};

/// Result of one successful investigation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InvestigationOutcome {
    pub object: ObjectId,
    pub description: String,
    pub tier: DescriptionTier,
    /// Clue discovered by this call, if it was not already known.
    pub new_clue: Option<ClueId>,
    pub investigation_count: u8,
    pub max_investigations: u8,
    /// Quests that moved from locked to unlocked, in catalog order.
    pub unlocked_quests: Vec<QuestId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestCompletion {
    pub quest: QuestId,
    pub name: String,
    pub reward: String,
}

/// Answer to "may the player leave yet?".
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EscapeStatus {
    pub can_escape: bool,
    pub reason: String,
    /// Routes of completed quests, in catalog order. Empty while escape is closed.
    pub escape_routes: Vec<EscapeRoute>,
    /// Completed quests still missing before escape opens.
    pub quests_remaining: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClueDetails<'a> {
    pub clue: ClueId,
    pub description: &'a str,
    pub connects_to: &'a [String],
    pub reveals_quest: Option<QuestId>,
}

/// Read-only summary of everything the player has learned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerKnowledge {
    pub discovered_clues: Vec<ClueId>,
    pub investigation_counts: BTreeMap<ObjectId, u8>,
    pub quest_status: BTreeMap<QuestId, QuestStatus>,
    pub available_quests: Vec<QuestId>,
    /// Rewards of completed quests, in catalog order.
    pub rewards: Vec<(QuestId, String)>,
}

/// Investigation and quest state machine over a shared [`Catalog`].
#[derive(Clone, Debug)]
pub struct InvestigationEngine {
    catalog: Arc<Catalog>,
    state: InvestigationState,
}

impl InvestigationEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_state(catalog, InvestigationState::new())
    }

    /// Resumes from previously validated state.
    pub(crate) fn with_state(catalog: Arc<Catalog>, state: InvestigationState) -> Self {
        Self { catalog, state }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn state(&self) -> &InvestigationState {
        &self.state
    }

    pub(crate) fn replace_state(&mut self, state: InvestigationState) {
        self.state = state;
    }

    /// Investigates an object once more.
    ///
    /// The n-th investigation reads the tier for n and discovers the n-th clue
    /// of the object's sequence, then re-evaluates quest unlocking.
    pub fn investigate(
        &mut self,
        object: ObjectId,
    ) -> Result<InvestigationOutcome, InvestigationError> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog
            .object(object)
            .ok_or(InvestigationError::UnknownObject(object))?;

        let previous = self.state.investigation_count(object);
        if previous >= def.max_investigations {
            return Err(InvestigationError::ExhaustedInvestigation {
                object,
                max: def.max_investigations,
            });
        }

        let count = previous + 1;
        self.state.set_investigation_count(object, count);
        let tier = DescriptionTier::for_count(count);

        let new_clue = def
            .clue_sequence
            .get(usize::from(count) - 1)
            .copied()
            .filter(|clue| self.state.discover(*clue));
        if let Some(clue) = new_clue {
            tracing::debug!("Clue {} discovered on {}", clue, def.key);
        }

        let unlocked_quests = self.unlock_quests();

        tracing::debug!(
            "Investigated {} ({}/{}) at {} tier",
            def.key,
            count,
            def.max_investigations,
            tier
        );

        Ok(InvestigationOutcome {
            object,
            description: def.descriptions.get(tier).to_string(),
            tier,
            new_clue,
            investigation_count: count,
            max_investigations: def.max_investigations,
            unlocked_quests,
        })
    }

    pub fn investigate_key(
        &mut self,
        key: &str,
    ) -> Result<InvestigationOutcome, InvestigationError> {
        let object = self
            .catalog
            .object_id(key)
            .ok_or_else(|| InvestigationError::UnknownObjectKey(key.to_string()))?;
        self.investigate(object)
    }

    /// Unlocks every locked quest whose required clues are all discovered.
    fn unlock_quests(&mut self) -> Vec<QuestId> {
        let catalog = Arc::clone(&self.catalog);
        let mut unlocked = Vec::new();
        for (quest, def) in catalog.quests() {
            if self.state.quest_status(quest) != QuestStatus::Locked {
                continue;
            }
            if def
                .required_clues
                .iter()
                .all(|clue| self.state.has_clue(*clue))
            {
                self.state.set_quest_status(quest, QuestStatus::Unlocked);
                tracing::debug!("Quest {} unlocked", def.key);
                unlocked.push(quest);
            }
        }
        unlocked
    }

    pub fn complete_quest(&mut self, quest: QuestId) -> Result<QuestCompletion, InvestigationError> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog
            .quest(quest)
            .ok_or(InvestigationError::UnknownQuest(quest))?;

        let status = self.state.quest_status(quest);
        if status != QuestStatus::Unlocked {
            return Err(InvestigationError::QuestNotUnlocked { quest, status });
        }

        self.state.set_quest_status(quest, QuestStatus::Completed);
        tracing::debug!("Quest {} completed", def.key);

        Ok(QuestCompletion {
            quest,
            name: def.name.clone(),
            reward: def.reward.clone(),
        })
    }

    pub fn complete_quest_key(&mut self, key: &str) -> Result<QuestCompletion, InvestigationError> {
        let quest = self
            .catalog
            .quest_id(key)
            .ok_or_else(|| InvestigationError::UnknownQuestKey(key.to_string()))?;
        self.complete_quest(quest)
    }

    pub fn can_escape(&self) -> EscapeStatus {
        let completed = self.state.completed_count();
        let threshold = GameConfig::ESCAPE_QUEST_THRESHOLD;

        if completed >= threshold {
            let escape_routes = self
                .catalog
                .quests()
                .filter(|(quest, _)| self.state.quest_status(*quest) == QuestStatus::Completed)
                .filter_map(|(_, def)| def.escape_route.clone())
                .collect();
            EscapeStatus {
                can_escape: true,
                reason: "You have learned enough to attempt an escape.".to_string(),
                escape_routes,
                quests_remaining: 0,
            }
        } else {
            let remaining = threshold - completed;
            EscapeStatus {
                can_escape: false,
                reason: format!(
                    "You need to investigate more before trying to escape ({remaining} more quest{} to complete).",
                    if remaining == 1 { "" } else { "s" }
                ),
                escape_routes: Vec::new(),
                quests_remaining: remaining,
            }
        }
    }

    pub fn clue_details(&self, clue: ClueId) -> Option<ClueDetails<'_>> {
        self.catalog.clue(clue).map(|def| ClueDetails {
            clue,
            description: &def.description,
            connects_to: &def.connects_to,
            reveals_quest: def.reveals_quest,
        })
    }

    /// Quests currently unlocked and not yet completed, in catalog order.
    pub fn available_quests(&self) -> Vec<QuestId> {
        self.catalog
            .quests()
            .map(|(quest, _)| quest)
            .filter(|quest| self.state.quest_status(*quest) == QuestStatus::Unlocked)
            .collect()
    }

    pub fn knowledge(&self) -> PlayerKnowledge {
        let rewards = self
            .catalog
            .quests()
            .filter(|(quest, _)| self.state.quest_status(*quest) == QuestStatus::Completed)
            .map(|(quest, def)| (quest, def.reward.clone()))
            .collect();

        PlayerKnowledge {
            discovered_clues: self.state.discovered_clues().iter().copied().collect(),
            investigation_counts: self.state.investigation_counts().clone(),
            quest_status: self.state.quest_statuses().clone(),
            available_quests: self.available_quests(),
            rewards,
        }
    }
}
