use crate::error::{ErrorSeverity, GameError};
use crate::state::QuestStatus;

use super::{ObjectId, QuestId};

/// Errors surfaced by [`super::InvestigationEngine`] operations.
///
/// Every failure leaves the investigation state untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvestigationError {
    #[error("{0} is not part of the catalog")]
    UnknownObject(ObjectId),

    #[error("no object named '{0}'")]
    UnknownObjectKey(String),

    #[error("{object} has already been investigated {max} times")]
    ExhaustedInvestigation { object: ObjectId, max: u8 },

    #[error("{0} is not part of the catalog")]
    UnknownQuest(QuestId),

    #[error("no quest named '{0}'")]
    UnknownQuestKey(String),

    #[error("{quest} cannot be completed while {status}")]
    QuestNotUnlocked { quest: QuestId, status: QuestStatus },
}

impl GameError for InvestigationError {
    fn severity(&self) -> ErrorSeverity {
        use InvestigationError::*;
        match self {
            UnknownObject(_) | UnknownObjectKey(_) | UnknownQuest(_) | UnknownQuestKey(_) => {
                ErrorSeverity::Validation
            }
            ExhaustedInvestigation { .. } | QuestNotUnlocked { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use InvestigationError::*;
        match self {
            UnknownObject(_) | UnknownObjectKey(_) => "INVESTIGATION_UNKNOWN_OBJECT",
            ExhaustedInvestigation { .. } => "INVESTIGATION_EXHAUSTED",
            UnknownQuest(_) | UnknownQuestKey(_) => "INVESTIGATION_UNKNOWN_QUEST",
            QuestNotUnlocked { .. } => "INVESTIGATION_QUEST_NOT_UNLOCKED",
        }
    }
}
