//! Mutable per-player state and its persistable snapshot.
//!
//! Runtime layers read this state but mutate it exclusively through
//! [`crate::session::GameSession`] and the engines it composes.
pub mod common;
pub mod investigation;
pub mod snapshot;

pub use common::Position;
pub use investigation::{InvestigationState, QuestStatus};
pub use snapshot::{SessionSnapshot, SnapshotError};
