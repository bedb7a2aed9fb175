//! File-based snapshot store.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::SessionSnapshot;

/// Errors raised by [`SnapshotStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid save slot name '{0}'")]
    InvalidSlot(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Stores session snapshots as pretty JSON files, one per named slot.
///
/// # File Format
///
/// Slot `name` lives at `{base_dir}/{name}.json`. Writes go to a temp file
/// first and are moved into place with a rename, so a crash never leaves a
/// half-written save behind.
pub struct SnapshotStore {
    base_dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidSlot(slot.to_string()));
        }
        Ok(self.base_dir.join(format!("{}.json", slot)))
    }

    pub fn save(&self, slot: &str, snapshot: &SessionSnapshot) -> Result<()> {
        let path = self.slot_path(slot)?;
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&temp_path, json)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved snapshot '{}' to {}", slot, path.display());

        Ok(())
    }

    pub fn load(&self, slot: &str) -> Result<Option<SessionSnapshot>> {
        let path = self.slot_path(slot)?;

        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let snapshot: SessionSnapshot = serde_json::from_str(&json)?;

        tracing::debug!("Loaded snapshot '{}' from {}", slot, path.display());

        Ok(Some(snapshot))
    }

    pub fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted snapshot '{}'", slot);
        }

        Ok(())
    }

    /// Slot names with a saved snapshot, sorted.
    pub fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename.strip_suffix(".json")
            {
                slots.push(slot.to_string());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
