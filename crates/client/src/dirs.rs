//! Platform-specific directories for logs and saves.

use std::path::PathBuf;

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "basement")
}

/// Log directory: `<cache dir>/logs`.
pub fn log_directory() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/basement"))
        .join("logs")
}

/// Snapshot directory: `<data dir>/saves`.
pub fn save_directory() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}
