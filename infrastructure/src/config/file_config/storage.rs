//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// JSON snapshot the store is loaded from and flushed to.
    /// Without it, state lives only as long as the process.
    pub snapshot_path: Option<PathBuf>,
    /// TOML question catalog used instead of the built-in one
    pub question_seed_path: Option<PathBuf>,
}
