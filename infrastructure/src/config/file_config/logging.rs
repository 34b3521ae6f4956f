//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// # Example
///
/// ```toml
/// [logging]
/// activity_log = "/var/log/couple-quest/activity.jsonl"
/// dir = "/var/log/couple-quest"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving couple activity events
    pub activity_log: Option<PathBuf>,
    /// Directory for daily rolling diagnostic logs (stderr only when unset)
    pub dir: Option<PathBuf>,
}
