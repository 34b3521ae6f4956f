//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types where
//! appropriate.

mod chat;
mod issue;
mod logging;
mod server;
mod storage;

pub use chat::FileChatConfig;
pub use issue::{ConfigIssue, Severity};
pub use logging::FileLoggingConfig;
pub use server::{DEFAULT_LISTEN, FileServerConfig};
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Listener settings
    pub server: FileServerConfig,
    /// Snapshot and question seed locations
    pub storage: FileStorageConfig,
    /// Chat settings
    pub chat: FileChatConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.server.parse_listen().1);
        issues.extend(self.chat.to_service_params().1);

        if let Some(path) = &self.storage.question_seed_path
            && !path.exists()
        {
            issues.push(ConfigIssue::error(
                "storage.question_seed_path",
                format!(
                    "storage.question_seed_path: {} does not exist",
                    path.display()
                ),
            ));
        }

        issues
    }
}
