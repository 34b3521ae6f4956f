//! Chat configuration from TOML (`[chat]` section)

use super::issue::ConfigIssue;
use couplequest_application::config::{DEFAULT_CHAT_HISTORY_LIMIT, ServiceParams};
use serde::{Deserialize, Serialize};

/// Raw chat configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Number of most recent messages returned by chat history
    pub history_limit: usize,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_CHAT_HISTORY_LIMIT,
        }
    }
}

impl FileChatConfig {
    /// Convert to [`ServiceParams`], falling back to the default limit when
    /// the configured one is zero.
    pub fn to_service_params(&self) -> (ServiceParams, Vec<ConfigIssue>) {
        if self.history_limit == 0 {
            return (
                ServiceParams::default(),
                vec![ConfigIssue::warning(
                    "chat.history_limit",
                    format!(
                        "chat.history_limit: 0 would hide every message, using {}",
                        DEFAULT_CHAT_HISTORY_LIMIT
                    ),
                )],
            );
        }
        (
            ServiceParams::default().with_chat_history_limit(self.history_limit),
            vec![],
        )
    }
}
