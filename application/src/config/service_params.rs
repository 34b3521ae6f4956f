//! Service parameters shared by use cases.

use serde::{Deserialize, Serialize};

/// Number of chat messages returned by default.
pub const DEFAULT_CHAT_HISTORY_LIMIT: usize = 100;

/// Tunables that shape use case results.
///
/// Built from the `[chat]` file config section by the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceParams {
    /// Maximum number of messages returned by chat history.
    pub chat_history_limit: usize,
}

impl Default for ServiceParams {
    fn default() -> Self {
        Self {
            chat_history_limit: DEFAULT_CHAT_HISTORY_LIMIT,
        }
    }
}

impl ServiceParams {
    pub fn with_chat_history_limit(mut self, limit: usize) -> Self {
        self.chat_history_limit = limit;
        self
    }
}
