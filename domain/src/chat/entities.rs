//! Chat entities

use crate::core::error::DomainError;
use crate::core::ids::{CoupleId, MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trimmed, non-empty message text (Value Object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn try_new(content: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = content.as_ref().trim();
        if trimmed.is_empty() {
            Err(DomainError::EmptyMessage)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for MessageContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub couple_id: CoupleId,
    pub sender_id: UserId,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
}

impl Message {
    /// A new, unread message.
    pub fn new(
        id: MessageId,
        couple_id: CoupleId,
        sender_id: UserId,
        content: MessageContent,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            couple_id,
            sender_id,
            content,
            created_at,
            is_read: false,
            read_at: None,
        }
    }

    /// Mark the message read by `reader`.
    ///
    /// Returns false for the sender's own messages and for messages that
    /// were already read.
    pub fn mark_read_by(&mut self, reader: &UserId, at: DateTime<Utc>) -> bool {
        if &self.sender_id == reader || self.is_read {
            return false;
        }
        self.is_read = true;
        self.read_at = Some(at);
        true
    }
}
