//! Chat message persistence port

use super::store_error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use couplequest_domain::{CoupleId, Message, MessageContent, UserId};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn append(
        &self,
        couple: CoupleId,
        sender: &UserId,
        content: MessageContent,
    ) -> Result<Message, StoreError>;

    /// The `limit` most recent messages of `couple`, oldest first.
    async fn recent(&self, couple: CoupleId, limit: usize) -> Result<Vec<Message>, StoreError>;

    /// Mark every unread message of `couple` not sent by `reader` as read.
    /// Returns how many messages changed.
    async fn mark_read(
        &self,
        couple: CoupleId,
        reader: &UserId,
        at: DateTime<Utc>,
    ) -> Result<usize, StoreError>;
}
