//! Couple chat use cases

use super::shared::ErrorStatus;
use crate::config::ServiceParams;
use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::repositories::Repositories;
use crate::ports::store_error::StoreError;
use chrono::Utc;
use couplequest_domain::{DomainError, Message, MessageContent, UserId};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("{0}")]
    InvalidMessage(#[from] DomainError),

    #[error("No couple found")]
    NoCouple,

    #[error("Internal error: {0}")]
    Internal(#[from] StoreError),
}

impl ChatError {
    pub fn status(&self) -> ErrorStatus {
        match self {
            ChatError::InvalidMessage(_) | ChatError::NoCouple => ErrorStatus::BadRequest,
            ChatError::Internal(_) => ErrorStatus::Internal,
        }
    }
}

pub struct ChatUseCase {
    repos: Repositories,
    history_limit: usize,
    activity: Arc<dyn ActivityLogger>,
}

impl ChatUseCase {
    pub fn new(repos: Repositories, params: &ServiceParams) -> Self {
        Self {
            repos,
            history_limit: params.chat_history_limit,
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_activity_logger(mut self, activity: Arc<dyn ActivityLogger>) -> Self {
        self.activity = activity;
        self
    }

    /// Post a message to the caller's couple. Content is trimmed.
    pub async fn send(&self, caller: &UserId, content: &str) -> Result<Message, ChatError> {
        let content = MessageContent::try_new(content)?;
        let couple = self
            .repos
            .couples
            .find_by_member(caller)
            .await?
            .ok_or(ChatError::NoCouple)?;

        let message = self.repos.messages.append(couple.id, caller, content).await?;
        debug!("User {} sent message {} to couple {}", caller, message.id, couple.id);
        self.activity.log(ActivityEvent::new(
            "message_sent",
            serde_json::json!({ "coupleId": couple.id, "messageId": message.id, "userId": caller }),
        ));
        Ok(message)
    }

    /// Recent messages of the caller's couple, oldest first.
    pub async fn list(&self, caller: &UserId) -> Result<Vec<Message>, ChatError> {
        match self.repos.couples.find_by_member(caller).await? {
            Some(couple) => Ok(self
                .repos
                .messages
                .recent(couple.id, self.history_limit)
                .await?),
            None => Ok(Vec::new()),
        }
    }

    /// Mark the partner's messages as read. Returns how many changed; zero
    /// without a couple.
    pub async fn mark_read(&self, caller: &UserId) -> Result<usize, ChatError> {
        let Some(couple) = self.repos.couples.find_by_member(caller).await? else {
            return Ok(0);
        };
        let updated = self
            .repos
            .messages
            .mark_read(couple.id, caller, Utc::now())
            .await?;
        if updated > 0 {
            debug!("User {} read {} message(s) in couple {}", caller, updated, couple.id);
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockStore;
    use couplequest_domain::Progress;

    #[tokio::test]
    async fn test_send_and_list() {
        let store = MockStore::new();
        store.paired("alice", "bob", Progress::default());
        let uc = ChatUseCase::new(
            store.repositories(),
            &ServiceParams::default().with_chat_history_limit(2),
        );
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        uc.send(&alice, "one").await.unwrap();
        uc.send(&bob, "  two  ").await.unwrap();
        uc.send(&alice, "three").await.unwrap();

        let msgs = uc.list(&bob).await.unwrap();
        let texts: Vec<&str> = msgs.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(texts, vec!["two", "three"]);
    }

    #[tokio::test]
    async fn test_send_errors() {
        let store = MockStore::new();
        let uc = ChatUseCase::new(store.repositories(), &ServiceParams::default());
        let alice = UserId::new("alice");

        let err = uc.send(&alice, "   ").await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidMessage(DomainError::EmptyMessage)));
        assert_eq!(err.status(), ErrorStatus::BadRequest);

        let err = uc.send(&alice, "hello").await.unwrap_err();
        assert!(matches!(err, ChatError::NoCouple));

        assert!(uc.list(&alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mark_read_only_partner_messages() {
        let store = MockStore::new();
        store.paired("alice", "bob", Progress::default());
        let uc = ChatUseCase::new(store.repositories(), &ServiceParams::default());
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        uc.send(&alice, "good morning").await.unwrap();
        uc.send(&bob, "morning!").await.unwrap();
        uc.send(&alice, "coffee?").await.unwrap();

        assert_eq!(uc.mark_read(&bob).await.unwrap(), 2);
        assert_eq!(uc.mark_read(&bob).await.unwrap(), 0);

        let msgs = uc.list(&alice).await.unwrap();
        let read: Vec<bool> = msgs.iter().map(|m| m.is_read).collect();
        assert_eq!(read, vec![true, false, true]);
        assert!(msgs[0].read_at.is_some());
        assert!(msgs[1].read_at.is_none());

        assert_eq!(uc.mark_read(&UserId::new("carol")).await.unwrap(), 0);
    }
}
