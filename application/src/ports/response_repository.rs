//! Response persistence port

use super::store_error::StoreError;
use async_trait::async_trait;
use couplequest_domain::{DailyQuestionId, NewResponse, Response, UserId};

/// Storage for answers to daily questions.
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    async fn find(
        &self,
        daily_question: DailyQuestionId,
        user: &UserId,
    ) -> Result<Option<Response>, StoreError>;

    async fn list_for(&self, daily_question: DailyQuestionId) -> Result<Vec<Response>, StoreError>;

    /// Store a new private response.
    ///
    /// # Errors
    ///
    /// `Conflict(ResponsePerUser)` when the user already answered.
    async fn insert(&self, response: NewResponse) -> Result<Response, StoreError>;
}
