//! Quiz result persistence port

use super::store_error::StoreError;
use async_trait::async_trait;
use couplequest_domain::{CoupleId, QuizResult, QuizSubmission, UserId};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn insert(
        &self,
        couple: CoupleId,
        user: &UserId,
        submission: QuizSubmission,
    ) -> Result<QuizResult, StoreError>;

    /// Quizzes of `couple`, newest first.
    async fn list_for_couple(&self, couple: CoupleId) -> Result<Vec<QuizResult>, StoreError>;
}
