//! Daily question persistence port

use super::store_error::StoreError;
use async_trait::async_trait;
use chrono::NaiveDate;
use couplequest_domain::{CoupleId, DailyQuestion, DailyQuestionId, QuestionId, Reward};

/// Storage for [`DailyQuestion`] records and the reveal transition.
#[async_trait]
pub trait DailyQuestionRepository: Send + Sync {
    async fn find_by_id(&self, id: DailyQuestionId) -> Result<Option<DailyQuestion>, StoreError>;

    async fn find_for_date(
        &self,
        couple: CoupleId,
        date: NaiveDate,
    ) -> Result<Option<DailyQuestion>, StoreError>;

    /// Create the couple's question for `date`, or return the existing one.
    ///
    /// At most one daily question exists per (couple, date); when two
    /// callers race, both get the same row.
    async fn get_or_create(
        &self,
        couple: CoupleId,
        question: QuestionId,
        date: NaiveDate,
    ) -> Result<DailyQuestion, StoreError>;

    /// Reveal a daily question and reward its couple, as one unit.
    ///
    /// Makes every response public, marks the question completed with
    /// `award`, and applies [`Progress::reward`](couplequest_domain::Progress::reward)
    /// to the owning couple. Either all of it happens or nothing does.
    ///
    /// Returns `Ok(None)` without changing anything when the question was
    /// already completed.
    async fn reveal(&self, id: DailyQuestionId, award: u64) -> Result<Option<Reward>, StoreError>;
}
