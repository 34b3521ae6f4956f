//! Submit answer use case
//!
//! The daily-question workflow runs inside a single request:
//!
//! 1. **Submission** - the caller's answer is stored privately
//! 2. **Partner check** - has the other member of the couple answered too?
//! 3. **Reveal & reward** - if so, both answers become visible, the question
//!    is completed and the couple earns [`DAILY_QUESTION_XP`]
//!
//! Steps 1 to 3 hold a per-question lock, and the reveal itself is a single
//! conditional store transaction. Two partners answering at the same moment
//! therefore produce exactly one reward. When a reveal fails after both
//! answers are stored, the next submission for that question, rejected as a
//! duplicate, retries it.

use super::shared::{ErrorStatus, KeyedLocks};
use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::repositories::Repositories;
use crate::ports::store_error::{StoreError, UniqueKey};
use couplequest_domain::{
    CoupleId, DAILY_QUESTION_XP, DailyQuestionId, NewResponse, Reward, UserId, preview,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while submitting an answer
#[derive(Error, Debug)]
pub enum SubmitAnswerError {
    #[error("Question not found")]
    NotFound(DailyQuestionId),

    #[error("Not authorized")]
    Forbidden,

    #[error("Already answered")]
    AlreadyAnswered,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SubmitAnswerError {
    pub fn status(&self) -> ErrorStatus {
        match self {
            SubmitAnswerError::NotFound(_) => ErrorStatus::NotFound,
            SubmitAnswerError::Forbidden => ErrorStatus::Forbidden,
            SubmitAnswerError::AlreadyAnswered => ErrorStatus::Conflict,
            SubmitAnswerError::Internal(_) => ErrorStatus::Internal,
        }
    }
}

impl From<StoreError> for SubmitAnswerError {
    fn from(e: StoreError) -> Self {
        if e.is_conflict_on(UniqueKey::ResponsePerUser) {
            SubmitAnswerError::AlreadyAnswered
        } else {
            SubmitAnswerError::Internal(e.to_string())
        }
    }
}

/// Input for the SubmitAnswer use case
#[derive(Debug, Clone)]
pub struct SubmitAnswerInput {
    /// Identity asserted by the authentication gateway.
    pub caller: UserId,
    pub daily_question_id: DailyQuestionId,
    pub answer: String,
}

impl SubmitAnswerInput {
    pub fn new(
        caller: impl Into<UserId>,
        daily_question_id: DailyQuestionId,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            caller: caller.into(),
            daily_question_id,
            answer: answer.into(),
        }
    }
}

/// Output of the SubmitAnswer use case
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerOutput {
    pub success: bool,
    pub both_answered: bool,
    /// Set only by the submission that completed the question.
    #[serde(skip)]
    pub reward: Option<Reward>,
}

/// Use case for answering a couple's daily question.
pub struct SubmitAnswerUseCase {
    repos: Repositories,
    locks: KeyedLocks<DailyQuestionId>,
    activity: Arc<dyn ActivityLogger>,
}

impl SubmitAnswerUseCase {
    pub fn new(repos: Repositories) -> Self {
        Self {
            repos,
            locks: KeyedLocks::new(),
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_activity_logger(mut self, activity: Arc<dyn ActivityLogger>) -> Self {
        self.activity = activity;
        self
    }

    /// Submit the caller's answer and reveal both answers if the partner
    /// has already answered.
    ///
    /// # Errors
    ///
    /// - [`SubmitAnswerError::NotFound`] - no such daily question
    /// - [`SubmitAnswerError::Forbidden`] - caller is not in the owning couple
    /// - [`SubmitAnswerError::AlreadyAnswered`] - caller answered before
    /// - [`SubmitAnswerError::Internal`] - the store failed
    pub async fn execute(
        &self,
        input: SubmitAnswerInput,
    ) -> Result<SubmitAnswerOutput, SubmitAnswerError> {
        let SubmitAnswerInput {
            caller,
            daily_question_id,
            answer,
        } = input;

        let daily = self
            .repos
            .daily_questions
            .find_by_id(daily_question_id)
            .await?
            .ok_or(SubmitAnswerError::NotFound(daily_question_id))?;

        let couple = self
            .repos
            .couples
            .find_by_id(daily.couple_id)
            .await?
            .ok_or_else(|| {
                SubmitAnswerError::Internal(format!(
                    "daily question {} references missing couple {}",
                    daily.id, daily.couple_id
                ))
            })?;

        let partner = couple
            .partner_of(&caller)
            .map_err(|_| SubmitAnswerError::Forbidden)?
            .cloned();

        let _guard = self.locks.lock(daily.id).await;

        if self.repos.responses.find(daily.id, &caller).await?.is_some() {
            // Both answers stored but the reveal never went through.
            if !daily.completed && self.partner_answered(daily.id, partner.as_ref()).await? {
                info!("Retrying reveal of daily question {}", daily.id);
                self.reveal(daily.id, couple.id).await?;
            }
            return Err(SubmitAnswerError::AlreadyAnswered);
        }

        let response = self
            .repos
            .responses
            .insert(NewResponse {
                user_id: caller.clone(),
                couple_id: couple.id,
                daily_question_id: daily.id,
                answer,
            })
            .await?;

        debug!(
            "User {} answered daily question {}: {}",
            caller,
            daily.id,
            preview(&response.answer, 40)
        );
        self.activity.log(ActivityEvent::new(
            "answer_submitted",
            serde_json::json!({
                "coupleId": couple.id,
                "dailyQuestionId": daily.id,
                "userId": caller,
            }),
        ));

        let both_answered = self.partner_answered(daily.id, partner.as_ref()).await?;

        let reward = if both_answered {
            self.reveal(daily.id, couple.id).await?
        } else {
            None
        };

        Ok(SubmitAnswerOutput {
            success: true,
            both_answered,
            reward,
        })
    }

    async fn partner_answered(
        &self,
        daily_question_id: DailyQuestionId,
        partner: Option<&UserId>,
    ) -> Result<bool, SubmitAnswerError> {
        match partner {
            Some(partner) => Ok(self
                .repos
                .responses
                .find(daily_question_id, partner)
                .await?
                .is_some()),
            None => Ok(false),
        }
    }

    async fn reveal(
        &self,
        daily_question_id: DailyQuestionId,
        couple_id: CoupleId,
    ) -> Result<Option<Reward>, SubmitAnswerError> {
        let reward = self
            .repos
            .daily_questions
            .reveal(daily_question_id, DAILY_QUESTION_XP)
            .await?;

        match &reward {
            Some(reward) => {
                info!(
                    "Couple {} completed daily question {}: streak {}, XP {}, level {}",
                    couple_id,
                    daily_question_id,
                    reward.after.streak,
                    reward.after.total_xp,
                    reward.after.level
                );
                self.activity.log(ActivityEvent::new(
                    "question_revealed",
                    serde_json::json!({
                        "coupleId": couple_id,
                        "dailyQuestionId": daily_question_id,
                        "xpAwarded": reward.award,
                        "progress": reward.after,
                    }),
                ));
            }
            None => debug!("Daily question {} was already revealed", daily_question_id),
        }
        Ok(reward)
    }
}
