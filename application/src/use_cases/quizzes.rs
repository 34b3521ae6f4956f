//! Relationship quiz use cases

use super::shared::ErrorStatus;
use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::repositories::Repositories;
use crate::ports::store_error::StoreError;
use couplequest_domain::{DomainError, QuizResult, QuizSubmission, UserId};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("{0}")]
    InvalidSubmission(#[from] DomainError),

    #[error("No couple found")]
    NoCouple,

    #[error("Internal error: {0}")]
    Internal(#[from] StoreError),
}

impl QuizError {
    pub fn status(&self) -> ErrorStatus {
        match self {
            QuizError::InvalidSubmission(_) | QuizError::NoCouple => ErrorStatus::BadRequest,
            QuizError::Internal(_) => ErrorStatus::Internal,
        }
    }
}

/// The partner's side of a quiz, as seen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerQuizView {
    pub has_partner: bool,
    /// Results of the partner's latest attempt of the quiz type.
    pub partner_results: Option<Value>,
    /// Both members have completed the quiz type at least once.
    pub both_completed: bool,
}

impl PartnerQuizView {
    fn without_partner() -> Self {
        Self {
            has_partner: false,
            partner_results: None,
            both_completed: false,
        }
    }
}

pub struct QuizUseCase {
    repos: Repositories,
    activity: Arc<dyn ActivityLogger>,
}

impl QuizUseCase {
    pub fn new(repos: Repositories) -> Self {
        Self {
            repos,
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_activity_logger(mut self, activity: Arc<dyn ActivityLogger>) -> Self {
        self.activity = activity;
        self
    }

    pub async fn save(
        &self,
        caller: &UserId,
        quiz_type: &str,
        results: Value,
    ) -> Result<QuizResult, QuizError> {
        let submission = QuizSubmission::try_new(quiz_type, results)?;
        let couple = self
            .repos
            .couples
            .find_by_member(caller)
            .await?
            .ok_or(QuizError::NoCouple)?;

        let quiz = self.repos.quizzes.insert(couple.id, caller, submission).await?;
        self.activity.log(ActivityEvent::new(
            "quiz_saved",
            serde_json::json!({
                "coupleId": couple.id,
                "quizId": quiz.id,
                "quizType": quiz.quiz_type,
                "userId": caller,
            }),
        ));
        Ok(quiz)
    }

    /// The couple's quizzes, newest first. Empty without a couple.
    pub async fn list(&self, caller: &UserId) -> Result<Vec<QuizResult>, QuizError> {
        match self.repos.couples.find_by_member(caller).await? {
            Some(couple) => Ok(self.repos.quizzes.list_for_couple(couple.id).await?),
            None => Ok(Vec::new()),
        }
    }

    /// The partner's latest results for `quiz_type`.
    pub async fn partner_results(
        &self,
        caller: &UserId,
        quiz_type: &str,
    ) -> Result<PartnerQuizView, QuizError> {
        let quiz_type = quiz_type.trim();
        if quiz_type.is_empty() {
            return Err(DomainError::MissingQuizType.into());
        }
        let Some(couple) = self.repos.couples.find_by_member(caller).await? else {
            return Ok(PartnerQuizView::without_partner());
        };
        let Some(partner) = couple.partner_of(caller).ok().flatten() else {
            return Ok(PartnerQuizView::without_partner());
        };

        // Newest first, so the first match is the latest attempt.
        let quizzes = self.repos.quizzes.list_for_couple(couple.id).await?;
        let latest_of = |user: &UserId| {
            quizzes
                .iter()
                .find(|q| &q.user_id == user && q.quiz_type == quiz_type)
        };
        let theirs = latest_of(partner);
        let mine = latest_of(caller);

        Ok(PartnerQuizView {
            has_partner: true,
            both_completed: theirs.is_some() && mine.is_some(),
            partner_results: theirs.map(|q| q.results.clone()),
        })
    }
}
