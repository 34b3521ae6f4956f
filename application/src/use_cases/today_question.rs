//! Today's question use case
//!
//! Returns the couple's daily question for a given date, drawing one on
//! first access. Occasions (birthdays, anniversary, holidays) pick a themed
//! prompt when the catalog has one; otherwise a regular daily prompt is used.

use super::shared::ErrorStatus;
use crate::ports::repositories::Repositories;
use crate::ports::store_error::StoreError;
use chrono::NaiveDate;
use couplequest_domain::{
    Couple, DailyQuestion, Occasion, OccasionContext, Question, UserId, current_occasions,
};
use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum TodayQuestionError {
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodayQuestionError {
    pub fn status(&self) -> ErrorStatus {
        ErrorStatus::Internal
    }
}

impl From<StoreError> for TodayQuestionError {
    fn from(e: StoreError) -> Self {
        TodayQuestionError::Internal(e.to_string())
    }
}

/// Today's question from the caller's point of view.
///
/// Answers are only included once both partners have answered and the
/// question has been revealed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayQuestionView {
    #[serde(flatten)]
    pub daily_question: DailyQuestion,
    pub question: Option<Question>,
    pub user_has_answered: bool,
    pub partner_has_answered: bool,
    pub both_answered: bool,
    pub user_answer: Option<String>,
    pub partner_answer: Option<String>,
}

pub struct TodayQuestionUseCase {
    repos: Repositories,
}

impl TodayQuestionUseCase {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// The caller's daily question for `today`.
    ///
    /// `Ok(None)` when the caller has no complete couple or the catalog has
    /// no daily prompts.
    pub async fn execute(
        &self,
        caller: &UserId,
        today: NaiveDate,
    ) -> Result<Option<TodayQuestionView>, TodayQuestionError> {
        let Some(couple) = self.repos.couples.find_by_member(caller).await? else {
            return Ok(None);
        };
        let Some(partner) = couple
            .partner_of(caller)
            .map_err(|e| TodayQuestionError::Internal(e.to_string()))?
            .cloned()
        else {
            return Ok(None);
        };

        let daily = match self.repos.daily_questions.find_for_date(couple.id, today).await? {
            Some(existing) => existing,
            None => {
                let Some(question) = self.draw(&couple, caller, &partner, today).await? else {
                    return Ok(None);
                };
                debug!(
                    "Drew question {} for couple {} on {}",
                    question.id, couple.id, today
                );
                self.repos
                    .daily_questions
                    .get_or_create(couple.id, question.id, today)
                    .await?
            }
        };

        let question = self.repos.questions.find_by_id(daily.question_id).await?;
        let responses = self.repos.responses.list_for(daily.id).await?;
        let mine = responses.iter().find(|r| &r.user_id == caller);
        let theirs = responses.iter().find(|r| r.user_id == partner);
        // Answers stay hidden until the reveal has gone through.
        let both_answered = mine.is_some()
            && theirs.is_some()
            && daily.completed
            && responses.iter().all(|r| !r.is_private);

        Ok(Some(TodayQuestionView {
            user_has_answered: mine.is_some(),
            partner_has_answered: theirs.is_some(),
            both_answered,
            user_answer: mine.filter(|_| both_answered).map(|r| r.answer.clone()),
            partner_answer: theirs.filter(|_| both_answered).map(|r| r.answer.clone()),
            question,
            daily_question: daily,
        }))
    }

    async fn draw(
        &self,
        couple: &Couple,
        caller: &UserId,
        partner: &UserId,
        today: NaiveDate,
    ) -> Result<Option<Question>, TodayQuestionError> {
        let mine = self.repos.profiles.find(caller).await?;
        let theirs = self.repos.profiles.find(partner).await?;

        let occasions = current_occasions(&OccasionContext {
            today: Some(today),
            user_birthday: mine.as_ref().and_then(|p| p.birthday),
            partner_birthday: theirs.as_ref().and_then(|p| p.birthday),
            anniversary: couple.anniversary,
            religion: mine.as_ref().and_then(|p| p.religion.as_deref()),
        });

        let catalog = self.repos.questions.all().await?;
        Ok(pick_daily(&catalog, &occasions))
    }
}

/// Themed prompts win over regular ones; the pick within a group is random.
fn pick_daily(catalog: &[Question], occasions: &[Occasion]) -> Option<Question> {
    let themed: Vec<&Question> = catalog.iter().filter(|q| q.is_daily_for(occasions)).collect();
    let pool = if themed.is_empty() {
        catalog.iter().filter(|q| q.is_regular_daily()).collect()
    } else {
        themed
    };
    pool.choose(&mut rand::thread_rng()).map(|q| (*q).clone())
}
