//! Daily question entities

use crate::core::ids::{CoupleId, DailyQuestionId, QuestionId, ResponseId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A couple's prompt for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuestion {
    pub id: DailyQuestionId,
    pub couple_id: CoupleId,
    pub question_id: QuestionId,
    pub date: NaiveDate,
    #[serde(rename = "isCompleted")]
    pub completed: bool,
    /// Zero until both partners have answered.
    pub xp_awarded: u64,
    pub created_at: DateTime<Utc>,
}

impl DailyQuestion {
    pub fn new(
        id: DailyQuestionId,
        couple_id: CoupleId,
        question_id: QuestionId,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            couple_id,
            question_id,
            date,
            completed: false,
            xp_awarded: 0,
            created_at,
        }
    }

    /// Mark completed with a fixed award.
    pub fn complete(&mut self, award: u64) {
        self.completed = true;
        self.xp_awarded = award;
    }
}

/// One member's answer to a [`DailyQuestion`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: ResponseId,
    pub user_id: UserId,
    pub couple_id: CoupleId,
    pub daily_question_id: DailyQuestionId,
    pub answer: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

/// A response that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResponse {
    pub user_id: UserId,
    pub couple_id: CoupleId,
    pub daily_question_id: DailyQuestionId,
    pub answer: String,
}

impl NewResponse {
    /// Stored responses always start private.
    pub fn into_response(self, id: ResponseId, created_at: DateTime<Utc>) -> Response {
        Response {
            id,
            user_id: self.user_id,
            couple_id: self.couple_id,
            daily_question_id: self.daily_question_id,
            answer: self.answer,
            is_private: true,
            created_at,
        }
    }
}
