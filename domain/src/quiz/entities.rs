//! Quiz entities

use crate::core::error::DomainError;
use crate::core::ids::{CoupleId, QuizId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A completed quiz, stored with its free-form results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: QuizId,
    pub user_id: UserId,
    pub couple_id: CoupleId,
    pub quiz_type: String,
    pub results: Value,
    pub completed_at: DateTime<Utc>,
}

/// Validated quiz submission.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSubmission {
    quiz_type: String,
    results: Value,
}

impl QuizSubmission {
    /// Quiz type must be non-blank and results must be present.
    pub fn try_new(quiz_type: impl AsRef<str>, results: Value) -> Result<Self, DomainError> {
        let quiz_type = quiz_type.as_ref().trim();
        if quiz_type.is_empty() {
            return Err(DomainError::MissingQuizType);
        }
        if results.is_null() {
            return Err(DomainError::MissingQuizResults);
        }
        Ok(Self {
            quiz_type: quiz_type.to_string(),
            results,
        })
    }

    pub fn quiz_type(&self) -> &str {
        &self.quiz_type
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.quiz_type, self.results)
    }
}
