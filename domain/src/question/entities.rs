//! Question catalog entities

use super::occasion::Occasion;
use crate::core::ids::QuestionId;
use serde::{Deserialize, Serialize};

/// Which part of the app a prompt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionModule {
    /// Drawn for the daily question.
    Daily,
    /// Listed in the browsable question bank.
    QuestionsBank,
}

/// A prompt in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub category: String,
    pub depth: String,
    pub module: QuestionModule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<Occasion>,
    #[serde(rename = "isActive")]
    pub active: bool,
}

impl Question {
    /// Active daily prompt tagged with one of `occasions`.
    pub fn is_daily_for(&self, occasions: &[Occasion]) -> bool {
        self.active
            && self.module == QuestionModule::Daily
            && self.occasion.is_some_and(|o| occasions.contains(&o))
    }

    /// Active daily prompt without an occasion tag.
    pub fn is_regular_daily(&self) -> bool {
        self.active && self.module == QuestionModule::Daily && self.occasion.is_none()
    }

    /// Active bank prompt matching the optional filters.
    pub fn matches_bank_filter(&self, category: Option<&str>, depth: Option<&str>) -> bool {
        self.active
            && self.module == QuestionModule::QuestionsBank
            && category.is_none_or(|c| self.category == c)
            && depth.is_none_or(|d| self.depth == d)
    }
}
