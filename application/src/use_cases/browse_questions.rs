//! Question bank browsing

use super::shared::ErrorStatus;
use crate::ports::question_catalog::QuestionCatalog;
use crate::ports::store_error::StoreError;
use couplequest_domain::Question;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowseQuestionsError {
    #[error("Internal error: {0}")]
    Internal(#[from] StoreError),
}

impl BrowseQuestionsError {
    pub fn status(&self) -> ErrorStatus {
        ErrorStatus::Internal
    }
}

/// Optional filters for the question bank
#[derive(Debug, Clone, Default)]
pub struct BrowseFilter {
    pub category: Option<String>,
    pub depth: Option<String>,
}

pub struct BrowseQuestionsUseCase {
    catalog: Arc<dyn QuestionCatalog>,
}

impl BrowseQuestionsUseCase {
    pub fn new(catalog: Arc<dyn QuestionCatalog>) -> Self {
        Self { catalog }
    }

    /// Active question bank prompts matching `filter`, ordered by id.
    pub async fn execute(&self, filter: &BrowseFilter) -> Result<Vec<Question>, BrowseQuestionsError> {
        let mut matching: Vec<Question> = self
            .catalog
            .all()
            .await?
            .into_iter()
            .filter(|q| q.matches_bank_filter(filter.category.as_deref(), filter.depth.as_deref()))
            .collect();
        matching.sort_by_key(|q| q.id);
        Ok(matching)
    }
}
