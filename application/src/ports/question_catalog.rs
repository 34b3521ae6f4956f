//! Question catalog port

use super::store_error::StoreError;
use async_trait::async_trait;
use couplequest_domain::{Question, QuestionId};

/// Read access to the question catalog.
#[async_trait]
pub trait QuestionCatalog: Send + Sync {
    async fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, StoreError>;

    /// Every question, ordered by id.
    async fn all(&self) -> Result<Vec<Question>, StoreError>;
}
