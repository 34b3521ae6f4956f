//! Profile persistence port

use super::store_error::StoreError;
use async_trait::async_trait;
use couplequest_domain::{Profile, ProfileUpdate, UserId};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, user: &UserId) -> Result<Option<Profile>, StoreError>;

    /// Apply `update`, creating an empty profile first if needed.
    async fn upsert(&self, user: &UserId, update: ProfileUpdate) -> Result<Profile, StoreError>;
}
