//! Profile updates

use super::shared::ErrorStatus;
use crate::ports::profile_repository::ProfileRepository;
use crate::ports::store_error::StoreError;
use couplequest_domain::{Profile, ProfileUpdate, UserId};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Internal error: {0}")]
    Internal(#[from] StoreError),
}

impl ProfileError {
    pub fn status(&self) -> ErrorStatus {
        ErrorStatus::Internal
    }
}

pub struct UpdateProfileUseCase {
    profiles: Arc<dyn ProfileRepository>,
}

impl UpdateProfileUseCase {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn execute(
        &self,
        caller: &UserId,
        update: ProfileUpdate,
    ) -> Result<Profile, ProfileError> {
        Ok(self.profiles.upsert(caller, update).await?)
    }
}
