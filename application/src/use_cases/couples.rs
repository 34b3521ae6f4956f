//! Couple pairing use cases
//!
//! - create a couple and get a connection code to share
//! - join a partner's couple with that code
//! - look up the caller's current couple
//! - set the couple's anniversary, used to pick anniversary questions

use super::shared::ErrorStatus;
use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::repositories::Repositories;
use crate::ports::store_error::{StoreError, UniqueKey};
use chrono::NaiveDate;
use couplequest_domain::{
    ConnectionCode, Couple, CoupleId, DEFAULT_PARTNER_NAME, DomainError, UserId,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Attempts at drawing an unused connection code before giving up.
const CODE_ATTEMPTS: usize = 16;

/// Errors from couple pairing
#[derive(Error, Debug)]
pub enum CoupleError {
    #[error("User is already in a couple")]
    AlreadyInCouple,

    #[error("Invalid connection code")]
    InvalidCode,

    #[error("Cannot connect to yourself")]
    SelfPairing,

    #[error("This couple is already complete")]
    CoupleComplete,

    #[error("No couple found")]
    NoCouple,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoupleError {
    pub fn status(&self) -> ErrorStatus {
        match self {
            CoupleError::InvalidCode | CoupleError::SelfPairing | CoupleError::NoCouple => {
                ErrorStatus::BadRequest
            }
            CoupleError::AlreadyInCouple | CoupleError::CoupleComplete => ErrorStatus::Conflict,
            CoupleError::Internal(_) => ErrorStatus::Internal,
        }
    }
}

impl From<StoreError> for CoupleError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(UniqueKey::CoupleMembership) => CoupleError::AlreadyInCouple,
            StoreError::Conflict(UniqueKey::PartnerSlot) => CoupleError::CoupleComplete,
            other => CoupleError::Internal(other.to_string()),
        }
    }
}

/// Result of creating a couple
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCouple {
    pub couple_id: CoupleId,
    pub connection_code: ConnectionCode,
}

/// The caller's couple as seen by the caller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupleView {
    #[serde(flatten)]
    pub couple: Couple,
    pub partner_id: Option<UserId>,
    pub partner_name: String,
    pub is_complete: bool,
}

/// Use cases for pairing two users.
pub struct CoupleUseCase {
    repos: Repositories,
    activity: Arc<dyn ActivityLogger>,
}

impl CoupleUseCase {
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

    /// Create a couple with the caller as its only member.
    pub async fn create(&self, caller: &UserId) -> Result<CreatedCouple, CoupleError> {
        if self.repos.couples.find_by_member(caller).await?.is_some() {
            return Err(CoupleError::AlreadyInCouple);
        }

        for _ in 0..CODE_ATTEMPTS {
            match self
                .repos
                .couples
                .create(caller, ConnectionCode::generate())
                .await
            {
                Ok(couple) => {
                    info!("User {} created couple {}", caller, couple.id);
                    self.activity.log(ActivityEvent::new(
                        "couple_created",
                        serde_json::json!({ "coupleId": couple.id, "userId": caller }),
                    ));
                    return Ok(CreatedCouple {
                        couple_id: couple.id,
                        connection_code: couple.connection_code,
                    });
                }
                Err(StoreError::Conflict(UniqueKey::ConnectionCode)) => {
                    warn!("Connection code collision, drawing another");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(CoupleError::Internal(
            "could not allocate a unique connection code".to_string(),
        ))
    }

    /// Join the couple identified by `code` as its partner.
    pub async fn join(&self, caller: &UserId, code: &str) -> Result<CoupleId, CoupleError> {
        let code = ConnectionCode::parse(code).map_err(|_| CoupleError::InvalidCode)?;
        let couple = self
            .repos
            .couples
            .find_by_code(&code)
            .await?
            .ok_or(CoupleError::InvalidCode)?;

        // Validate against the current record before touching the store.
        let mut candidate = couple.clone();
        candidate.join(caller.clone()).map_err(|e| match e {
            DomainError::SelfPairing => CoupleError::SelfPairing,
            _ => CoupleError::CoupleComplete,
        })?;

        let joined = self.repos.couples.set_partner(couple.id, caller).await?;
        info!("User {} joined couple {}", caller, joined.id);
        self.activity.log(ActivityEvent::new(
            "couple_joined",
            serde_json::json!({ "coupleId": joined.id, "userId": caller }),
        ));
        Ok(joined.id)
    }

    /// The caller's couple, if any.
    pub async fn current(&self, caller: &UserId) -> Result<Option<CoupleView>, CoupleError> {
        let Some(couple) = self.repos.couples.find_by_member(caller).await? else {
            return Ok(None);
        };

        let partner_id = couple
            .partner_of(caller)
            .map_err(|e| CoupleError::Internal(e.to_string()))?
            .cloned();

        let partner_name = match &partner_id {
            Some(id) => self
                .repos
                .profiles
                .find(id)
                .await?
                .map(|p| p.display_name_or_default().to_string()),
            None => None,
        }
        .unwrap_or_else(|| DEFAULT_PARTNER_NAME.to_string());

        Ok(Some(CoupleView {
            is_complete: couple.is_complete(),
            couple,
            partner_id,
            partner_name,
        }))
    }

    /// Set or clear the anniversary of the caller's couple.
    pub async fn set_anniversary(
        &self,
        caller: &UserId,
        anniversary: Option<NaiveDate>,
    ) -> Result<Couple, CoupleError> {
        let couple = self
            .repos
            .couples
            .find_by_member(caller)
            .await?
            .ok_or(CoupleError::NoCouple)?;
        let updated = self
            .repos
            .couples
            .set_anniversary(couple.id, anniversary)
            .await?;
        debug!("Couple {} anniversary set to {:?}", updated.id, anniversary);
        Ok(updated)
    }
}
