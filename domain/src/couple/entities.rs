//! Couple entity

use super::connection_code::ConnectionCode;
use crate::core::error::DomainError;
use crate::core::ids::{CoupleId, UserId};
use crate::progress::reward::Progress;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Two users sharing a streak, XP and level (Entity).
///
/// A couple starts with only its creator. The partner slot stays empty
/// until someone joins with the connection code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Couple {
    pub id: CoupleId,
    pub creator: UserId,
    pub partner: Option<UserId>,
    pub connection_code: ConnectionCode,
    pub anniversary: Option<NaiveDate>,
    #[serde(flatten)]
    pub progress: Progress,
    pub created_at: DateTime<Utc>,
}

impl Couple {
    /// A freshly created couple with default progress and no partner.
    pub fn new(
        id: CoupleId,
        creator: UserId,
        connection_code: ConnectionCode,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            creator,
            partner: None,
            connection_code,
            anniversary: None,
            progress: Progress::default(),
            created_at,
        }
    }

    pub fn is_member(&self, user: &UserId) -> bool {
        &self.creator == user || self.partner.as_ref() == Some(user)
    }

    /// Both slots are filled.
    pub fn is_complete(&self) -> bool {
        self.partner.is_some()
    }

    /// The other member of the couple, from `user`'s point of view.
    ///
    /// Errors when `user` is not a member; `Ok(None)` when the creator asks
    /// before anyone has joined.
    pub fn partner_of(&self, user: &UserId) -> Result<Option<&UserId>, DomainError> {
        if &self.creator == user {
            Ok(self.partner.as_ref())
        } else if self.partner.as_ref() == Some(user) {
            Ok(Some(&self.creator))
        } else {
            Err(DomainError::NotAMember(user.to_string()))
        }
    }

    /// Fill the partner slot.
    pub fn join(&mut self, user: UserId) -> Result<(), DomainError> {
        if self.creator == user {
            return Err(DomainError::SelfPairing);
        }
        if self.partner.is_some() {
            return Err(DomainError::CoupleComplete);
        }
        self.partner = Some(user);
        Ok(())
    }

    pub fn members(&self) -> impl Iterator<Item = &UserId> {
        std::iter::once(&self.creator).chain(self.partner.iter())
    }
}
