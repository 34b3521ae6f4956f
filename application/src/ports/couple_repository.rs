//! Couple persistence port

use super::store_error::StoreError;
use async_trait::async_trait;
use chrono::NaiveDate;
use couplequest_domain::{ConnectionCode, Couple, CoupleId, UserId};

/// Storage for [`Couple`] records.
///
/// Implementations must keep connection codes unique and must never let a
/// user belong to more than one couple.
#[async_trait]
pub trait CoupleRepository: Send + Sync {
    async fn find_by_id(&self, id: CoupleId) -> Result<Option<Couple>, StoreError>;

    /// The couple `user` belongs to, as creator or partner.
    async fn find_by_member(&self, user: &UserId) -> Result<Option<Couple>, StoreError>;

    async fn find_by_code(&self, code: &ConnectionCode) -> Result<Option<Couple>, StoreError>;

    /// Insert a new couple owned by `creator`.
    ///
    /// # Errors
    ///
    /// - `Conflict(ConnectionCode)` when `code` is taken
    /// - `Conflict(CoupleMembership)` when `creator` already has a couple
    async fn create(&self, creator: &UserId, code: ConnectionCode) -> Result<Couple, StoreError>;

    /// Fill the partner slot of `couple` with `user`.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the couple is gone
    /// - `Conflict(PartnerSlot)` when the slot is already filled
    /// - `Conflict(CoupleMembership)` when `user` already has a couple
    async fn set_partner(&self, couple: CoupleId, user: &UserId) -> Result<Couple, StoreError>;

    /// Set or clear the anniversary of `couple`.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the couple is gone
    async fn set_anniversary(
        &self,
        couple: CoupleId,
        anniversary: Option<NaiveDate>,
    ) -> Result<Couple, StoreError>;

    /// Every couple, ordered by id.
    async fn list_all(&self) -> Result<Vec<Couple>, StoreError>;
}
