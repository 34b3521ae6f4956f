//! Errors shared by all persistence ports

use thiserror::Error;

/// Uniqueness rules the store enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    /// Connection codes are unique across couples.
    ConnectionCode,
    /// A user belongs to at most one couple.
    CoupleMembership,
    /// A couple's partner slot can only be filled once.
    PartnerSlot,
    /// At most one response per user per daily question.
    ResponsePerUser,
}

impl std::fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UniqueKey::ConnectionCode => "connection code",
            UniqueKey::CoupleMembership => "couple membership",
            UniqueKey::PartnerSlot => "partner slot",
            UniqueKey::ResponsePerUser => "response per user",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in store adapters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Unique constraint violated: {0}")]
    Conflict(UniqueKey),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Check if this error is a violation of `key`
    pub fn is_conflict_on(&self, key: UniqueKey) -> bool {
        matches!(self, StoreError::Conflict(k) if *k == key)
    }
}
