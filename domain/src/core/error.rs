//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid connection code: {0}")]
    InvalidConnectionCode(String),

    #[error("Message content required")]
    EmptyMessage,

    #[error("Quiz type is required")]
    MissingQuizType,

    #[error("Quiz results are required")]
    MissingQuizResults,

    #[error("User {0} is not a member of this couple")]
    NotAMember(String),

    #[error("Cannot connect to yourself")]
    SelfPairing,

    #[error("This couple is already complete")]
    CoupleComplete,
}

impl DomainError {
    /// Check if this error was caused by malformed caller input
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidConnectionCode(_)
                | DomainError::EmptyMessage
                | DomainError::MissingQuizType
                | DomainError::MissingQuizResults
        )
    }
}
