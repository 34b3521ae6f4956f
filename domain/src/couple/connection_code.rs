//! Connection code value object

use crate::core::error::DomainError;
use rand::Rng;
use serde::{Deserialize, Serialize};

const MIN_CODE: u32 = 100_000;
const MAX_CODE: u32 = 999_999;

/// A 6-digit code shared out of band so a partner can join a couple.
///
/// Immutable once assigned; the store keeps codes unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConnectionCode(String);

impl ConnectionCode {
    /// Generate a random code in `100000..=999999`.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(MIN_CODE..=MAX_CODE).to_string())
    }

    /// Parse a code typed by a user. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let valid = trimmed.len() == 6
            && trimmed.bytes().all(|b| b.is_ascii_digit())
            && !trimmed.starts_with('0');
        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(DomainError::InvalidConnectionCode(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ConnectionCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ConnectionCode> for String {
    fn from(code: ConnectionCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for ConnectionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
