//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: typed identifiers for users and stored records
//! - [`error::DomainError`]: domain-level errors
//! - [`string::preview`]: short previews of free text for logs

pub mod error;
pub mod ids;
pub mod string;
