//! Couples: two paired users sharing progression.
//!
//! - [`entities::Couple`]: the pairing record
//! - [`connection_code::ConnectionCode`]: the 6-digit code a partner uses to join

pub mod connection_code;
pub mod entities;
