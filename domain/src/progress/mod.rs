//! Couple progression.
//!
//! - [`reward::Progress`]: streak, cumulative XP and level of a couple
//! - [`reward::Reward`]: the outcome of applying a completion award

pub mod reward;
