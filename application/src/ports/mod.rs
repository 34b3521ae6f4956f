//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! The persistence ports together describe the relational store the
//! use cases need: point lookups, lookups by owner, and the atomic reveal.

pub mod activity_logger;
pub mod couple_repository;
pub mod daily_question_repository;
pub mod message_repository;
pub mod profile_repository;
pub mod question_catalog;
pub mod quiz_repository;
pub mod repositories;
pub mod response_repository;
pub mod store_error;
pub mod store_flush;
