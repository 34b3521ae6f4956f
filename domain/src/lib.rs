//! Domain layer for couple-quest
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Couples
//!
//! Two users pair up through a 6-digit connection code. The couple owns a
//! shared [`Progress`]: a streak, cumulative XP and a level.
//!
//! ## Daily question
//!
//! Every day each couple gets one [`DailyQuestion`]. Each partner answers
//! privately; once both have answered the answers are revealed and the
//! couple is rewarded through [`Progress::reward`].

pub mod chat;
pub mod core;
pub mod couple;
pub mod daily;
pub mod profile;
pub mod progress;
pub mod question;
pub mod quiz;

// Re-export commonly used types
pub use chat::entities::{Message, MessageContent};
pub use core::{
    error::DomainError,
    ids::{CoupleId, DailyQuestionId, MessageId, QuestionId, QuizId, ResponseId, UserId},
    string::preview,
};
pub use couple::{connection_code::ConnectionCode, entities::Couple};
pub use daily::entities::{DailyQuestion, NewResponse, Response};
pub use profile::entities::{DEFAULT_PARTNER_NAME, Profile, ProfileUpdate};
pub use progress::reward::{DAILY_QUESTION_XP, Progress, Reward, XP_PER_LEVEL};
pub use question::{
    entities::{Question, QuestionModule},
    occasion::{Occasion, OccasionContext, current_occasions, easter_sunday},
};
pub use quiz::entities::{QuizResult, QuizSubmission};
