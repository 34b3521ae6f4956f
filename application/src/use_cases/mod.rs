//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod browse_questions;
pub mod chat;
pub mod couples;
pub mod leaderboard;
pub mod profile;
pub mod quizzes;
pub mod shared;
pub mod submit_answer;
pub mod today_question;

#[cfg(test)]
pub(crate) mod test_support;
