//! Daily questions and the partners' answers to them.
//!
//! - [`entities::DailyQuestion`]: one prompt per couple per day
//! - [`entities::Response`]: one member's answer, private until both answered

pub mod entities;
