//! Couple chat.
//!
//! - [`entities::MessageContent`]: validated message text
//! - [`entities::Message`]: a stored chat message

pub mod entities;
