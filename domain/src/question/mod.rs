//! Question catalog.
//!
//! - [`entities::Question`]: a prompt, with its module, category and depth
//! - [`occasion::Occasion`]: calendar occasions that select themed prompts

pub mod entities;
pub mod occasion;
