//! User profiles: display names and the dates used for occasions.

pub mod entities;
