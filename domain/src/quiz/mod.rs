//! Relationship quiz results.

pub mod entities;
