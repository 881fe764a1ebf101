//! Database repositories
//!
//! Provides data access layer for wellness documents.

pub mod wellness;

pub use wellness::{InMemoryWellnessStore, PgWellnessStore, WellnessStore};
