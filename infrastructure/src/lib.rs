//! Infrastructure layer for couple-quest
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoadError, ConfigLoader, FileChatConfig, FileConfig, FileLoggingConfig,
    FileServerConfig, FileStorageConfig, Severity,
};
pub use logging::JsonlActivityLogger;
pub use store::{
    InMemoryStore, SeedError, SeedQuestion, Snapshot, SnapshotError, SnapshotFile,
    builtin_questions, load_seed_file,
};
