//! Configuration file loading for couple-quest
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COUPLEQUEST_` environment variables (`__` separates section and key)
//! 2. `--config <path>` specified file
//! 3. Project root: `./couplequest.toml` or `./.couplequest.toml`
//! 4. Global: `$XDG_CONFIG_HOME/couple-quest/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, DEFAULT_LISTEN, FileChatConfig, FileConfig, FileLoggingConfig,
    FileServerConfig, FileStorageConfig, Severity,
};
pub use loader::{ConfigLoadError, ConfigLoader};
