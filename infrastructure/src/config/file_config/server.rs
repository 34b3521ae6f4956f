//! Server configuration from TOML (`[server]` section)

use super::issue::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:7878";

/// Raw server configuration from TOML
///
/// # Example
///
/// ```toml
/// [server]
/// listen = "0.0.0.0:7878"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Address the JSON-RPC listener binds to
    pub listen: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
        }
    }
}

impl FileServerConfig {
    /// Parse the listen address, reporting an error when it is malformed.
    pub fn parse_listen(&self) -> (Option<SocketAddr>, Vec<ConfigIssue>) {
        match self.listen.trim().parse() {
            Ok(addr) => (Some(addr), vec![]),
            Err(_) => (
                None,
                vec![ConfigIssue::error(
                    "server.listen",
                    format!(
                        "server.listen: '{}' is not a socket address (expected host:port)",
                        self.listen
                    ),
                )],
            ),
        }
    }
}
