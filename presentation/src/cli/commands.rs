//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for couple-quest
#[derive(Parser, Debug)]
#[command(name = "couplequest")]
#[command(author, version, about = "Daily questions, streaks and XP for couples")]
#[command(long_about = r#"
couple-quest serves the couple-quest API as newline-delimited JSON-RPC 2.0
over TCP. It is meant to sit behind an authentication gateway that puts the
caller's identity in `params.userId` of every request.

Configuration files are loaded from (in priority order):
1. COUPLEQUEST_* environment variables (e.g. COUPLEQUEST_SERVER__LISTEN)
2. --config <path>         Explicit config file
3. ./couplequest.toml      Project-level config
4. ~/.config/couple-quest/config.toml   Global config

Example:
  couplequest --listen 0.0.0.0:7878 --snapshot /var/lib/couple-quest/store.json
  echo '{"jsonrpc":"2.0","id":1,"method":"couples.current","params":{"userId":"alice"}}' | nc localhost 7878
"#)]
pub struct Cli {
    /// Address to listen on (overrides `server.listen`)
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Snapshot file to load from and flush to (overrides `storage.snapshot_path`)
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
