//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "couple-quest";
const PROJECT_FILES: [&str; 2] = ["couplequest.toml", ".couplequest.toml"];
const ENV_PREFIX: &str = "COUPLEQUEST_";

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `COUPLEQUEST_<SECTION>__<KEY>` (e.g. `COUPLEQUEST_SERVER__LISTEN`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./couplequest.toml` or `./.couplequest.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/couple-quest/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigLoadError> {
        Self::extract(
            Self::file_figment(Self::global_config_path(), Path::new("."), config_path)
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn file_figment(
        global: Option<PathBuf>,
        project_dir: &Path,
        explicit: Option<&PathBuf>,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_in(project_dir) {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    fn extract(figment: Figment) -> Result<FileConfig, ConfigLoadError> {
        figment
            .extract()
            .map_err(|e| ConfigLoadError::Invalid(Box::new(e)))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/couple-quest/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_in(Path::new("."))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./couplequest.toml or ./.couplequest.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.chat.history_limit, 100);
        assert!(config.storage.snapshot_path.is_none());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("couple-quest"));
    }

    #[test]
    fn test_file_priority() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        std::fs::write(
            &global,
            "[server]\nlisten = \"127.0.0.1:1000\"\n[chat]\nhistory_limit = 5\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(".couplequest.toml"),
            "[server]\nlisten = \"127.0.0.1:2000\"\n",
        )
        .unwrap();
        let explicit = dir.path().join("explicit.toml");
        std::fs::write(&explicit, "[logging]\ndir = \"/tmp/cq-logs\"\n").unwrap();

        let config = ConfigLoader::extract(ConfigLoader::file_figment(
            Some(global),
            dir.path(),
            Some(&explicit),
        ))
        .unwrap();

        assert_eq!(config.server.listen, "127.0.0.1:2000");
        assert_eq!(config.chat.history_limit, 5);
        assert_eq!(config.logging.dir, Some(PathBuf::from("/tmp/cq-logs")));
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("bad.toml");
        std::fs::write(&explicit, "[chat]\nhistory_limit = \"lots\"\n").unwrap();

        let result = ConfigLoader::extract(ConfigLoader::file_figment(
            None,
            dir.path(),
            Some(&explicit),
        ));
        assert!(matches!(result, Err(ConfigLoadError::Invalid(_))));
    }
}
