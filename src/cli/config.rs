//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::engine::{DEFAULT_NAMESPACE, QueryStrategy};

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "KEEP_CONFIG";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Store location: SQLite file path or redis:// URL
    pub store: Option<String>,

    /// Key namespace inside the store
    pub namespace: Option<String>,

    /// Editor command for editing notes
    pub editor: Option<String>,

    /// Default strategy for multi-tag searches
    pub strategy: Option<QueryStrategy>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            log::debug!("no config file at {}", config_path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Returns the path to the config file.
    ///
    /// `$KEEP_CONFIG` if set, otherwise `~/.config/keep/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keep")
            .join("config.toml")
    }

    /// Default SQLite file: `<data_dir>/keep/notes.db`.
    pub fn default_store_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keep")
            .join("notes.db")
    }

    /// Resolve the store location, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--store` argument (or `$KEEP_STORE`)
    /// 2. Config file `store` setting
    /// 3. SQLite file in the user data directory
    pub fn store_location(&self, cli_store: Option<&str>) -> String {
        cli_store
            .map(str::to_string)
            .or_else(|| self.store.clone())
            .unwrap_or_else(|| Self::default_store_path().display().to_string())
    }

    /// Resolve the key namespace: CLI, then config, then `keep`.
    pub fn namespace(&self, cli_namespace: Option<&str>) -> String {
        cli_namespace
            .map(str::to_string)
            .or_else(|| self.namespace.clone())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
    }

    /// Resolve the search strategy: CLI, then config, then intersection.
    pub fn strategy(&self, cli_strategy: Option<QueryStrategy>) -> QueryStrategy {
        cli_strategy.or(self.strategy).unwrap_or_default()
    }

    /// Resolve the editor command.
    ///
    /// Precedence order:
    /// 1. Config file `editor` setting
    /// 2. $EDITOR environment variable
    /// 3. $VISUAL environment variable
    /// 4. "vi" as fallback
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| "vi".to_string())
    }
}
