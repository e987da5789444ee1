//! Shared configuration for hostinv.
//!
//! TOML file + `HOSTINV_` environment layering, and translation to
//! `hostinv_core::DatabaseConfig`. The CLI adds flag overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hostinv_core::DatabaseConfig;
use hostinv_core::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_TABLE};

/// Prefix for environment overrides; nesting uses `__`
/// (`HOSTINV_DATABASE__TABLE`).
pub const ENV_PREFIX: &str = "HOSTINV_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseSettings {
    /// SQLite file; defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default = "default_table")]
    pub table: String,

    /// Seconds to wait on a locked database.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: None,
            table: default_table(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

fn default_table() -> String {
    DEFAULT_TABLE.into()
}
fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT.as_secs()
}

impl Config {
    /// Build the store configuration, letting `path_override` (a CLI flag)
    /// win over the configured path.
    pub fn database_config(&self, path_override: Option<&Path>) -> DatabaseConfig {
        let path = path_override
            .map(Path::to_path_buf)
            .or_else(|| self.database.path.clone())
            .unwrap_or_else(default_database_path);
        DatabaseConfig {
            path,
            table: self.database.table.clone(),
            connect_timeout: Duration::from_secs(self.database.connect_timeout),
        }
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "hostinv")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hostinv");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Where the inventory database lives when nothing else says.
pub fn default_database_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("inventory.db"),
        |dirs| dirs.data_dir().join("inventory.db"),
    )
}

// ── Loading / saving ────────────────────────────────────────────────

fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(
            Env::prefixed(ENV_PREFIX)
                .split("__")
                // flat CLI variables, not config keys
                .ignore(&["db", "config"]),
        )
}

/// Load config from `path` (a missing file is fine) plus environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(figment(path).extract()?)
}

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
