//! CLI configuration -- thin wrapper around `hostinv_config`.
//!
//! Adds resolution that respects `GlobalOpts` overrides (--config, --database).

use std::path::PathBuf;

use hostinv_core::DatabaseConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use hostinv_config::{Config, config_path, load_config_from, save_config_to};

/// Config file in effect: `--config` / `HOSTINV_CONFIG`, else the platform path.
pub fn active_config_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Load the layered config for this invocation.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = active_config_path(global);
    tracing::debug!(path = %path.display(), "loading configuration");
    Ok(load_config_from(&path)?)
}

/// Store settings with the `--database` flag applied.
pub fn database_config(global: &GlobalOpts, cfg: &Config) -> DatabaseConfig {
    cfg.database_config(global.database.as_deref())
}
