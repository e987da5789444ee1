// ── Store connection configuration ──
//
// Consumers (CLI, tests) build this from their own settings layer; the core
// never reads config files or environment variables itself.

use std::path::PathBuf;
use std::time::Duration;

/// Table holding one row per managed host.
pub const DEFAULT_TABLE: &str = "server_inventory";

/// How long to wait on a locked database before giving up.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the inventory lives and how to reach it.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
    /// Host table name; must be a plain SQL identifier.
    pub table: String,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: DEFAULT_TABLE.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}
