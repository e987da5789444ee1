//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use hostinv_config::ConfigError;
use hostinv_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const RESOLUTION: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Store ────────────────────────────────────────────────────────

    #[error("Could not open inventory database at {path}")]
    #[diagnostic(
        code(hostinv::connection_failed),
        help(
            "{reason}\n\
             Create the database with: hostinv init\n\
             Or point at another file with --database / HOSTINV_DB."
        )
    )]
    ConnectionFailed { path: String, reason: String },

    #[error("Inventory store error: {message}")]
    #[diagnostic(code(hostinv::store))]
    Store { message: String },

    // ── Stored data ──────────────────────────────────────────────────

    #[error("Invalid IP address '{value}' for host {fqdn}")]
    #[diagnostic(
        code(hostinv::invalid_address),
        help("Addresses must be IPv4 or IPv6 literals.")
    )]
    InvalidAddress { fqdn: String, value: String },

    #[error("Inventory data is malformed: {message}")]
    #[diagnostic(
        code(hostinv::corrupt_data),
        help("Fix the offending row in the host table; no inventory is emitted until it is valid.")
    )]
    CorruptData { message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("No {resource_type} matching {identifier}")]
    #[diagnostic(
        code(hostinv::not_found),
        help("Run: hostinv {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{resource_type} '{identifier}' already exists")]
    #[diagnostic(code(hostinv::conflict))]
    Conflict {
        resource_type: String,
        identifier: String,
    },

    // ── Name resolution ──────────────────────────────────────────────

    #[error("Could not resolve {fqdn}: {reason}")]
    #[diagnostic(
        code(hostinv::resolution_failed),
        help("Pass the address explicitly with --ipaddr (-i).")
    )]
    ResolutionFailed { fqdn: String, reason: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hostinv::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(hostinv::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(hostinv::config))]
    Config(#[from] ConfigError),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::ResolutionFailed { .. } => exit_code::RESOLUTION,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { path, reason } => {
                CliError::ConnectionFailed { path, reason }
            }

            CoreError::InvalidAddress { fqdn, value } => CliError::InvalidAddress { fqdn, value },

            err @ (CoreError::MissingField { .. }
            | CoreError::DuplicateHost { .. }
            | CoreError::ReservedGroupInStore { .. }) => CliError::CorruptData {
                message: err.to_string(),
            },

            CoreError::ReservedGroupName { name } => CliError::Validation {
                field: "groups".into(),
                reason: format!("'{name}' is reserved for inventory metadata"),
            },

            CoreError::GroupNotFound { name } => CliError::NotFound {
                resource_type: "group".into(),
                identifier: name,
                list_command: "get group --list".into(),
            },

            CoreError::Conflict { fqdn } => CliError::Conflict {
                resource_type: "Host".into(),
                identifier: fqdn,
            },

            CoreError::ResolutionFailed { fqdn, reason } => {
                CliError::ResolutionFailed { fqdn, reason }
            }

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Store { message } => CliError::Store { message },

            CoreError::Serialization(e) => CliError::Store {
                message: format!("failed to serialize output: {e}"),
            },
        }
    }
}
