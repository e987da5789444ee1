// ── Core error types ──
//
// Everything the read and write paths can fail with. Storage faults from
// rusqlite are folded into `Store` / `Conflict` here so consumers never
// match on driver error codes.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Malformed stored data ────────────────────────────────────────
    #[error("Invalid IP address '{value}' for host {fqdn}")]
    InvalidAddress { fqdn: String, value: String },

    #[error("Required field '{field}' is missing (row id {row})")]
    MissingField { field: &'static str, row: String },

    #[error("Host {fqdn} appears more than once in the inventory")]
    DuplicateHost { fqdn: String },

    #[error("Host {fqdn} is stored with reserved group name '{name}'")]
    ReservedGroupInStore { fqdn: String, name: String },

    #[error("Group name '{name}' is reserved")]
    ReservedGroupName { name: String },

    // ── Lookups ──────────────────────────────────────────────────────
    #[error("No group matching {name}")]
    GroupNotFound { name: String },

    // ── Write path ───────────────────────────────────────────────────
    #[error("Could not resolve {fqdn}: {reason}")]
    ResolutionFailed { fqdn: String, reason: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Storage ──────────────────────────────────────────────────────
    #[error("Cannot open inventory database at {path}: {reason}")]
    ConnectionFailed { path: String, reason: String },

    #[error("Host {fqdn} already exists")]
    Conflict { fqdn: String },

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Store {
            message: err.to_string(),
        }
    }
}

impl CoreError {
    /// `true` for conditions that are an expected outcome rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::GroupNotFound { .. })
    }
}
