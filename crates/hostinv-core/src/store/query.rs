//! SQL text for the host table.
//!
//! Identifiers are always double-quoted: `groups` is a keyword in current
//! SQLite and the table name comes from configuration.

use crate::error::CoreError;

/// Every column of the host table, in select order.
pub const HOST_COLUMNS: [&str; 8] = [
    "id", "fqdn", "enabled", "features", "ipaddr", "label", "groups", "upd",
];

/// Reject anything that is not a bare `[A-Za-z_][A-Za-z0-9_]*` identifier.
pub fn validate_table_name(name: &str) -> Result<(), CoreError> {
    let mut chars = name.chars();
    let valid_head = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_head && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(CoreError::Validation {
            message: format!("invalid table name '{name}'"),
        })
    }
}

fn column_list(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Full read of the host table.
pub fn select_hosts(table: &str) -> String {
    format!(
        "SELECT {} FROM \"{table}\" ORDER BY \"id\"",
        column_list(&HOST_COLUMNS)
    )
}

/// Single-row insert naming only `columns`; omitted columns take their defaults.
pub fn insert_host(table: &str, columns: &[&str]) -> String {
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO \"{table}\" ({}) VALUES ({placeholders})",
        column_list(columns)
    )
}

/// Existence check used before the first read.
pub const TABLE_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1";
