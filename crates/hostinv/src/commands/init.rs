//! `init`: create the database file and host table.

use hostinv_core::{DatabaseConfig, HostStore};

use crate::error::CliError;

pub fn handle(db: &DatabaseConfig) -> Result<(), CliError> {
    HostStore::create(db)?.close()?;
    eprintln!(
        "Inventory ready at {} (table {})",
        db.path.display(),
        db.table
    );
    Ok(())
}
