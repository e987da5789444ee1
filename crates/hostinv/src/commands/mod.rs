//! Command dispatch: bridges CLI args -> core operations -> output.

pub mod add;
pub mod config_cmd;
pub mod get;
pub mod init;

use tracing::warn;

use hostinv_core::{CoreError, DatabaseConfig, HostStore};

use crate::cli::Command;
use crate::error::CliError;

/// Dispatch a store-bound command to the appropriate handler.
pub fn dispatch(cmd: Command, db: &DatabaseConfig) -> Result<(), CliError> {
    match cmd {
        Command::Get(args) => get::handle(args, db),
        Command::Add(args) => add::handle(args, db),
        Command::Init => init::handle(db),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

/// Run `f` against a freshly opened store and close it afterwards, whether
/// or not `f` succeeded. A failure from `f` wins over a failure to close.
pub fn with_store<T>(
    db: &DatabaseConfig,
    f: impl FnOnce(&HostStore) -> Result<T, CoreError>,
) -> Result<T, CliError> {
    let store = HostStore::connect(db)?;
    let outcome = f(&store);
    let closed = store.close();

    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) | (Err(e), Ok(())) => Err(e.into()),
        (Err(e), Err(close_err)) => {
            warn!(error = %close_err, "failed to close inventory database");
            Err(e.into())
        }
    }
}
