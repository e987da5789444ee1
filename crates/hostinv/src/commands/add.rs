//! Write path: `add`.

use hostinv_core::{DatabaseConfig, HostWriter, NewHost, SystemResolver};

use crate::cli::AddArgs;
use crate::commands::with_store;
use crate::error::CliError;

impl From<AddArgs> for NewHost {
    fn from(args: AddArgs) -> Self {
        NewHost {
            fqdn: args.name,
            ipaddr: args.ipaddr,
            groups: args.groups,
            features: args.features,
            label: args.label,
            disabled: args.disabled,
        }
    }
}

pub fn handle(args: AddArgs, db: &DatabaseConfig) -> Result<(), CliError> {
    let new_host = NewHost::from(args);
    with_store(db, |store| HostWriter::new(store, SystemResolver).add(new_host))?;
    Ok(())
}
