//! Read path: `--list`, `--host`, `get host`, `get group`.

use hostinv_core::select::{HostFilter, Request, select};
use hostinv_core::{DatabaseConfig, Inventory};

use crate::cli::{GetArgs, GetCommand};
use crate::commands::with_store;
use crate::error::CliError;
use crate::output;

/// Translate `get` arguments into a selector request.
pub fn request_for(args: GetArgs) -> Request {
    match args.command {
        GetCommand::Host(host) => Request::Hosts(HostFilter::from_name(&host.name)),
        GetCommand::Group(group) => match group.name {
            Some(name) if !group.list => Request::Group(name),
            _ => Request::GroupList,
        },
    }
}

pub fn handle(args: GetArgs, db: &DatabaseConfig) -> Result<(), CliError> {
    run(&request_for(args), db)
}

/// Read the full inventory, select from it, and print the result.
pub fn run(request: &Request, db: &DatabaseConfig) -> Result<(), CliError> {
    tracing::debug!(?request, "serving inventory request");
    let selection = with_store(db, |store| {
        let inventory = Inventory::load(store)?;
        select(inventory, request)
    })?;
    output::print_selection(&selection)
}
