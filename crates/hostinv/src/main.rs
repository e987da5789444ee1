mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing_subscriber::EnvFilter;

use hostinv_core::Request;

use crate::cli::{Cli, Command};
use crate::error::CliError;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout is reserved for inventory output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        global,
        list,
        host,
        command,
    } = cli;

    match command {
        // Config commands don't need the store
        Some(Command::Config(args)) => commands::config_cmd::handle(args, &global),

        // Shell completions generation
        Some(Command::Completions(args)) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "hostinv", &mut std::io::stdout());
            Ok(())
        }

        // Everything else reads or writes the inventory
        cmd => {
            let cfg = config::load(&global)?;
            let db = config::database_config(&global, &cfg);
            tracing::debug!(path = %db.path.display(), table = %db.table, "using inventory database");

            match (cmd, list, host) {
                (Some(cmd), false, None) => commands::dispatch(cmd, &db),
                (Some(_), ..) => {
                    usage_error("--list and --host cannot be combined with a subcommand")
                }
                (None, true, _) => commands::get::run(&Request::Inventory, &db),
                (None, false, Some(name)) => commands::get::run(&Request::Host(name), &db),
                (None, false, None) => {
                    usage_error("requires one of {get,add,init,config}, --list, or --host")
                }
            }
        }
    }
}

/// Report a usage error the way clap does (exit code 2).
fn usage_error(message: &str) -> ! {
    Cli::command()
        .error(ErrorKind::ArgumentConflict, message)
        .exit()
}
