//! Config subcommand handlers.

use hostinv_config::ConfigError;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::active_config_path(global);
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let toml_str = toml::to_string_pretty(&cfg).map_err(ConfigError::from)?;
            output::print_output(toml_str.trim_end())?;
        }
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string())?;
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            config::save_config_to(&Config::default(), &path)?;
            eprintln!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}
