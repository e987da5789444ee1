//! Clap derive structures for the `hostinv` CLI.
//!
//! The top-level `--list` / `--host` flags are the dynamic inventory
//! protocol Ansible speaks; everything else is a subcommand.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hostinv -- Ansible dynamic inventory backed by a host table
#[derive(Debug, Parser)]
#[command(
    name = "hostinv",
    version,
    about = "Retrieve and insert dynamic inventory hosts",
    long_about = "Builds Ansible dynamic inventory JSON from a SQL host table,\n\
        queries hostvars for subsets of hosts, lists groups and their\n\
        members, and adds new hosts.\n\n\
        Usage with Ansible:\n    ansible-playbook -i hostinv playbook.yml",
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    /// Output the entire inventory
    #[arg(long, short = 'l')]
    pub list: bool,

    /// Output hostvars for exactly one host
    #[arg(long, value_name = "NAME", conflicts_with = "list")]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Inventory database file (overrides config)
    #[arg(long, env = "HOSTINV_DB", global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Configuration file
    #[arg(long, env = "HOSTINV_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Retrieve hosts or groups
    Get(GetArgs),

    /// Write a new host to the inventory
    Add(AddArgs),

    /// Create the inventory database and host table
    Init,

    /// Manage hostinv configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Get ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GetArgs {
    #[command(subcommand)]
    pub command: GetCommand,
}

#[derive(Debug, Subcommand)]
pub enum GetCommand {
    /// Retrieve hosts by hostname
    Host(GetHostArgs),

    /// List group names or retrieve the hosts in a group
    Group(GetGroupArgs),
}

#[derive(Debug, Args)]
pub struct GetHostArgs {
    /// Return hosts whose name starts with NAME; `all` returns every host
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct GetGroupArgs {
    /// Group whose members to list (exact match)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// List all group names
    #[arg(long, short = 'l')]
    pub list: bool,
}

// ── Add ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Fully-qualified domain name of the host
    #[arg(value_name = "NAME")]
    pub name: String,

    /// IP address of the host; resolved from NAME when omitted
    #[arg(long, short = 'i')]
    pub ipaddr: Option<String>,

    /// Comma-delimited groups, e.g. `-g web,prod`
    #[arg(long, short = 'g')]
    pub groups: Option<String>,

    /// Comma-delimited feature flags, e.g. `-f tls,backup`
    #[arg(long, short = 'f')]
    pub features: Option<String>,

    /// Cosmetic label describing the host
    #[arg(long, short = 'l')]
    pub label: Option<String>,

    /// Add the host disabled; new hosts are enabled by default
    #[arg(long, short = 'd')]
    pub disabled: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
