//! CLI argument parsing for `uci`.
//!
//! Uses clap derive macros for declarative argument definitions. This module
//! defines the command structure; implementations are in `commands`.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uci::store::{CONFIG_DIR_ENV, DEFAULT_CONFIG_DIR};

/// Read and edit OpenWrt UCI configuration files.
///
/// Addresses take the form `config[.section[.option]]`, where `section` is a
/// section name or a positional selector like `@interface[0]` or `@rule[-1]`.
#[derive(Parser, Debug)]
#[command(name = "uci")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the config files.
    #[arg(
        short = 'c',
        long,
        global = true,
        env = CONFIG_DIR_ENV,
        default_value = DEFAULT_CONFIG_DIR
    )]
    pub config_dir: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Available commands for uci.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show values as `config.section.option='value'` lines.
    ///
    /// Without an address every config in the directory is shown.
    Show(ShowArgs),

    /// Print a config in UCI file format.
    Export(ConfigArgs),

    /// Print a config as JSON.
    Dump(ConfigArgs),

    /// Print the value of an option, or the type of a section.
    Get(AddressArgs),

    /// Set an option: `config.section.option=value`.
    Set(AddressArgs),

    /// Append a value to a list option: `config.section.option=value`.
    AddList(AddressArgs),

    /// Delete a section or an option.
    Delete(AddressArgs),

    /// Add a section and print the name it can be addressed by.
    Add(AddArgs),
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Config, section or option to show.
    pub address: Option<String>,
}

/// Arguments for commands operating on a whole config.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config name (file name inside the config directory).
    pub config: String,
}

/// Arguments for commands taking a single address.
#[derive(Parser, Debug)]
pub struct AddressArgs {
    /// `config.section[.option][=value]`
    pub address: String,
}

/// Arguments for the `add` command.
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Config name; created when missing.
    pub config: String,

    /// Section type.
    pub section_type: String,

    /// Give the section a name instead of leaving it unnamed.
    #[arg(short, long)]
    pub name: Option<String>,
}
