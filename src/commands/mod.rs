//! Command implementations for `uci`.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus logging setup. Mutating commands commit their
//! changes before returning.

mod add;
mod delete;
mod export;
mod get;
mod set;
mod show;

use crate::cli::{Cli, Command, LogFormat};
use uci::error::Result;
use uci::store::UciStore;

/// Dispatch a command to its implementation.
pub(crate) fn dispatch(cli: Cli) -> Result<()> {
    let mut store = UciStore::new(cli.config_dir);
    tracing::debug!(dir = %store.dir().display(), "using config directory");

    match cli.command {
        Command::Show(args) => show::cmd_show(&mut store, args),
        Command::Export(args) => export::cmd_export(&mut store, args),
        Command::Dump(args) => export::cmd_dump(&mut store, args),
        Command::Get(args) => get::cmd_get(&mut store, args),
        Command::Set(args) => set::cmd_set(&mut store, args),
        Command::AddList(args) => set::cmd_add_list(&mut store, args),
        Command::Delete(args) => delete::cmd_delete(&mut store, args),
        Command::Add(args) => add::cmd_add(&mut store, args),
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `-v`.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "uci=warn",
        1 => "uci=debug",
        _ => "uci=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
