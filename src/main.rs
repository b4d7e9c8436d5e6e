//! `uci`: read and edit UCI config files from the command line.
//!
//! Parses arguments, dispatches to the command handlers, and maps errors to
//! exit codes.

mod cli;
mod commands;

use cli::Cli;
use std::process::ExitCode;
use uci::exit_codes;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    commands::init_tracing(&cli);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
