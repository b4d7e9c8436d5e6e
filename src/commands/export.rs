//! Implementation of `uci export` and `uci dump`.

use crate::cli::ConfigArgs;
use std::io;
use uci::error::{Result, UciError};
use uci::store::UciStore;

/// Print a config in UCI file format.
pub fn cmd_export(store: &mut UciStore, args: ConfigArgs) -> Result<()> {
    let config = store.load_config(&args.config)?;
    config
        .write_to(io::stdout().lock())
        .map_err(|e| UciError::io("failed to write to stdout", e))?;
    Ok(())
}

/// Print a config as pretty JSON.
pub fn cmd_dump(store: &mut UciStore, args: ConfigArgs) -> Result<()> {
    let config = store.load_config(&args.config)?;
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| UciError::UserError(format!("failed to serialize config to JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}
