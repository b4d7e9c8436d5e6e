//! Implementation of `uci add`.

use crate::cli::AddArgs;
use uci::error::Result;
use uci::store::UciStore;

/// Add a section and print the name it can be addressed by.
pub fn cmd_add(store: &mut UciStore, args: AddArgs) -> Result<()> {
    let name = store.add_section(&args.config, &args.section_type, args.name.as_deref())?;
    store.commit()?;
    println!("{}", name);
    Ok(())
}
