//! Implementation of `uci delete`.

use crate::cli::AddressArgs;
use uci::error::{Result, UciError};
use uci::store::{Address, UciStore};

/// Delete the addressed option, or the whole section when no option is given.
pub fn cmd_delete(store: &mut UciStore, args: AddressArgs) -> Result<()> {
    apply_delete(store, &Address::parse(&args.address)?)?;
    store.commit()
}

fn apply_delete(store: &mut UciStore, address: &Address) -> Result<()> {
    let section = address.require_section()?;

    let removed = match address.option.as_deref() {
        Some(option) => store.del_option(&address.config, section, option)?,
        None => store.del_section(&address.config, section)?,
    };

    if !removed {
        return Err(UciError::NotFound(format!("'{address}'")));
    }
    Ok(())
}
