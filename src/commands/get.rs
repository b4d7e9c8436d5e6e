//! Implementation of `uci get`.

use crate::cli::AddressArgs;
use uci::error::{Result, UciError};
use uci::store::{Address, UciStore};

/// Print the values of an option (space separated) or the type of a section.
pub fn cmd_get(store: &mut UciStore, args: AddressArgs) -> Result<()> {
    println!("{}", lookup(store, &Address::parse(&args.address)?)?);
    Ok(())
}

fn lookup(store: &mut UciStore, address: &Address) -> Result<String> {
    let section = address.require_section()?;

    let Some(option) = address.option.as_deref() else {
        let config = store.load_config(&address.config)?;
        return config
            .try_get(section)?
            .map(|sec| sec.section_type.clone())
            .ok_or_else(|| UciError::NotFound(format!("section '{address}'")));
    };

    store
        .get(&address.config, section, option)?
        .map(|values| values.join(" "))
        .ok_or_else(|| UciError::NotFound(format!("option '{address}'")))
}
