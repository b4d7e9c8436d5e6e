//! Implementation of `uci set` and `uci add-list`.

use crate::cli::AddressArgs;
use uci::error::Result;
use uci::store::{Address, UciStore};
use uci::tree::OptionType;

/// `config.section.option=value` sets an option; `config.section=type`
/// creates a named section of that type.
pub fn cmd_set(store: &mut UciStore, args: AddressArgs) -> Result<()> {
    apply_set(store, &Address::parse(&args.address)?)?;
    store.commit()
}

/// `config.section.option=value` appends to a list.
pub fn cmd_add_list(store: &mut UciStore, args: AddressArgs) -> Result<()> {
    apply_add_list(store, &Address::parse(&args.address)?)?;
    store.commit()
}

fn apply_set(store: &mut UciStore, address: &Address) -> Result<()> {
    let section = address.require_section()?;
    let value = address.require_value()?;

    match address.option.as_deref() {
        Some(option) => store.set(&address.config, section, option, OptionType::Option, [value]),
        None => store
            .add_section(&address.config, value, Some(section))
            .map(|_| ()),
    }
}

fn apply_add_list(store: &mut UciStore, address: &Address) -> Result<()> {
    store.add_list(
        &address.config,
        address.require_section()?,
        address.require_option()?,
        address.require_value()?,
    )
}
