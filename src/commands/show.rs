//! Implementation of `uci show`.
//!
//! Prints `config.section=type` for each section followed by
//! `config.section.option='value'` lines. Unnamed sections are shown with
//! their positional `@type[index]` name.

use crate::cli::ShowArgs;
use uci::error::{Result, UciError};
use uci::store::{Address, UciStore};
use uci::tree::{Config, Section, UciOption};

/// Execute the `uci show` command.
pub fn cmd_show(store: &mut UciStore, args: ShowArgs) -> Result<()> {
    let output = match args.address.as_deref() {
        Some(address) => render_address(store, &Address::parse(address)?)?,
        None => {
            let mut output = String::new();
            for name in store.config_names()? {
                output.push_str(&render_config(store.load_config(&name)?)?);
            }
            output
        }
    };
    print!("{}", output);
    Ok(())
}

fn render_address(store: &mut UciStore, address: &Address) -> Result<String> {
    let config = store.load_config(&address.config)?;
    let Some(selector) = address.section.as_deref() else {
        return render_config(config);
    };

    let section = config
        .try_get(selector)?
        .ok_or_else(|| UciError::NotFound(format!("section '{address}'")))?;
    let prefix = format!("{}.{}", config.name, config.section_name(section)?);

    match address.option.as_deref() {
        None => Ok(render_section(&prefix, section)),
        Some(name) => {
            let option = section
                .get(name)
                .ok_or_else(|| UciError::NotFound(format!("option '{address}'")))?;
            Ok(render_option(&prefix, option))
        }
    }
}

fn render_config(config: &Config) -> Result<String> {
    let mut output = String::new();
    for section in &config.sections {
        let prefix = format!("{}.{}", config.name, config.section_name(section)?);
        output.push_str(&render_section(&prefix, section));
    }
    Ok(output)
}

fn render_section(prefix: &str, section: &Section) -> String {
    let mut output = format!("{}={}\n", prefix, section.section_type);
    for option in &section.options {
        output.push_str(&render_option(prefix, option));
    }
    output
}

fn render_option(prefix: &str, option: &UciOption) -> String {
    let values = option
        .values
        .iter()
        .map(|v| quote(v))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{}.{}={}\n", prefix, option.name, values)
}

/// Single-quote a value the way a shell would read it back.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
