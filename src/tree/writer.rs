//! Rendering a tree back to UCI text.

use super::model::Config;
use super::selector::is_placeholder_name;
use super::types::OptionType;
use std::fmt;
use std::io;

impl fmt::Display for Config {
    /// Every section block is preceded by a blank line and the output ends
    /// with one. Values are emitted verbatim between single quotes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            // Synthetic names are derived, never stored on disk.
            if section.name.is_empty() || is_placeholder_name(&section.name, &section.section_type)
            {
                write!(f, "\nconfig {}\n", section.section_type)?;
            } else {
                write!(f, "\nconfig {} '{}'\n", section.section_type, section.name)?;
            }

            for option in &section.options {
                match option.option_type {
                    OptionType::Option => {
                        if let Some(value) = option.values.first() {
                            writeln!(f, "\toption {} '{}'", option.name, value)?;
                        }
                    }
                    OptionType::List => {
                        for value in &option.values {
                            writeln!(f, "\tlist {} '{}'", option.name, value)?;
                        }
                    }
                }
            }
        }
        f.write_str("\n")
    }
}

impl Config {
    /// Render the config and write it to `writer` in one go.
    ///
    /// The text is fully built in memory first, so a failure can only come
    /// from the sink. Returns the number of bytes written.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<usize> {
        let rendered = self.to_string();
        writer.write_all(rendered.as_bytes())?;
        writer.flush()?;
        Ok(rendered.len())
    }
}
