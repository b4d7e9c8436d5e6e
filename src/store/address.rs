//! `config[.section[.option]][=value]` addresses as typed on the command line.

use crate::error::{Result, UciError};
use std::fmt;

/// A dotted path into the config directory, optionally carrying a value.
///
/// The section part may be a positional selector such as `@rule[-1]`; its
/// type is allowed to contain dots because the selector ends at `]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub config: String,
    pub section: Option<String>,
    pub option: Option<String>,
    pub value: Option<String>,
}

impl Address {
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || UciError::UserError(format!("invalid address '{input}'"));

        let (path, value) = match input.split_once('=') {
            Some((path, value)) => (path, Some(value.to_string())),
            None => (input, None),
        };

        let (config, rest) = match path.split_once('.') {
            Some((config, rest)) => (config, Some(rest)),
            None => (path, None),
        };
        if config.is_empty() {
            return Err(invalid());
        }

        let (section, option) = match rest {
            None => (None, None),
            Some(rest) if rest.starts_with('@') => {
                let end = rest.find(']').ok_or_else(invalid)?;
                let (section, tail) = rest.split_at(end + 1);
                match tail.strip_prefix('.') {
                    Some(option) => (Some(section), Some(option)),
                    None if tail.is_empty() => (Some(section), None),
                    None => return Err(invalid()),
                }
            }
            Some(rest) => match rest.split_once('.') {
                Some((section, option)) => (Some(section), Some(option)),
                None => (Some(rest), None),
            },
        };

        let bad_option = option.is_some_and(|o| o.is_empty() || o.contains('.'));
        if section.is_some_and(str::is_empty) || bad_option {
            return Err(invalid());
        }

        Ok(Self {
            config: config.to_string(),
            section: section.map(str::to_string),
            option: option.map(str::to_string),
            value,
        })
    }

    /// The section part, or an error naming what was expected.
    pub fn require_section(&self) -> Result<&str> {
        self.section
            .as_deref()
            .ok_or_else(|| UciError::UserError(format!("address '{self}' has no section")))
    }

    /// The option part, or an error naming what was expected.
    pub fn require_option(&self) -> Result<&str> {
        self.option
            .as_deref()
            .ok_or_else(|| UciError::UserError(format!("address '{self}' has no option")))
    }

    /// The value part, or an error naming what was expected.
    pub fn require_value(&self) -> Result<&str> {
        self.value
            .as_deref()
            .ok_or_else(|| UciError::UserError(format!("address '{self}' has no value")))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.config)?;
        if let Some(section) = &self.section {
            write!(f, ".{section}")?;
        }
        if let Some(option) = &self.option {
            write!(f, ".{option}")?;
        }
        Ok(())
    }
}
