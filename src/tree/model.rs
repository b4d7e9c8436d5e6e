//! Config, Section and UciOption definitions.
//!
//! These are plain data holders. The serde field names match the JSON dumps
//! produced by `uci dump`.

use super::types::OptionType;
use serde::{Deserialize, Serialize};

/// A UCI file: a named, ordered sequence of sections.
///
/// Section order is append order and is meaningful: it determines the
/// positional index of unnamed sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,

    /// Set by tree methods when things were modified.
    #[serde(skip)]
    pub(super) tainted: bool,
}

impl Config {
    /// Create an empty config.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::with_capacity(1),
            tainted: false,
        }
    }

    /// Whether the tree was mutated since it was loaded or last marked clean.
    pub fn is_tainted(&self) -> bool {
        self.tainted
    }

    /// Forget about previous mutations, e.g. after the config was written out.
    pub fn mark_clean(&mut self) {
        self.tainted = false;
    }
}

/// A group of options under a type. It may be named or unnamed; an empty
/// name means unnamed, in which case its synthetic name is built from the
/// type and positional index (e.g. `@system[0]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(rename = "type")]
    pub section_type: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<UciOption>,
}

impl Section {
    /// Create a section without options. Pass an empty name for an unnamed section.
    pub fn new(section_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            section_type: section_type.into(),
            options: Vec::with_capacity(1),
        }
    }

    /// Whether the section has no stored name.
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }
}

/// The key to one or more values. Multiple values indicate a list option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UciOption {
    pub name: String,

    pub values: Vec<String>,

    #[serde(rename = "type")]
    pub option_type: OptionType,
}

impl UciOption {
    /// Create an option with the given values.
    pub fn new<I, V>(name: impl Into<String>, option_type: OptionType, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            option_type,
        }
    }
}
