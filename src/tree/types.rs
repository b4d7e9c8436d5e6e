//! Option kinds and the keywords that introduce them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an option line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    /// Single scalar value (`option key 'value'`).
    #[default]
    Option,
    /// Ordered, duplicate-free sequence of values (`list key 'value'`).
    List,
}

impl OptionType {
    /// Parse an option type from its UCI keyword.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "option" => Some(Self::Option),
            "list" => Some(Self::List),
            _ => None,
        }
    }

    /// The keyword used for this option type in UCI text.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Option => "option",
            Self::List => "list",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
