//! Section selectors.
//!
//! A selector is either a literal section name or the positional form
//! `@type[index]`, where `index` is a base-10 signed integer. Negative
//! indices count from the end of the sections of that type.

use regex::Regex;
use std::num::ParseIntError;
use std::sync::LazyLock;
use thiserror::Error;

/// Matches synthetic names of unnamed sections: `@<type>[<non-negative index>]`.
static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@(.*?)\[(\d+)\]$").expect("placeholder pattern is a valid regex")
});

/// Failures of the `@type[index]` grammar, plus the range check applied when
/// a well-formed selector is resolved against a config.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("implausible section selector: must be at least 5 characters long")]
    Implausible,

    #[error("invalid syntax: section selector must start with @ sign")]
    MustStartWithAt,

    #[error("invalid syntax: multiple @ signs found")]
    MultipleAtSigns,

    #[error("invalid syntax: multiple open brackets found")]
    MultipleOpenBrackets,

    #[error("invalid syntax: multiple closed brackets found")]
    MultipleCloseBrackets,

    #[error("invalid syntax: section selector must have format '@type[index]'")]
    InvalidFormat,

    #[error("invalid syntax: index must be numeric: parsing {index:?}: {source}")]
    IndexNotNumeric {
        index: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid name: index out of bounds")]
    IndexOutOfBounds,
}

/// A parsed section selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// Exact match on a stored section name.
    Named(&'a str),
    /// The `index`-th section of `section_type` in declaration order.
    Positional { section_type: &'a str, index: i64 },
}

impl<'a> Selector<'a> {
    /// Classify a selector. Anything starting with `@` must follow the
    /// positional grammar; everything else is a literal name.
    pub fn parse(selector: &'a str) -> Result<Self, SelectorError> {
        if selector.starts_with('@') {
            let (section_type, index) = parse_selector(selector)?;
            Ok(Self::Positional {
                section_type,
                index,
            })
        } else {
            Ok(Self::Named(selector))
        }
    }
}

/// Split a positional selector into its type and (possibly negative) index.
///
/// Checks are applied in a fixed order so every malformed input maps to
/// exactly one error.
pub fn parse_selector(selector: &str) -> Result<(&str, i64), SelectorError> {
    let len = selector.len();
    if len < 5 {
        // "@a[0]"
        return Err(SelectorError::Implausible);
    }
    if !selector.starts_with('@') {
        return Err(SelectorError::MustStartWithAt);
    }

    let (mut bra, ket) = (0, len - 1);
    for (i, c) in selector.char_indices() {
        match c {
            '@' if i != 0 => return Err(SelectorError::MultipleAtSigns),
            '[' if bra > 0 => return Err(SelectorError::MultipleOpenBrackets),
            ']' if i != ket => return Err(SelectorError::MultipleCloseBrackets),
            '[' => bra = i,
            _ => {}
        }
    }

    if bra == 0 || bra >= ket || !selector.ends_with(']') {
        return Err(SelectorError::InvalidFormat);
    }

    let section_type = &selector[1..bra];
    if section_type.is_empty() {
        return Err(SelectorError::InvalidFormat);
    }

    let raw = &selector[bra + 1..ket];
    let index = raw
        .parse::<i64>()
        .map_err(|source| SelectorError::IndexNotNumeric {
            index: raw.to_string(),
            source,
        })?;

    Ok((section_type, index))
}

/// Map a possibly negative index onto `0..count`.
pub(super) fn resolve_index(index: i64, count: usize) -> Result<usize, SelectorError> {
    let count = i64::try_from(count).unwrap_or(i64::MAX);
    if index >= count || index < -count {
        return Err(SelectorError::IndexOutOfBounds);
    }
    let resolved = if index < 0 { index + count } else { index };
    usize::try_from(resolved).map_err(|_| SelectorError::IndexOutOfBounds)
}

/// Synthetic name of the `index`-th section of `section_type`.
pub fn placeholder_name(section_type: &str, index: usize) -> String {
    format!("@{section_type}[{index}]")
}

/// Index encoded in a synthetic name, if `name` has that shape.
pub fn placeholder_index(name: &str) -> Option<usize> {
    let captures = PLACEHOLDER_PATTERN.captures(name)?;
    captures.get(2)?.as_str().parse().ok()
}

/// Whether `name` is a synthetic name for a section of `section_type`.
pub fn is_placeholder_name(name: &str, section_type: &str) -> bool {
    PLACEHOLDER_PATTERN
        .captures(name)
        .and_then(|captures| captures.get(1))
        .is_some_and(|m| m.as_str() == section_type)
}
