//! In-memory UCI tree.
//!
//! A [`Config`] is an ordered sequence of [`Section`]s, each holding an
//! ordered sequence of [`UciOption`]s. Sections may be unnamed; those are
//! addressed by their birth order within their type using the `@type[index]`
//! selector syntax. Positions are always recomputed by scanning, never stored,
//! so the tree stays consistent after any mutation.

mod model;
mod operations;
mod selector;
pub mod types;
mod writer;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::{Config, Section, UciOption};
pub use selector::{
    Selector, SelectorError, is_placeholder_name, parse_selector, placeholder_index,
    placeholder_name,
};
pub use types::OptionType;
