//! UCI: the OpenWrt configuration format.
//!
//! Files are made of `config <type> ['<name>']` blocks holding `option` and
//! `list` lines. This crate provides:
//!
//! - [`tree`]: the in-memory `Config`/`Section`/`UciOption` model with named
//!   and positional (`@type[index]`) section addressing, merge, deletion and
//!   serialization back to text
//! - [`parser`]: UCI text to tree
//! - [`store`]: a directory of config files with lazy loading and atomic commit

pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod parser;
pub mod store;
pub mod tree;

pub use error::{Result, UciError};
pub use tree::{Config, OptionType, Section, UciOption};
