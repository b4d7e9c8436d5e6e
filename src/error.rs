//! Error types for the uci crate.
//!
//! Uses thiserror for derive macros. Selector grammar failures live in
//! [`SelectorError`](crate::tree::SelectorError) and are wrapped here so that
//! tree, parser and store operations share one error type.

use crate::exit_codes;
use crate::tree::SelectorError;
use std::io;
use thiserror::Error;

/// Main error type for uci operations.
#[derive(Error, Debug)]
pub enum UciError {
    /// A section selector was malformed or out of range.
    #[error(transparent)]
    Selector(#[from] SelectorError),

    /// A section was queried against a config that does not own it.
    #[error("internal invariant violated: section is not owned by config '{config}'")]
    ForeignSection { config: String },

    /// UCI text could not be parsed.
    #[error("parse error in '{config}' at line {line}: {message}")]
    Parse {
        config: String,
        line: usize,
        message: String,
    },

    /// The addressed config, section or option does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// User provided invalid arguments or the request conflicts with existing state.
    #[error("{0}")]
    UserError(String),

    /// Reading or writing a config file failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl UciError {
    /// Build an I/O error with a human readable context.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        UciError::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            UciError::Selector(_) | UciError::Parse { .. } => exit_codes::SYNTAX_ERROR,
            UciError::NotFound(_) => exit_codes::NOT_FOUND,
            UciError::UserError(_) | UciError::ForeignSection { .. } => exit_codes::USER_ERROR,
            UciError::Io { .. } => exit_codes::IO_FAILURE,
        }
    }
}

/// Result type alias for uci operations.
pub type Result<T> = std::result::Result<T, UciError>;
