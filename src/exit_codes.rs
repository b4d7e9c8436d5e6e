//! Exit code constants for the `uci` binary.
//!
//! - 0: Success
//! - 1: User error (bad arguments, conflicting state)
//! - 2: Syntax error (malformed selector or UCI text)
//! - 3: Requested config, section or option does not exist
//! - 4: I/O failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or a request that conflicts with existing state.
pub const USER_ERROR: i32 = 1;

/// Syntax error: malformed section selector or unparsable UCI file.
pub const SYNTAX_ERROR: i32 = 2;

/// The addressed config, section or option does not exist.
pub const NOT_FOUND: i32 = 3;

/// Reading or writing a config file failed.
pub const IO_FAILURE: i32 = 4;
