//! Filesystem utilities.
//!
//! Config files are replaced atomically so a crash never leaves a
//! half-written file behind.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
