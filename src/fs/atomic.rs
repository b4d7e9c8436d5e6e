//! Atomic file replacement.
//!
//! All writes follow the same pattern:
//! 1. Write content to `.{filename}.tmp` in the target's directory
//! 2. Sync the temporary file to disk
//! 3. Rename it over the target
//!
//! Source and destination must be on the same filesystem for the rename to
//! be atomic, which holds because the temporary file is a sibling of the
//! target. On crash a `.{filename}.tmp` file may remain.

use crate::error::{Result, UciError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
///
/// # Example
///
/// ```no_run
/// use uci::fs::atomic_write;
/// use std::path::Path;
///
/// atomic_write(Path::new("/etc/config/network"), b"\nconfig interface 'lan'\n\n")?;
/// # Ok::<(), uci::error::UciError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            UciError::io(
                format!("failed to create directory '{}'", parent.display()),
                e,
            )
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        UciError::io(format!("failed to replace '{}'", path.display()), e)
    })?;

    // Persist the directory entry as well.
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

/// Convenience wrapper around [`atomic_write`] for string content.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Temporary sibling of `target`: `.{filename}.tmp`.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| UciError::UserError(format!("invalid file path '{}'", target.display())))?;

    Ok(parent.join(format!(".{filename}.tmp")))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        UciError::io(
            format!("failed to create temporary file '{}'", path.display()),
            e,
        )
    })?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    written.map_err(|e| {
        let _ = fs::remove_file(path);
        UciError::io(
            format!("failed to write temporary file '{}'", path.display()),
            e,
        )
    })
}
