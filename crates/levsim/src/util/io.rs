//! I/O utility functions

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling path used while a write is in flight (`foo.json` -> `foo.json.tmp`).
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write content to a file atomically using write-then-rename pattern.
///
/// The content is first written to a temporary file next to `path`, then
/// renamed over the target, so readers never observe a half-written file.
///
/// # Example
/// ```ignore
/// atomic_write(Path::new("cache/spy.json"), &json)?;
/// ```
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = temp_path(path);

    fs::write(&temp_path, content)?;

    // Atomic on POSIX systems
    fs::rename(&temp_path, path)?;

    Ok(())
}
