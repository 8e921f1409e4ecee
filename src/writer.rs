//! Durable file writing for emitted segments.

use crate::error::{Result, TmplgenError};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Writes `content` to `path`, creating parent directories as needed and
/// fully replacing any existing file. The file is flushed to disk before
/// returning, so a successful return means the segment is durable.
///
/// # Errors
///
/// `TmplgenError::Write` (wrapping the io error and carrying the path) if
/// directory creation, the write, or the final sync fails.
pub fn write_segment(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| TmplgenError::write(path, e))?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| TmplgenError::write(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| TmplgenError::write(path, e))?;
    file.sync_all().map_err(|e| TmplgenError::write(path, e))
}
