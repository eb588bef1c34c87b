//! Path utilities

use std::path::Path;

use crate::error::MethdevError;

/// Ensure a directory exists, creating parents as needed
pub fn ensure_dir(path: &Path) -> Result<(), MethdevError> {
    if !path.is_dir() {
        std::fs::create_dir_all(path)
            .map_err(|e| MethdevError::io("Failed to create directory", path, e))?;
    }
    Ok(())
}

/// Remove whatever is at `path`, file, symlink or directory tree
pub fn remove_entry(path: &Path) -> Result<(), MethdevError> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(MethdevError::io("Failed to inspect", path, e)),
    };

    let result = if metadata.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|e| MethdevError::io("Failed to remove", path, e))
}
