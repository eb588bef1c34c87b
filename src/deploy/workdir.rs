//! Scoped change of the process working directory

use std::path::{Path, PathBuf};

use crate::error::MethdevError;
use crate::utils::terminal;

/// Enters a directory and returns to the previous one when dropped
///
/// Restoration happens on every exit path, including early returns through `?`
/// and unwinding.
#[derive(Debug)]
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    /// Change into `dir`, remembering the current directory
    pub fn enter(dir: &Path) -> Result<Self, MethdevError> {
        let previous = std::env::current_dir()
            .map_err(|e| MethdevError::io("Failed to read current directory", Path::new("."), e))?;
        std::env::set_current_dir(dir)
            .map_err(|e| MethdevError::io("Failed to enter", dir, e))?;
        Ok(Self { previous })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            terminal::print_warning(&format!(
                "failed to return to {}: {}",
                self.previous.display(),
                e
            ));
        }
    }
}
