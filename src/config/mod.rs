//! Invocation configuration
//!
//! A [`Config`] is produced once from the command line by [`flags::parse_flags`]
//! and read by both the build and run phases. It is never mutated afterwards.

pub mod flags;
pub mod settings;

use std::path::{Path, PathBuf};

use crate::error::MethdevError;

pub use flags::parse_flags;
pub use settings::Settings;

/// Test input handed to the compiler on every run, relative to the invocation directory
pub const FIXED_INPUT_PATH: &str = "test/main.mh";

/// Sandbox destination, relative to the user's home directory
pub const SANDBOX_SUBDIR: &str = "temp/crystal/meth";

/// System library directories of the Termux/Android environment
pub const TERMUX_LIB_PATHS: &[&str] = &["/system/lib64", "/apex/com.android.runtime/lib64/bionic"];

/// Typed configuration record for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Run the build phase
    pub build: bool,
    /// Run the target executable
    pub run_after_build: bool,
    /// Run the target under the debugger
    pub use_debugger: bool,
    /// Deploy into the sandbox destination instead of the current directory
    pub sandbox_mode: bool,
    /// Forward `--keep` to the target
    pub keep_intermediate_files: bool,
    /// Forward `--display-tokens` to the target
    pub display_tokens: bool,
    /// Forward `--display-ast` to the target
    pub display_ast: bool,
    /// Append the Termux system library search paths to the link flags
    pub sandbox_lib_paths: bool,
    /// Unrecognized `-` tokens, in encounter order
    pub extra_link_flags: Vec<String>,
    /// `<home>/temp/crystal/meth`, when a home directory is known
    pub destination_dir: Option<PathBuf>,
}

impl Config {
    /// The fixed test input path
    pub fn fixed_input_path(&self) -> &'static str {
        FIXED_INPUT_PATH
    }

    /// Sandbox destination directory
    ///
    /// Only consulted in sandbox mode; fails when no home directory was found.
    pub fn destination_dir(&self) -> Result<&Path, MethdevError> {
        self.destination_dir.as_deref().ok_or_else(|| {
            MethdevError::filesystem(
                "cannot determine the sandbox directory: HOME is not set",
            )
        })
    }

    /// Link flags forwarded to the target, including the sandbox library
    /// search paths when requested
    pub fn link_flags(&self) -> Vec<String> {
        let mut flags = self.extra_link_flags.clone();
        if self.sandbox_lib_paths {
            flags.extend(TERMUX_LIB_PATHS.iter().map(|p| format!("-L{}", p)));
        }
        flags
    }

    /// Whether any phase has work to do
    pub fn has_work(&self) -> bool {
        self.build || self.run_after_build
    }
}

/// Compute the sandbox destination under `home`
pub fn sandbox_destination(home: &Path) -> PathBuf {
    home.join(SANDBOX_SUBDIR)
}
