//! Environment-derived settings
//!
//! There is no configuration file; the few tunables come from the environment.

use std::path::PathBuf;

/// Default external build command
pub const DEFAULT_BUILD_COMMAND: &[&str] = &["shards", "build"];

/// Default debugger
pub const DEFAULT_DEBUGGER: &str = "gdb";

/// Ambient settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Home directory used to place the sandbox
    pub home: Option<PathBuf>,
    /// Build command, program first
    pub build_command: Vec<String>,
    /// Debugger program
    pub debugger: String,
    /// Print resolved roots and staging details
    pub verbose: bool,
    /// Disable styled output
    pub no_color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home: None,
            build_command: DEFAULT_BUILD_COMMAND.iter().map(|s| s.to_string()).collect(),
            debugger: DEFAULT_DEBUGGER.to_string(),
            verbose: false,
            no_color: false,
        }
    }
}

impl Settings {
    /// Read settings from the process environment
    ///
    /// Falls back to the platform home directory when `HOME` is unset.
    pub fn from_env() -> Self {
        let mut settings = Self::from_lookup(|key| std::env::var(key).ok());
        if settings.home.is_none() {
            settings.home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        }
        settings
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        settings.home = lookup("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from);

        if let Some(cmd) = lookup("METHDEV_BUILD_CMD") {
            let parts: Vec<String> = cmd.split_whitespace().map(str::to_string).collect();
            if !parts.is_empty() {
                settings.build_command = parts;
            }
        }

        if let Some(debugger) = lookup("METHDEV_DEBUGGER").filter(|d| !d.trim().is_empty()) {
            settings.debugger = debugger.trim().to_string();
        }

        settings.verbose = lookup("METHDEV_VERBOSE").is_some_and(|v| is_truthy(&v));
        settings.no_color = lookup("NO_COLOR").is_some_and(|v| !v.is_empty())
            || lookup("METHDEV_NO_COLOR").is_some_and(|v| is_truthy(&v));

        settings
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
