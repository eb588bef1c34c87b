//! Error types and helpers for user-facing diagnostics
//!
//! Every error is fatal: it is reported once, with a hint where one helps,
//! and mapped to the process exit code by `main`.

use std::path::Path;

use thiserror::Error;

/// Exit code used when a required tool cannot be found (shell convention)
pub const EXIT_TOOL_NOT_FOUND: i32 = 127;

/// Errors raised while parsing flags, staging, building or running
#[derive(Error, Debug)]
pub enum MethdevError {
    /// A positional token that is neither a known flag nor a link flag
    #[error("Unknown args {token}.")]
    Parse { token: String },

    /// An external command exited unsuccessfully
    #[error("{command} failed!")]
    Subprocess {
        command: String,
        /// `None` when the process was terminated by a signal
        exit_code: Option<i32>,
    },

    /// Directory creation or tree copy failure during staging
    #[error("Filesystem error: {message}")]
    Filesystem {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Tool/executable not found on PATH
    #[error("Missing tool: {tool}")]
    MissingTool { tool: String, hint: String },
}

impl MethdevError {
    /// Create a parse error for an offending token
    pub fn parse(token: impl Into<String>) -> Self {
        Self::Parse {
            token: token.into(),
        }
    }

    /// Create a subprocess failure from the echoed command line
    pub fn subprocess(command: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::Subprocess {
            command: command.into(),
            exit_code,
        }
    }

    /// Create a filesystem error without an underlying io error
    pub fn filesystem(message: impl Into<String>) -> Self {
        Self::Filesystem {
            message: message.into(),
            source: None,
        }
    }

    /// Create a filesystem error for an io failure on `path`
    pub fn io(action: &str, path: &Path, source: std::io::Error) -> Self {
        Self::Filesystem {
            message: format!("{} {}: {}", action, path.display(), source),
            source: Some(source),
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(tool: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            hint: hint.into(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MethdevError::Parse { .. } | MethdevError::Filesystem { .. } => 1,
            MethdevError::Subprocess { exit_code, .. } => match exit_code {
                Some(0) | None => 1,
                Some(code) => *code,
            },
            MethdevError::MissingTool { .. } => EXIT_TOOL_NOT_FOUND,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("{} {}", style("ERROR:").red().bold(), self);

        match self {
            MethdevError::MissingTool { hint, .. } => {
                eprintln!("{} {}", style("HINT:").yellow().bold(), hint);
            }
            MethdevError::Subprocess {
                exit_code: None, ..
            } => {
                eprintln!("{} process terminated by signal", style("HINT:").yellow().bold());
            }
            MethdevError::Parse { .. } => {
                eprintln!(
                    "{} positional arguments are not accepted; link flags must start with '-'",
                    style("HINT:").yellow().bold()
                );
            }
            _ => {}
        }
    }
}

/// Common error hints for missing tools
pub mod hints {
    /// Get hint for a missing build tool
    pub fn build_tool(program: &str) -> String {
        if program == "shards" {
            "Install Crystal (which ships `shards`) from https://crystal-lang.org/install/\n\
             • Termux: pkg install crystal\n\
             Or point METHDEV_BUILD_CMD at another build command."
                .to_string()
        } else {
            format!("`{}` was not found on PATH. Check METHDEV_BUILD_CMD.", program)
        }
    }

    /// Get hint for a missing debugger
    pub fn debugger(program: &str) -> String {
        if program == "gdb" {
            "Install GDB with your package manager:\n\
             • Ubuntu: sudo apt install gdb\n\
             • Termux: pkg install gdb\n\
             Or point METHDEV_DEBUGGER at another debugger."
                .to_string()
        } else {
            format!("`{}` was not found on PATH. Check METHDEV_DEBUGGER.", program)
        }
    }

    /// Get hint for a missing target executable
    pub fn executable(path: &str) -> String {
        format!(
            "{} does not exist yet. Build it first with --build (-b).",
            path
        )
    }
}
