//! Blocking subprocess execution
//!
//! Commands run with inherited stdio and no timeout; the caller waits until the
//! child exits.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::error::MethdevError;
use crate::utils::terminal;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Create a command line with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build a command line from `[program, args...]`
    pub fn from_parts(parts: &[String]) -> Option<Self> {
        let (program, args) = parts.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code, `None` if terminated by a signal
    pub exit_code: Option<i32>,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, duration: Duration) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code(),
            duration,
        }
    }
}

/// Run a command with inherited stdio and wait for it
pub fn run_command(command: &CommandLine) -> Result<CommandResult> {
    let start = Instant::now();

    let status = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to execute {}", command.program))?;

    Ok(CommandResult::from_status(status, start.elapsed()))
}

/// Echo, locate and run a command, failing on a non-zero exit
///
/// `hint` produces the installation hint when the program cannot be found.
pub fn run_checked(
    command: &CommandLine,
    verbose: bool,
    hint: impl FnOnce(&str) -> String,
) -> Result<()> {
    println!("{}", command);

    if locate(&command.program).is_none() {
        return Err(MethdevError::missing_tool(&command.program, hint(&command.program)).into());
    }

    let result = run_command(command)?;
    if verbose {
        terminal::print_info(&format!(
            "{} finished in {:.2?}",
            command.program, result.duration
        ));
    }

    if !result.success {
        return Err(MethdevError::subprocess(command.to_string(), result.exit_code).into());
    }
    Ok(())
}

/// Locate a program on PATH, or check a path-like program exists
pub fn locate(program: &str) -> Option<PathBuf> {
    if Path::new(program).components().count() > 1 {
        let path = Path::new(program);
        return path.is_file().then(|| path.to_path_buf());
    }
    which::which(program).ok()
}
