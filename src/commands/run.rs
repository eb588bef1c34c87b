//! Run phase
//!
//! Assembles the argument list for the target executable and runs it, directly
//! or under the debugger.

use anyhow::Result;

use crate::config::{Config, Settings};
use crate::deploy::DeployTarget;
use crate::error::hints;
use crate::exec::subprocess::{run_checked, CommandLine};
use crate::utils::terminal;

/// Arguments passed to the target, in order:
/// input path, `--keep`, `--display-tokens`, `--display-ast`, link flags
pub fn assemble_arguments(config: &Config) -> Vec<String> {
    let mut args = vec![config.fixed_input_path().to_string()];

    if config.keep_intermediate_files {
        args.push("--keep".to_string());
    }
    if config.display_tokens {
        args.push("--display-tokens".to_string());
    }
    if config.display_ast {
        args.push("--display-ast".to_string());
    }
    args.extend(config.link_flags());

    args
}

/// The assembled arguments as one space-separated string
pub fn argument_string(config: &Config) -> String {
    assemble_arguments(config).join(" ")
}

/// Full command line for the run phase
pub fn command_line(config: &Config, target: &DeployTarget, settings: &Settings) -> CommandLine {
    let executable = target.executable().display().to_string();
    let args = assemble_arguments(config);

    if config.use_debugger {
        CommandLine::new(&settings.debugger)
            .arg(&executable)
            .arg("--args")
            .arg(executable)
            .args(args)
    } else {
        CommandLine::new(executable).args(args)
    }
}

/// Execute the run phase
pub fn execute(config: &Config, target: &DeployTarget, settings: &Settings) -> Result<()> {
    if settings.verbose {
        terminal::print_info(&format!("Arguments: {}", argument_string(config)));
    }

    let command = command_line(config, target, settings);
    let hint: fn(&str) -> String = if config.use_debugger {
        hints::debugger
    } else {
        hints::executable
    };
    run_checked(&command, settings.verbose, hint)
}
