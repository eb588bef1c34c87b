//! Build phase
//!
//! Runs the external build command in the deployment root. In sandbox mode the
//! project tree is staged first and the build runs inside the destination, with
//! the working directory restored afterwards whatever the outcome.

use anyhow::{anyhow, Context, Result};

use crate::config::Settings;
use crate::deploy::staging::stage_tree;
use crate::deploy::workdir::WorkingDirGuard;
use crate::deploy::DeployTarget;
use crate::error::hints;
use crate::exec::subprocess::{run_checked, CommandLine};
use crate::utils::terminal;

/// The configured build command
pub fn build_command(settings: &Settings) -> Result<CommandLine> {
    CommandLine::from_parts(&settings.build_command)
        .ok_or_else(|| anyhow!("build command is empty; check METHDEV_BUILD_CMD"))
}

/// Execute the build phase for `target`
pub fn execute(target: &DeployTarget, settings: &Settings) -> Result<()> {
    let command = build_command(settings)?;

    match target {
        DeployTarget::Local => run_checked(&command, settings.verbose, hints::build_tool),
        DeployTarget::Sandbox { destination } => {
            let source = std::env::current_dir().context("Failed to get current directory")?;
            let report = stage_tree(&source, destination, settings.verbose)?;
            if settings.verbose {
                terminal::print_info(&format!(
                    "Staged {} entries ({} files) into {}",
                    report.entries,
                    report.files,
                    destination.display()
                ));
            }

            let _guard = WorkingDirGuard::enter(destination)?;
            run_checked(&command, settings.verbose, hints::build_tool)
        }
    }
}
