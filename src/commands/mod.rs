//! Build and run phases
//!
//! [`orchestrate`] resolves the deployment target once and hands the same
//! target to both phases. A failing build stops before the run phase.

pub mod build;
pub mod run;

use anyhow::Result;

use crate::config::{Config, Settings};
use crate::deploy::DeployTarget;
use crate::utils::terminal;

/// Run the requested phases for one invocation
pub fn orchestrate(config: &Config, settings: &Settings) -> Result<()> {
    if !config.has_work() {
        terminal::print_warning("nothing to do; pass --build (-b) and/or --run (-r)");
        return Ok(());
    }

    let target = DeployTarget::resolve(config)?;
    if settings.verbose {
        terminal::print_info(&format!("Deployment root: {}", target.root().display()));
    }

    if config.build {
        build::execute(&target, settings)?;
        terminal::print_success(&format!("built in {}", target.root().display()));
    }

    if config.run_after_build {
        run::execute(config, &target, settings)?;
        terminal::print_success(&format!("{} finished", target.executable().display()));
    }

    Ok(())
}
