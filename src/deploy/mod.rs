//! Deployment root resolution
//!
//! The root chosen here is used by both phases: whatever root is built is the
//! root that is run.

pub mod staging;
pub mod workdir;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::MethdevError;

/// Executable location relative to the deployment root
pub const EXECUTABLE_SUBPATH: &str = "bin/meth";

/// Where the project is built and run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployTarget {
    /// Build and run in the invocation directory
    Local,
    /// Copy the tree into `destination`, then build and run there
    Sandbox { destination: PathBuf },
}

impl DeployTarget {
    /// Pick the target from the sandbox flag alone
    ///
    /// Build and run flags do not influence the choice, so `--termux --run`
    /// without `--build` runs the previously staged executable.
    pub fn resolve(config: &Config) -> Result<Self, MethdevError> {
        if config.sandbox_mode {
            Ok(DeployTarget::Sandbox {
                destination: config.destination_dir()?.to_path_buf(),
            })
        } else {
            Ok(DeployTarget::Local)
        }
    }

    /// Root directory holding `bin/meth`
    pub fn root(&self) -> &Path {
        match self {
            DeployTarget::Local => Path::new("."),
            DeployTarget::Sandbox { destination } => destination,
        }
    }

    /// Path of the target executable, `<root>/bin/meth`
    pub fn executable(&self) -> PathBuf {
        self.root().join(EXECUTABLE_SUBPATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_flags;

    const HOME: &str = "/home/dev";

    fn target_for(tokens: &[&str]) -> DeployTarget {
        let config = parse_flags(tokens, Some(Path::new(HOME))).unwrap();
        DeployTarget::resolve(&config).unwrap()
    }

    #[test]
    fn test_local_root_is_current_dir() {
        let target = target_for(&["-b", "-r"]);
        assert_eq!(target, DeployTarget::Local);
        assert_eq!(target.root(), Path::new("."));
        assert_eq!(target.executable(), PathBuf::from("./bin/meth"));
    }

    #[test]
    fn test_sandbox_root() {
        let target = target_for(&["--build", "--run", "--termux"]);
        assert_eq!(target.root(), Path::new("/home/dev/temp/crystal/meth"));
        assert_eq!(
            target.executable(),
            PathBuf::from("/home/dev/temp/crystal/meth/bin/meth")
        );
    }

    #[test]
    fn test_sandbox_run_without_build_uses_sandbox_root() {
        let target = target_for(&["--termux", "--run"]);
        assert_eq!(
            target,
            DeployTarget::Sandbox {
                destination: PathBuf::from("/home/dev/temp/crystal/meth")
            }
        );
        assert_eq!(
            target.executable(),
            PathBuf::from("/home/dev/temp/crystal/meth/bin/meth")
        );
    }

    #[test]
    fn test_sandbox_without_home_fails() {
        let config = parse_flags(["-t", "-b"], None).unwrap();
        assert!(matches!(
            DeployTarget::resolve(&config),
            Err(MethdevError::Filesystem { .. })
        ));
    }

    #[test]
    fn test_local_without_home_is_fine() {
        let config = parse_flags(["-b"], None).unwrap();
        assert_eq!(DeployTarget::resolve(&config).unwrap(), DeployTarget::Local);
    }
}
