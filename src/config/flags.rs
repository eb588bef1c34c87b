//! Command-line flag parsing
//!
//! Tokens are matched exactly against the known long and short aliases. Any
//! other token starting with `-` is kept as a link flag; anything else stops
//! parsing with [`MethdevError::Parse`]. Tokens that are not valid UTF-8 are
//! rejected the same way, whether or not they start with `-`.

use std::ffi::OsStr;
use std::path::Path;

use super::{sandbox_destination, Config};
use crate::error::MethdevError;

/// Flags understood by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Build,
    Debugger,
    Run,
    Sandbox,
    Keep,
    DisplayTokens,
    DisplayAst,
    SandboxLibs,
}

impl Flag {
    /// Match a token against the known aliases
    fn from_token(token: &str) -> Option<Self> {
        let flag = match token {
            "--build" | "-b" => Flag::Build,
            "--gdb" | "-g" => Flag::Debugger,
            "--run" | "-r" => Flag::Run,
            "--termux" | "-t" => Flag::Sandbox,
            "--keep" | "-k" => Flag::Keep,
            "--display-tokens" | "-dt" => Flag::DisplayTokens,
            "--display-ast" | "-da" => Flag::DisplayAst,
            "--termux-libs" | "-tl" => Flag::SandboxLibs,
            _ => return None,
        };
        Some(flag)
    }

    fn apply(self, config: &mut Config) {
        match self {
            Flag::Build => config.build = true,
            Flag::Debugger => config.use_debugger = true,
            Flag::Run => config.run_after_build = true,
            Flag::Sandbox => config.sandbox_mode = true,
            Flag::Keep => config.keep_intermediate_files = true,
            Flag::DisplayTokens => config.display_tokens = true,
            Flag::DisplayAst => config.display_ast = true,
            Flag::SandboxLibs => config.sandbox_lib_paths = true,
        }
    }
}

/// Parse the full token list into a [`Config`]
///
/// `home` is used to compute the sandbox destination. Parsing halts at the
/// first unknown positional token.
pub fn parse_flags<I, S>(tokens: I, home: Option<&Path>) -> Result<Config, MethdevError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut config = Config {
        destination_dir: home.map(sandbox_destination),
        ..Default::default()
    };

    for token in tokens {
        let token = token.as_ref();
        let Some(token) = token.to_str() else {
            return Err(MethdevError::parse(token.to_string_lossy()));
        };
        if let Some(flag) = Flag::from_token(token) {
            flag.apply(&mut config);
        } else if token.starts_with('-') {
            config.extra_link_flags.push(token.to_string());
        } else {
            return Err(MethdevError::parse(token));
        }
    }

    Ok(config)
}
