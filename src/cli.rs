//! CLI front end
//!
//! The orchestrator's flags include multi-letter short aliases (`-dt`, `-da`),
//! every unknown `-` token is a link flag, and a leading `--` must be kept like
//! any other link flag. Tokens are therefore taken verbatim from the argument
//! vector and matched by [`crate::config::flags`]; clap renders the usage text.

use std::ffi::OsString;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use crate::commands;
use crate::config::{parse_flags, Settings};
use crate::utils::terminal;

const FLAGS_HELP: &str = "\
Flags:
  -b,  --build           build with the external build tool
  -r,  --run             run bin/meth on test/main.mh
  -g,  --gdb             run bin/meth under the debugger
  -t,  --termux          stage into ~/temp/crystal/meth and build/run there
  -k,  --keep            forward --keep
  -dt, --display-tokens  forward --display-tokens
  -da, --display-ast     forward --display-ast
  -tl, --termux-libs     append the Termux system library search paths

Any other token starting with '-' is forwarded to bin/meth as a link flag.";

/// methdev - build, stage and run the meth compiler
#[derive(Parser, Debug)]
#[command(name = "methdev")]
#[command(about, long_about = None)]
#[command(after_help = FLAGS_HELP)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Orchestrator flags and link flags, in order
    #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<OsString>,
}

impl Cli {
    /// Capture the process arguments
    pub fn from_env() -> Self {
        Self::from_args_os(std::env::args_os())
    }

    /// Capture `[program, tokens...]` without interpreting any token
    pub fn from_args_os<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self {
            tokens: args.into_iter().skip(1).map(Into::into).collect(),
        }
    }

    /// Usage text
    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }

    /// Execute the invocation
    pub fn execute(self) -> Result<()> {
        let settings = Settings::from_env();

        if settings.no_color {
            terminal::disable_colors();
        }

        let config = parse_flags(&self.tokens, settings.home.as_deref())?;
        if !config.has_work() {
            eprintln!("{}", Self::usage());
        }
        commands::orchestrate(&config, &settings)
    }
}
