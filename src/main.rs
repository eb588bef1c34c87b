//! methdev - developer workflow runner for the meth compiler
//!
//! Parses a small flag set, optionally builds the compiler with the external
//! build tool, optionally stages the tree into the Termux sandbox, and runs
//! `bin/meth` on the test input, directly or under the debugger.
//!
//! ## Architecture
//!
//! ```text
//! flags → Config → DeployTarget → build phase → run phase
//! ```

mod cli;
mod commands;
mod config;
mod deploy;
mod error;
mod exec;
mod utils;

use cli::Cli;
use error::MethdevError;
use utils::terminal;

fn main() {
    let cli = Cli::from_env();

    if let Err(err) = cli.execute() {
        let code = match err.downcast_ref::<MethdevError>() {
            Some(e) => {
                e.display_with_hints();
                e.exit_code()
            }
            None => {
                terminal::print_error(&format!("{:#}", err));
                1
            }
        };
        std::process::exit(code);
    }
}
