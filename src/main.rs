//! glean CLI entry point.
//!
//! Parses arguments, executes the command, and renders any failure as a
//! user-friendly error before exiting non-zero.

use anyhow::Result;
use clap::Parser;
use glean::cli::Cli;
use glean::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(err) => {
            let context = user_friendly_error(err);
            context.display();
            std::process::exit(1);
        }
    }
}
