//! `glean missing` — undefined names in a resource's dependency closure.
//!
//! Prints each missing name on its own line, in depth-first discovery
//! order. Feed the list back through `glean add` and re-run to confirm the
//! closure is complete.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::engine::find_missing;
use crate::registry::Registry;

#[derive(Args)]
pub struct MissingCommand {
    /// Root resource to inspect.
    name: String,
}

impl MissingCommand {
    pub fn execute(self, registry: &mut Registry) -> Result<()> {
        let missing = find_missing(registry, &self.name)?;
        if missing.is_empty() {
            println!(
                "{}",
                format!("all dependencies of '{}' are defined", self.name).green()
            );
            return Ok(());
        }
        for name in missing {
            println!("{name}");
        }
        Ok(())
    }
}
