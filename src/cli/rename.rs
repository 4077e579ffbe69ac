//! `glean rename` — rename a resource and every reference to it.

use anyhow::Result;
use clap::Args;

use crate::engine;
use crate::registry::Registry;

#[derive(Args)]
pub struct RenameCommand {
    /// Current name.
    old: String,
    /// New name.
    new: String,
}

impl RenameCommand {
    pub fn execute(self, registry: &mut Registry) -> Result<()> {
        engine::rename(registry, &self.old, &self.new)?;
        println!("renamed '{}' to '{}'", self.old, self.new);
        Ok(())
    }
}
