//! `glean remove` — delete a resource record.
//!
//! Removal is final and does not cascade: composites that depended on the
//! removed name keep their reference, which `glean missing` will then
//! report as undefined.

use anyhow::Result;
use clap::Args;

use crate::registry::Registry;

#[derive(Args)]
pub struct RemoveCommand {
    /// Resource to delete.
    name: String,
}

impl RemoveCommand {
    pub fn execute(self, registry: &mut Registry) -> Result<()> {
        let known = registry.contains(&self.name);
        registry.delete(&self.name)?;
        if known {
            println!("removed resource '{}'", self.name);
        } else {
            println!("resource '{}' was not defined", self.name);
        }
        Ok(())
    }
}
