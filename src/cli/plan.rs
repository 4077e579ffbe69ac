//! `glean plan` — ordered build plan for a quantity of a resource.
//!
//! Output is `name: quantity` lines, deepest dependencies first, covering
//! every node in the tree (composites included). Like `bom`, the command
//! refuses to run while the closure has undefined names.

use anyhow::Result;
use clap::Args;

use crate::engine::{compute_build_plan, find_missing};
use crate::registry::Registry;

#[derive(Args)]
pub struct PlanCommand {
    /// Target resource.
    name: String,

    /// Units of the target to produce.
    #[arg(default_value_t = 1)]
    quantity: u64,
}

impl PlanCommand {
    pub fn execute(self, registry: &mut Registry) -> Result<()> {
        let missing = find_missing(registry, &self.name)?;
        if !missing.is_empty() {
            anyhow::bail!(
                "cannot compute build plan for '{}': undefined dependencies: {}",
                self.name,
                missing.join(", ")
            );
        }

        let plan = compute_build_plan(registry, &self.name, self.quantity)?;
        for entry in plan {
            println!("{}: {}", entry.name, entry.total);
        }
        Ok(())
    }
}
