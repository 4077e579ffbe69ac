//! `glean bom` — total atomic requirements for a quantity of a resource.
//!
//! Refuses to compute while the dependency closure has undefined names;
//! define them (`glean add`) and re-run. Output is `name: quantity` lines
//! sorted by name.

use anyhow::Result;
use clap::Args;

use crate::engine::{compute_bom, find_missing};
use crate::registry::Registry;

#[derive(Args)]
pub struct BomCommand {
    /// Target resource.
    name: String,

    /// Units of the target to produce.
    #[arg(default_value_t = 1)]
    quantity: u64,

    /// Recompute memoized unit BOMs instead of reusing them.
    #[arg(long)]
    refresh: bool,
}

impl BomCommand {
    pub fn execute(self, registry: &mut Registry) -> Result<()> {
        let missing = find_missing(registry, &self.name)?;
        if !missing.is_empty() {
            anyhow::bail!(
                "cannot compute BOM for '{}': undefined dependencies: {}",
                self.name,
                missing.join(", ")
            );
        }

        let bom = compute_bom(registry, &self.name, self.quantity, self.refresh)?;
        for (name, quantity) in bom.iter() {
            println!("{name}: {quantity}");
        }
        Ok(())
    }
}
