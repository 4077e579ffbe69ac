//! `glean show` — display a resource's variant and direct dependencies.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::registry::Registry;

#[derive(Args)]
pub struct ShowCommand {
    /// Resource to display.
    name: String,
}

impl ShowCommand {
    pub fn execute(self, registry: &mut Registry) -> Result<()> {
        let resource = match registry.get(&self.name)? {
            Some(resource) => resource,
            None => return Err(registry.not_found(&self.name).into()),
        };

        if resource.is_atomic() {
            println!("{} {}", resource.name().bold(), "(atomic)".dimmed());
            return Ok(());
        }

        println!("{}", resource.name().bold());
        for (dependency, quantity) in resource.dependencies() {
            println!("{dependency}: {quantity}");
        }
        Ok(())
    }
}
