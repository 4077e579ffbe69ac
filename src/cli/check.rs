//! `glean check` — audit the whole store for dependency cycles.
//!
//! Builds the dependency graph over every known resource and fails with the
//! cycle path if one exists. With `--order`, also prints a build order in
//! which every dependency precedes its dependents.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::engine::DependencyGraph;
use crate::registry::Registry;

#[derive(Args)]
pub struct CheckCommand {
    /// Also print a dependencies-first build order.
    #[arg(long)]
    order: bool,
}

impl CheckCommand {
    pub fn execute(self, registry: &mut Registry) -> Result<()> {
        let graph = DependencyGraph::from_registry(registry)?;
        graph.detect_cycles()?;
        println!(
            "{}",
            format!("no cycles detected across {} resources", graph.node_count()).green()
        );

        if self.order {
            for name in graph.build_order()? {
                println!("{name}");
            }
        }
        Ok(())
    }
}
