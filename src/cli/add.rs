//! `glean add` — define or redefine a resource.
//!
//! The whole definition arrives per invocation: `--atomic` for a leaf
//! resource, or repeated `--dep name=quantity` pairs for a composite. An
//! existing record is replaced. Edits that would introduce a dependency
//! cycle are rejected before anything is persisted.

use anyhow::{Context, Result};
use clap::Args;

use crate::core::{Resource, validate_name};
use crate::engine::DependencyGraph;
use crate::registry::Registry;

#[derive(Args)]
pub struct AddCommand {
    /// Resource to define.
    name: String,

    /// Dependency as `name=quantity`; repeat for each dependency.
    #[arg(long = "dep", value_name = "NAME=QTY", conflicts_with = "atomic")]
    dependencies: Vec<String>,

    /// Define an atomic resource (no further breakdown).
    #[arg(long)]
    atomic: bool,
}

impl AddCommand {
    pub fn execute(self, registry: &mut Registry) -> Result<()> {
        validate_name(&self.name)?;

        let resource = if self.atomic {
            Resource::atomic(&self.name)
        } else {
            let pairs = self
                .dependencies
                .iter()
                .map(|spec| parse_dependency(spec))
                .collect::<Result<Vec<_>>>()?;
            Resource::composite(&self.name, pairs)
        };

        // Stage the edit in memory, then audit the resulting graph before
        // persisting. An error here leaves the store untouched: the CLI only
        // flushes on success.
        registry.register(resource)?;
        DependencyGraph::from_registry(registry)?.detect_cycles()?;
        registry.persist(&self.name)?;

        println!("defined resource '{}'", self.name);
        Ok(())
    }
}

/// Parse a `name=quantity` dependency pair.
///
/// This is the presentation boundary for quantity input: the core only ever
/// sees positive integers.
fn parse_dependency(spec: &str) -> Result<(String, u64)> {
    let (name, quantity) = spec
        .split_once('=')
        .with_context(|| format!("expected NAME=QTY, got '{spec}'"))?;
    validate_name(name)?;
    let quantity: u64 = quantity
        .parse()
        .with_context(|| format!("not a number: '{quantity}'"))?;
    if quantity == 0 {
        anyhow::bail!("dependency quantity must be positive: '{spec}'");
    }
    Ok((name.to_string(), quantity))
}
