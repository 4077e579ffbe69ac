//! `glean list` — print known resource names, one per line.

use anyhow::Result;
use clap::Args;

use crate::registry::Registry;

#[derive(Args)]
pub struct ListCommand {
    /// Only names starting with this prefix.
    #[arg(long, value_name = "PREFIX")]
    prefix: Option<String>,
}

impl ListCommand {
    pub fn execute(self, registry: &mut Registry) -> Result<()> {
        let names = match &self.prefix {
            Some(prefix) => registry.complete(prefix)?,
            None => registry.list_names()?,
        };
        for name in names {
            println!("{name}");
        }
        Ok(())
    }
}
