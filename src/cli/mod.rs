//! Command-line interface for glean.
//!
//! The CLI is a thin boundary over the core API: each subcommand opens the
//! resource registry, calls into the engines, renders line-oriented
//! `name: quantity` output, and flushes unsaved resources once on the
//! success path. All graph semantics live in [`crate::engine`]; nothing here
//! does more than parse, dispatch, and print.
//!
//! # Commands
//!
//! - `list` — known resource names (optionally filtered by prefix)
//! - `show` — a resource's variant and direct dependencies
//! - `add` — define or redefine a resource (rejects cycle-introducing edits)
//! - `remove` — delete a resource record
//! - `rename` — rename a resource, cascading through referencing parents
//! - `bom` — total atomic requirements for a quantity of a resource
//! - `plan` — depth-ordered build plan for a quantity of a resource
//! - `missing` — undefined names in a resource's dependency closure
//! - `check` — whole-store cycle audit and build order
//!
//! # Store selection
//!
//! The record directory resolves from `--resources-dir`, then
//! `GLEAN_RESOURCES_DIR`, then the config file, then the platform data dir
//! (see [`crate::config`]).

mod add;
mod bom;
mod check;
mod list;
mod missing;
mod plan;
mod remove;
mod rename;
mod show;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GlobalConfig;
use crate::registry::{Registry, ResourceStore};

/// Top-level CLI for the glean crafting resource tracker.
#[derive(Parser)]
#[command(
    name = "glean",
    about = "Track crafting resources and compute bills of materials and build plans",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Resource store directory (overrides config and environment).
    #[arg(long, global = true, value_name = "DIR")]
    resources_dir: Option<PathBuf>,

    /// Path to the global configuration file.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug output (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List known resource names.
    List(list::ListCommand),
    /// Show a resource's variant and direct dependencies.
    Show(show::ShowCommand),
    /// Define or redefine a resource.
    Add(add::AddCommand),
    /// Delete a resource record.
    Remove(remove::RemoveCommand),
    /// Rename a resource and every reference to it.
    Rename(rename::RenameCommand),
    /// Compute the bill of materials for a quantity of a resource.
    Bom(bom::BomCommand),
    /// Compute the ordered build plan for a quantity of a resource.
    Plan(plan::PlanCommand),
    /// List undefined names in a resource's dependency closure.
    Missing(missing::MissingCommand),
    /// Audit the whole store for dependency cycles.
    Check(check::CheckCommand),
}

impl Cli {
    /// Execute the parsed command against the resolved resource store.
    ///
    /// Opens the registry, dispatches, and — only when the command
    /// succeeded — flushes resources that were defined during the session
    /// but never explicitly persisted. A failing command leaves the store
    /// untouched by the flush.
    pub fn execute(self) -> Result<()> {
        self.init_tracing();

        let store_dir = match self.resources_dir {
            Some(dir) => dir,
            None => {
                let config = match &self.config {
                    Some(path) => GlobalConfig::load_from(path)?,
                    None => GlobalConfig::load()?,
                };
                config.resources_dir()?
            }
        };

        let store = ResourceStore::open(store_dir)?;
        let mut registry = Registry::new(store);

        match self.command {
            Commands::List(cmd) => cmd.execute(&mut registry)?,
            Commands::Show(cmd) => cmd.execute(&mut registry)?,
            Commands::Add(cmd) => cmd.execute(&mut registry)?,
            Commands::Remove(cmd) => cmd.execute(&mut registry)?,
            Commands::Rename(cmd) => cmd.execute(&mut registry)?,
            Commands::Bom(cmd) => cmd.execute(&mut registry)?,
            Commands::Plan(cmd) => cmd.execute(&mut registry)?,
            Commands::Missing(cmd) => cmd.execute(&mut registry)?,
            Commands::Check(cmd) => cmd.execute(&mut registry)?,
        }

        registry.flush_all()?;
        Ok(())
    }

    fn init_tracing(&self) {
        let default_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        // Ignore failure when a subscriber is already installed (tests)
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
