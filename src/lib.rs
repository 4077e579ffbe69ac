//! glean — a crafting resource tracker.
//!
//! Glean models crafting/manufacturing resources that are either *atomic*
//! (no further breakdown) or *composite* (built from a weighted list of
//! other resources), and answers two questions about any target: the total
//! multiset of atomic resources required (the bill of materials), and the
//! order and quantities in which everything must be produced (the build
//! plan).
//!
//! # Architecture
//!
//! Data flows store → registry → engines → CLI:
//!
//! - [`registry::store`] — one JSON record per resource in a flat directory
//! - [`registry`] — the single-instance, lazily loading cache over the
//!   store, with deferred persistence of session-defined resources
//! - [`core`] — the resource model and error types
//! - [`engine`] — BOM aggregation, build planning, the reverse-dependency
//!   index behind cascading renames, missing-dependency discovery, and
//!   whole-store cycle analysis
//! - [`cli`] — thin clap-based command dispatch and line-oriented output
//! - [`config`] — the global configuration file and store-directory
//!   resolution
//!
//! The registry is an explicitly owned value injected into every engine
//! function; there is no process-global state, and each test constructs its
//! own registry over a temporary store.
//!
//! # Example
//!
//! ```rust
//! use glean::core::Resource;
//! use glean::engine::{compute_bom, compute_build_plan};
//! use glean::registry::{Registry, ResourceStore};
//!
//! # fn main() -> anyhow::Result<()> {
//! let temp = tempfile::TempDir::new()?;
//! let mut registry = Registry::new(ResourceStore::open(temp.path().join("resources"))?);
//!
//! registry.register(Resource::atomic("Bolt"))?;
//! registry.register(Resource::composite("Widget", [("Bolt".to_string(), 3)]))?;
//! registry.register(Resource::composite(
//!     "Gadget",
//!     [("Widget".to_string(), 2), ("Bolt".to_string(), 4)],
//! ))?;
//!
//! let bom = compute_bom(&mut registry, "Gadget", 1, false)?;
//! assert_eq!(bom.get("Bolt"), 10);
//!
//! let plan = compute_build_plan(&mut registry, "Gadget", 1)?;
//! assert_eq!(plan.first().unwrap().name, "Bolt");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod engine;
pub mod registry;
pub mod utils;
