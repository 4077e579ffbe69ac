//! Graph engines over the resource registry.
//!
//! Every engine is a set of free functions taking `&mut Registry` — the
//! registry is injected, never global, so each test runs against its own
//! store.
//!
//! - [`bom`] — memoized bill-of-materials aggregation
//! - [`plan`] — depth-leveled build-plan ordering
//! - [`reverse`] — reverse-dependency index and the rename cascade
//! - [`missing`] — missing-dependency discovery over a closure
//! - [`graph`] — whole-store cycle detection and build ordering (petgraph)

pub mod bom;
pub mod graph;
pub mod missing;
pub mod plan;
pub mod reverse;

pub use bom::{BillOfMaterials, compute_bom};
pub use graph::DependencyGraph;
pub use missing::find_missing;
pub use plan::{PlanEntry, compute_build_plan};
pub use reverse::{ReverseIndex, build_reverse_index, rename};
