//! Missing-dependency discovery.
//!
//! Before a BOM or build plan can be computed, every name in the root's
//! dependency closure needs a backing record. [`find_missing`] walks that
//! closure depth-first and reports the names that fail to load, in discovery
//! order, each once. Absence is data here, not an error: the caller hands
//! the list to the creation workflow, defines each name, and re-invokes
//! discovery to confirm the closure is complete.
//!
//! When the *root* itself is absent, discovery stops immediately and reports
//! only the root — its dependencies cannot even be inspected until the root
//! exists.
//!
//! A seen set keeps the walk linear over shared subtrees and safe on cyclic
//! graphs (a cycle is not this module's concern; the computation engines
//! reject it with a descriptive error).

use anyhow::Result;
use std::collections::HashSet;

use crate::registry::Registry;

/// Names in `root`'s dependency closure that have no backing record, in
/// depth-first discovery order. Empty means the closure is complete.
pub fn find_missing(registry: &mut Registry, root: &str) -> Result<Vec<String>> {
    let mut missing = Vec::new();
    let mut seen = HashSet::new();
    visit(registry, root, &mut missing, &mut seen)?;
    Ok(missing)
}

fn visit(
    registry: &mut Registry,
    name: &str,
    missing: &mut Vec<String>,
    seen: &mut HashSet<String>,
) -> Result<()> {
    if !seen.insert(name.to_string()) {
        return Ok(());
    }

    let dependencies = match registry.get(name)? {
        None => {
            // Discovery stops below an absent node
            missing.push(name.to_string());
            return Ok(());
        }
        Some(resource) => resource
            .dependencies()
            .map(|(dep, _)| dep.to_string())
            .collect::<Vec<_>>(),
    };

    for dependency in dependencies {
        visit(registry, &dependency, missing, seen)?;
    }
    Ok(())
}
