//! Build-plan computation.
//!
//! [`compute_build_plan`] produces one entry per distinct resource reachable
//! from the root — composites included, unlike the BOM — ordered so that
//! deeper dependencies come before the resources that need them.
//!
//! Two maps drive the traversal: per-resource totals accumulated across
//! *every* path that reaches the resource, and the maximum depth at which the
//! resource has been seen on any path. A resource needed both directly and as
//! a deep sub-component sorts by its deepest occurrence, approximating a
//! bottom-up construction order. Ties within a level break by name so output
//! is reproducible.
//!
//! This is a per-level heuristic, not a full topological sort; `glean check`
//! audits the whole graph when a strict ordering matters.

use anyhow::Result;
use std::collections::HashMap;

use crate::core::GleanError;
use crate::engine::bom::format_cycle;
use crate::registry::Registry;

/// One step of a build plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Resource to produce.
    pub name: String,
    /// Total quantity needed, summed across all paths reaching the resource.
    pub total: u64,
    /// Deepest level at which the resource was encountered (root = 0).
    pub level: usize,
}

/// Compute the ordered build plan for `quantity` units of `name`.
///
/// Entries are sorted deepest level first, then by name.
pub fn compute_build_plan(
    registry: &mut Registry,
    name: &str,
    quantity: u64,
) -> Result<Vec<PlanEntry>> {
    let mut totals: HashMap<String, u64> = HashMap::new();
    let mut levels: HashMap<String, usize> = HashMap::new();
    let mut path = Vec::new();
    walk(registry, name, quantity, 0, &mut totals, &mut levels, &mut path)?;

    let mut entries: Vec<PlanEntry> = totals
        .into_iter()
        .map(|(name, total)| {
            let level = levels[&name];
            PlanEntry { name, total, level }
        })
        .collect();
    entries.sort_by(|a, b| b.level.cmp(&a.level).then_with(|| a.name.cmp(&b.name)));
    Ok(entries)
}

fn walk(
    registry: &mut Registry,
    name: &str,
    quantity: u64,
    level: usize,
    totals: &mut HashMap<String, u64>,
    levels: &mut HashMap<String, usize>,
    path: &mut Vec<String>,
) -> Result<()> {
    if path.iter().any(|seen| seen == name) {
        return Err(GleanError::CircularDependency {
            cycle: format_cycle(path, name),
        }
        .into());
    }

    let dependencies = {
        let resource = match registry.get(name)? {
            Some(resource) => resource,
            None => return Err(registry.not_found(name).into()),
        };
        resource
            .dependencies()
            .map(|(dep, qty)| (dep.to_string(), qty))
            .collect::<Vec<_>>()
    };

    *totals.entry(name.to_string()).or_insert(0) += quantity;
    levels
        .entry(name.to_string())
        .and_modify(|deepest| *deepest = (*deepest).max(level))
        .or_insert(level);

    path.push(name.to_string());
    for (dependency, per_unit) in dependencies {
        walk(
            registry,
            &dependency,
            per_unit * quantity,
            level + 1,
            totals,
            levels,
            path,
        )?;
    }
    path.pop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Resource;
    use crate::registry::ResourceStore;
    use tempfile::TempDir;

    fn gadget_registry(temp: &TempDir) -> Registry {
        let mut registry =
            Registry::new(ResourceStore::open(temp.path().join("resources")).unwrap());
        registry.register(Resource::atomic("Bolt")).unwrap();
        registry
            .register(Resource::composite("Widget", [("Bolt".to_string(), 3)]))
            .unwrap();
        registry
            .register(Resource::composite(
                "Gadget",
                [("Widget".to_string(), 2), ("Bolt".to_string(), 4)],
            ))
            .unwrap();
        registry
    }

    #[test]
    fn test_gadget_scenario_ordering() {
        // Bolt is reached at level 1 (direct) and level 2 (via Widget):
        // deepest wins, so Bolt leads the plan with 2*3 + 4 = 10 total.
        let temp = TempDir::new().unwrap();
        let mut registry = gadget_registry(&temp);
        let plan = compute_build_plan(&mut registry, "Gadget", 1).unwrap();

        let summary: Vec<(&str, u64, usize)> = plan
            .iter()
            .map(|entry| (entry.name.as_str(), entry.total, entry.level))
            .collect();
        assert_eq!(
            summary,
            vec![("Bolt", 10, 2), ("Widget", 2, 1), ("Gadget", 1, 0)]
        );
    }

    #[test]
    fn test_quantity_scales_every_entry() {
        let temp = TempDir::new().unwrap();
        let mut registry = gadget_registry(&temp);
        let plan = compute_build_plan(&mut registry, "Gadget", 3).unwrap();
        let totals: HashMap<&str, u64> = plan
            .iter()
            .map(|entry| (entry.name.as_str(), entry.total))
            .collect();
        assert_eq!(totals["Gadget"], 3);
        assert_eq!(totals["Widget"], 6);
        assert_eq!(totals["Bolt"], 30);
    }

    #[test]
    fn test_completeness_one_entry_per_resource() {
        let temp = TempDir::new().unwrap();
        let mut registry = gadget_registry(&temp);
        let plan = compute_build_plan(&mut registry, "Gadget", 1).unwrap();
        let mut names: Vec<_> = plan.iter().map(|entry| entry.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), plan.len());
        assert_eq!(names, vec!["Bolt", "Gadget", "Widget"]);
    }

    #[test]
    fn test_deeper_levels_strictly_precede_shallower() {
        let temp = TempDir::new().unwrap();
        let mut registry = gadget_registry(&temp);
        let plan = compute_build_plan(&mut registry, "Gadget", 2).unwrap();
        for pair in plan.windows(2) {
            assert!(pair[0].level >= pair[1].level);
        }
    }

    #[test]
    fn test_ties_break_by_name() {
        let temp = TempDir::new().unwrap();
        let mut registry =
            Registry::new(ResourceStore::open(temp.path().join("resources")).unwrap());
        registry.register(Resource::atomic("Zinc")).unwrap();
        registry.register(Resource::atomic("Copper")).unwrap();
        registry
            .register(Resource::composite(
                "Brass",
                [("Zinc".to_string(), 1), ("Copper".to_string(), 2)],
            ))
            .unwrap();

        let plan = compute_build_plan(&mut registry, "Brass", 1).unwrap();
        let names: Vec<&str> = plan.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Copper", "Zinc", "Brass"]);
    }

    #[test]
    fn test_atomic_root_is_a_single_entry() {
        let temp = TempDir::new().unwrap();
        let mut registry = gadget_registry(&temp);
        let plan = compute_build_plan(&mut registry, "Bolt", 6).unwrap();
        assert_eq!(
            plan,
            vec![PlanEntry {
                name: "Bolt".to_string(),
                total: 6,
                level: 0
            }]
        );
    }

    #[test]
    fn test_cycle_fails_fast() {
        let temp = TempDir::new().unwrap();
        let mut registry = gadget_registry(&temp);
        registry
            .register(Resource::composite("Gear", [("Plate".to_string(), 1)]))
            .unwrap();
        registry
            .register(Resource::composite("Plate", [("Gear".to_string(), 2)]))
            .unwrap();
        assert!(compute_build_plan(&mut registry, "Gear", 1).is_err());
    }

    #[test]
    fn test_missing_dependency_is_error() {
        let temp = TempDir::new().unwrap();
        let mut registry = gadget_registry(&temp);
        registry
            .register(Resource::composite("Broken", [("Ghost".to_string(), 1)]))
            .unwrap();
        assert!(compute_build_plan(&mut registry, "Broken", 1).is_err());
    }
}
