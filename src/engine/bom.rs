//! Bill-of-materials aggregation.
//!
//! [`compute_bom`] answers "how many of each *atomic* resource does it take
//! to produce `quantity` units of this resource?" by recursively folding the
//! dependency tree into a [`BillOfMaterials`].
//!
//! # Memoization and the staleness policy
//!
//! Each composite's *unit* BOM (the totals for quantity 1) is memoized in the
//! registry after its first computation; later queries scale the cached map
//! instead of re-walking the tree. The cache is refreshed only on an explicit
//! `force_refresh` — mutating a dependency's own sub-dependencies does *not*
//! invalidate parents that already cached a unit BOM. That is a deliberate
//! last-writer-wins tradeoff: repeated queries are cheap, and callers that
//! mutate the graph request a refresh when they next care about accuracy.
//!
//! # Cycles
//!
//! The walk carries its recursion path and fails fast with
//! [`GleanError::CircularDependency`] rather than exhausting the stack on a
//! user-edited graph that loops.

use anyhow::Result;
use std::collections::BTreeMap;
use tracing::debug;

use crate::core::GleanError;
use crate::registry::Registry;

/// Totals of atomic resources, keyed by name. A missing key reads as zero.
///
/// Supports the two algebraic operations BOM aggregation needs: scalar
/// multiplication and key-wise merge. Two BOMs are equal iff their mappings
/// are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillOfMaterials {
    totals: BTreeMap<String, u64>,
}

impl BillOfMaterials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total for `name`; zero when absent.
    pub fn get(&self, name: &str) -> u64 {
        self.totals.get(name).copied().unwrap_or(0)
    }

    /// Add `quantity` to the total for `name`.
    pub fn add(&mut self, name: impl Into<String>, quantity: u64) {
        *self.totals.entry(name.into()).or_insert(0) += quantity;
    }

    /// A copy with every total multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: u64) -> Self {
        Self {
            totals: self
                .totals
                .iter()
                .map(|(name, quantity)| (name.clone(), quantity * factor))
                .collect(),
        }
    }

    /// Merge `other` into `self`, scaling `other`'s totals by `factor` on
    /// the way in.
    pub fn merge_scaled(&mut self, other: &Self, factor: u64) {
        for (name, quantity) in &other.totals {
            self.add(name.clone(), quantity * factor);
        }
    }

    /// `(name, total)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.totals.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl FromIterator<(String, u64)> for BillOfMaterials {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            totals: iter.into_iter().collect(),
        }
    }
}

/// Compute the bill of materials for `quantity` units of `name`.
///
/// - Terminal resources (atomic, or composite with no dependencies) map to
///   themselves: `{name: quantity}`.
/// - Composites fold their dependencies' unit BOMs, scaled by the per-unit
///   quantities, then scale the result by `quantity`.
///
/// `force_refresh` recomputes every memoized unit BOM along the walk; see
/// the module docs for the staleness policy.
pub fn compute_bom(
    registry: &mut Registry,
    name: &str,
    quantity: u64,
    force_refresh: bool,
) -> Result<BillOfMaterials> {
    let mut path = Vec::new();
    let unit = unit_bom(registry, name, force_refresh, &mut path)?;
    Ok(unit.scaled(quantity))
}

/// Unit BOM for one unit of `name`, memoizing composite results.
fn unit_bom(
    registry: &mut Registry,
    name: &str,
    force_refresh: bool,
    path: &mut Vec<String>,
) -> Result<BillOfMaterials> {
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
        if resource.is_terminal() {
            return Ok(std::iter::once((name.to_string(), 1)).collect());
        }
        resource
            .dependencies()
            .map(|(dep, qty)| (dep.to_string(), qty))
            .collect::<Vec<_>>()
    };

    if !force_refresh {
        if let Some(cached) = registry.cached_unit_bom(name) {
            debug!(resource = name, "unit BOM cache hit");
            return Ok(cached.clone());
        }
    }

    path.push(name.to_string());
    let mut accumulated = BillOfMaterials::new();
    for (dependency, per_unit) in dependencies {
        let sub = unit_bom(registry, &dependency, force_refresh, path)?;
        accumulated.merge_scaled(&sub, per_unit);
    }
    path.pop();

    registry.cache_unit_bom(name, accumulated.clone());
    Ok(accumulated)
}

/// Render a recursion path plus the re-entered node as `A -> B -> A`.
pub(crate) fn format_cycle(path: &[String], repeated: &str) -> String {
    let start = path
        .iter()
        .position(|name| name == repeated)
        .unwrap_or(0);
    let mut names: Vec<&str> = path[start..].iter().map(String::as_str).collect();
    names.push(repeated);
    names.join(" -> ")
}
