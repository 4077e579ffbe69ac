//! Reverse-dependency index and the rename cascade.
//!
//! The index maps a resource name to the composite resources that directly
//! depend on it. It is built on demand by scanning every known resource —
//! O(total dependency edges) — and is rebuilt fresh for each rename rather
//! than maintained incrementally.
//!
//! # Rename semantics
//!
//! [`rename`] rewrites the `old` key to `new` (same quantity) in every parent
//! found by the index, persisting each parent as it goes, then establishes
//! the record under the new name and finally retires the old one. The
//! cascade is **not** atomic across record files: a persistence failure
//! partway through leaves some parents updated and the rest untouched. That
//! state is surfaced as [`GleanError::RenameIncomplete`] naming both groups,
//! and re-running the rename completes the job (parents already rewritten no
//! longer carry the old key and drop out of the index).

use anyhow::Result;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::core::{GleanError, validate_name};
use crate::registry::Registry;

/// Mapping from resource name to the names of composites that directly
/// depend on it.
#[derive(Debug, Default)]
pub struct ReverseIndex {
    parents: BTreeMap<String, Vec<String>>,
}

impl ReverseIndex {
    /// Names of composites whose dependency map contains `name`, in name
    /// order.
    pub fn parents_of(&self, name: &str) -> &[String] {
        self.parents.get(name).map_or(&[], Vec::as_slice)
    }

    /// Iterate `(dependency name, parent names)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.parents
            .iter()
            .map(|(name, parents)| (name.as_str(), parents.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Build the reverse-dependency index over every known resource.
///
/// Dependency names that have no backing record still get index entries —
/// their parents reference them, which is exactly what a rename of a
/// yet-undefined dependency needs to rewrite.
pub fn build_reverse_index(registry: &mut Registry) -> Result<ReverseIndex> {
    let mut index = ReverseIndex::default();
    for name in registry.list_names()? {
        let Some(resource) = registry.get(&name)? else {
            // Listed names load unless the store changed underneath us.
            warn!(resource = %name, "listed resource vanished during index build");
            continue;
        };
        let dependencies: Vec<String> = resource
            .dependencies()
            .map(|(dep, _)| dep.to_string())
            .collect();
        for dependency in dependencies {
            index.parents.entry(dependency).or_default().push(name.clone());
        }
    }
    Ok(index)
}

/// Rename `old` to `new`, cascading through every referencing parent.
///
/// Fails up front when `old` is unknown, `new` is invalid, or `new` already
/// exists. See the module docs for partial-failure behavior.
pub fn rename(registry: &mut Registry, old: &str, new: &str) -> Result<()> {
    validate_name(new)?;
    if old == new {
        return Ok(());
    }
    if registry.get(old)?.is_none() {
        return Err(registry.not_found(old).into());
    }
    if registry.contains(new) {
        return Err(GleanError::ResourceExists {
            name: new.to_string(),
        }
        .into());
    }

    let index = build_reverse_index(registry)?;
    let parents: Vec<String> = index.parents_of(old).to_vec();
    debug!(old, new, parents = parents.len(), "starting rename cascade");

    let mut updated: Vec<String> = Vec::new();
    for (position, parent) in parents.iter().enumerate() {
        let result = rewrite_parent(registry, parent, old, new);
        if let Err(err) = result {
            let pending = parents[position..].join(", ");
            return Err(err.context(GleanError::RenameIncomplete {
                old: old.to_string(),
                new: new.to_string(),
                failed_parent: parent.clone(),
                updated: updated.join(", "),
                pending,
            }));
        }
        updated.push(parent.clone());
    }

    // Establish the new record before retiring the old name, so a crash in
    // between leaves both rather than neither.
    let mut renamed = registry
        .get(old)?
        .cloned()
        .ok_or_else(|| registry.not_found(old))?;
    renamed.set_name(new);
    registry.register(renamed)?;
    registry.persist(new)?;
    registry.delete(old)?;

    debug!(old, new, "rename cascade complete");
    Ok(())
}

fn rewrite_parent(registry: &mut Registry, parent: &str, old: &str, new: &str) -> Result<()> {
    {
        let resource = registry
            .get_mut(parent)?
            .ok_or_else(|| registry_missing_parent(parent))?;
        resource.replace_dependency(old, new);
    }
    registry.persist(parent)
}

fn registry_missing_parent(parent: &str) -> anyhow::Error {
    GleanError::ResourceNotFound {
        name: parent.to_string(),
        suggestion: None,
    }
    .into()
}
