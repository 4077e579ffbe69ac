//! Single-instance resource registry.
//!
//! The [`Registry`] is the process-wide cache over the on-disk
//! [`ResourceStore`]. It guarantees at most one in-memory [`Resource`] per
//! name: every lookup goes through [`Registry::get`], which returns the
//! cached instance or lazily loads the record on first access. Because
//! identity is the name and the arena holds the only instance, an in-place
//! edit of a composite's dependency map is visible through every subsequent
//! lookup of that name.
//!
//! The registry is an owned value injected into the engine functions — there
//! is no global state, so tests run against independent stores.
//!
//! # Deferred persistence
//!
//! Creating or loading a resource does not write anything.
//! [`Registry::flush_all`] persists every cached resource that has no backing
//! record; the CLI invokes it once on the success path of each mutating
//! command, so resources defined during a session are never silently lost.
//! Edits to resources that *do* have a backing record are persisted
//! explicitly via [`Registry::persist`] at the point of the edit.
//!
//! # Unit-BOM memoization
//!
//! The BOM engine memoizes one unit bill of materials per composite resource.
//! Those cache slots live here, keyed by name, so that [`Registry::delete`]
//! and the rename cascade can retire a slot together with its name. The
//! slots are otherwise refreshed only on an explicit `force_refresh` — see
//! [`crate::engine::bom`] for the staleness policy.

pub mod store;

pub use store::ResourceStore;

use anyhow::Result;
use std::collections::HashMap;
use strsim::levenshtein;
use tracing::debug;

use crate::constants::{MAX_SUGGESTIONS, SUGGESTION_THRESHOLD_PERCENT};
use crate::core::{GleanError, Resource, validate_name};
use crate::engine::bom::BillOfMaterials;

/// In-memory arena of resources over a backing store.
#[derive(Debug)]
pub struct Registry {
    store: ResourceStore,
    cache: HashMap<String, Resource>,
    unit_boms: HashMap<String, BillOfMaterials>,
}

impl Registry {
    /// Create a registry over an opened store.
    pub fn new(store: ResourceStore) -> Self {
        Self {
            store,
            cache: HashMap::new(),
            unit_boms: HashMap::new(),
        }
    }

    /// The backing store.
    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Look up a resource by name.
    ///
    /// Returns the cached instance if present; otherwise loads the record
    /// from the store, caches it, and returns it. `Ok(None)` means the name
    /// is unknown both in memory and on disk — callers decide whether that
    /// is an error (the missing-dependency resolver treats it as data).
    pub fn get(&mut self, name: &str) -> Result<Option<&Resource>> {
        if !self.cache.contains_key(name) {
            match self.store.load(name)? {
                Some(resource) => {
                    self.cache.insert(name.to_string(), resource);
                }
                None => return Ok(None),
            }
        }
        Ok(self.cache.get(name))
    }

    /// Mutable variant of [`Registry::get`], for in-place dependency edits.
    pub fn get_mut(&mut self, name: &str) -> Result<Option<&mut Resource>> {
        if !self.cache.contains_key(name) {
            match self.store.load(name)? {
                Some(resource) => {
                    self.cache.insert(name.to_string(), resource);
                }
                None => return Ok(None),
            }
        }
        Ok(self.cache.get_mut(name))
    }

    /// Whether `name` is known, in memory or on disk, without loading it.
    pub fn contains(&self, name: &str) -> bool {
        self.cache.contains_key(name) || self.store.contains(name)
    }

    /// Insert or overwrite the cache entry for `resource.name()`.
    ///
    /// Does not persist; see [`Registry::persist`] and
    /// [`Registry::flush_all`].
    pub fn register(&mut self, resource: Resource) -> Result<()> {
        validate_name(resource.name())?;
        debug!(resource = resource.name(), "registered resource");
        self.cache.insert(resource.name().to_string(), resource);
        Ok(())
    }

    /// Remove the cache entry and backing record for `name`.
    /// Absence of either is not an error. The name's unit-BOM slot is
    /// retired with it.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        self.cache.remove(name);
        self.unit_boms.remove(name);
        self.store.remove(name)?;
        debug!(resource = name, "deleted resource");
        Ok(())
    }

    /// Persist the cached resource under `name` to the store now.
    ///
    /// Errors with [`GleanError::ResourceNotFound`] if nothing is cached
    /// under that name.
    pub fn persist(&mut self, name: &str) -> Result<()> {
        match self.cache.get(name) {
            Some(resource) => self.store.save(resource),
            None => Err(self.not_found(name).into()),
        }
    }

    /// Union of cached names and store record names, sorted.
    pub fn list_names(&self) -> Result<Vec<String>> {
        let mut names = self.store.list_names()?;
        names.extend(self.cache.keys().cloned());
        Ok(names.into_iter().collect())
    }

    /// Known names starting with `prefix`, sorted.
    pub fn complete(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .list_names()?
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .collect())
    }

    /// Persist every cached resource that has no backing store record.
    ///
    /// Invoked once at orderly shutdown; returns the number of records
    /// written.
    pub fn flush_all(&mut self) -> Result<usize> {
        let mut written = 0;
        for resource in self.cache.values() {
            if !self.store.contains(resource.name()) {
                self.store.save(resource)?;
                written += 1;
            }
        }
        if written > 0 {
            debug!(count = written, "flushed unsaved resources");
        }
        Ok(written)
    }

    /// Build a [`GleanError::ResourceNotFound`] for `name`, with nearest
    /// known names attached as a "did you mean" suggestion.
    pub fn not_found(&self, name: &str) -> GleanError {
        let suggestion = self
            .list_names()
            .ok()
            .map(|names| suggest_similar(name, &names))
            .filter(|similar| !similar.is_empty())
            .map(|similar| format!("did you mean {}?", quote_join(&similar)));
        GleanError::ResourceNotFound {
            name: name.to_string(),
            suggestion,
        }
    }

    pub(crate) fn cached_unit_bom(&self, name: &str) -> Option<&BillOfMaterials> {
        self.unit_boms.get(name)
    }

    pub(crate) fn cache_unit_bom(&mut self, name: &str, bom: BillOfMaterials) {
        self.unit_boms.insert(name.to_string(), bom);
    }
}

/// Known names closest to `target` by Levenshtein distance, nearest first.
///
/// Candidates beyond half the target's length are dropped; at most
/// [`MAX_SUGGESTIONS`] survive.
fn suggest_similar(target: &str, known: &[String]) -> Vec<String> {
    let mut scored: Vec<(String, usize)> = known
        .iter()
        .map(|name| (name.clone(), levenshtein(target, name)))
        .collect();
    scored.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= target.len().max(1) * SUGGESTION_THRESHOLD_PERCENT / 100)
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name)
        .collect()
}

fn quote_join(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
