//! Resource model for glean.
//!
//! A resource is the unit the tracker reasons about: either *atomic* (no
//! further breakdown, a leaf of every dependency tree) or *composite* (built
//! from a weighted list of other resources). A resource's identity is its
//! name; all graph edges are name references resolved through the
//! [`Registry`](crate::registry::Registry), never duplicated copies.
//!
//! # Record format
//!
//! Each resource persists as one JSON document keyed by its file name:
//! - Atomic: the literal `null`
//! - Composite: an object mapping dependency name to positive per-unit
//!   quantity, e.g. `{"Bolt": 4, "Widget": 2}`
//!
//! The name is derived from the storage key and never stored redundantly
//! inside the document.
//!
//! # Examples
//!
//! ```rust
//! use glean::core::{Resource, ResourceKind};
//!
//! let bolt = Resource::atomic("Bolt");
//! assert!(bolt.is_atomic());
//!
//! let mut widget = Resource::composite("Widget", [("Bolt".to_string(), 3)]);
//! assert_eq!(widget.dependency_quantity("Bolt"), Some(3));
//!
//! widget.set_dependency("Plate", 1);
//! assert_eq!(widget.dependencies().count(), 2);
//! ```

use std::collections::BTreeMap;

use crate::core::GleanError;

/// Per-unit dependency mapping of a composite resource.
///
/// Keys are dependency resource names (unique), values are positive
/// quantities required per unit of the parent. A `BTreeMap` keeps iteration
/// deterministic; insertion order is irrelevant to the model.
pub type DependencyMap = BTreeMap<String, u64>;

/// The two resource variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    /// No further breakdown; terminal node of any dependency tree.
    Atomic,
    /// Built from a weighted list of other resources.
    Composite(DependencyMap),
}

/// A named crafting resource.
///
/// Identity is the name: the registry guarantees at most one in-memory
/// instance per name, so in-place mutation of a composite's dependency map is
/// visible through every lookup of that name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    name: String,
    kind: ResourceKind,
}

impl Resource {
    /// Create an atomic resource.
    pub fn atomic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ResourceKind::Atomic,
        }
    }

    /// Create a composite resource from `(dependency, per-unit quantity)`
    /// pairs. An empty list is permitted; such a resource behaves like an
    /// atomic node in BOM terms until dependencies are added.
    pub fn composite(
        name: impl Into<String>,
        dependencies: impl IntoIterator<Item = (String, u64)>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ResourceKind::Composite(dependencies.into_iter().collect()),
        }
    }

    /// Rebuild a resource from its persisted record.
    ///
    /// `None` (the JSON `null` record) is the explicit "no dependencies"
    /// marker of an atomic resource; a map is a composite's dependency list.
    pub fn from_record(name: impl Into<String>, record: Option<DependencyMap>) -> Self {
        match record {
            None => Self::atomic(name),
            Some(map) => Self {
                name: name.into(),
                kind: ResourceKind::Composite(map),
            },
        }
    }

    /// The persisted form of this resource (see module docs).
    pub fn to_record(&self) -> Option<&DependencyMap> {
        match &self.kind {
            ResourceKind::Atomic => None,
            ResourceKind::Composite(map) => Some(map),
        }
    }

    /// Resource name (the identity).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Which variant this resource is.
    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self.kind, ResourceKind::Atomic)
    }

    /// True when the resource breaks down no further: atomic, or a composite
    /// with an empty dependency list.
    pub fn is_terminal(&self) -> bool {
        match &self.kind {
            ResourceKind::Atomic => true,
            ResourceKind::Composite(map) => map.is_empty(),
        }
    }

    /// Iterate `(dependency name, per-unit quantity)` pairs in name order.
    /// Empty for atomic resources.
    pub fn dependencies(&self) -> impl Iterator<Item = (&str, u64)> {
        let map = match &self.kind {
            ResourceKind::Atomic => None,
            ResourceKind::Composite(map) => Some(map),
        };
        map.into_iter()
            .flatten()
            .map(|(name, qty)| (name.as_str(), *qty))
    }

    /// Per-unit quantity of a direct dependency, if present.
    pub fn dependency_quantity(&self, dependency: &str) -> Option<u64> {
        match &self.kind {
            ResourceKind::Atomic => None,
            ResourceKind::Composite(map) => map.get(dependency).copied(),
        }
    }

    /// Insert or update a dependency entry. An atomic resource becomes a
    /// composite on its first dependency (the editing workflow's "add a
    /// dependency" action).
    pub fn set_dependency(&mut self, dependency: impl Into<String>, quantity: u64) {
        match &mut self.kind {
            ResourceKind::Atomic => {
                let mut map = DependencyMap::new();
                map.insert(dependency.into(), quantity);
                self.kind = ResourceKind::Composite(map);
            }
            ResourceKind::Composite(map) => {
                map.insert(dependency.into(), quantity);
            }
        }
    }

    /// Remove a dependency entry, returning its quantity if it was present.
    pub fn remove_dependency(&mut self, dependency: &str) -> Option<u64> {
        match &mut self.kind {
            ResourceKind::Atomic => None,
            ResourceKind::Composite(map) => map.remove(dependency),
        }
    }

    /// Re-key a dependency entry from `old` to `new`, keeping its quantity.
    ///
    /// Returns the moved quantity, or `None` when `old` is not a dependency.
    /// Used by the rename cascade.
    pub fn replace_dependency(&mut self, old: &str, new: impl Into<String>) -> Option<u64> {
        let quantity = self.remove_dependency(old)?;
        self.set_dependency(new, quantity);
        Some(quantity)
    }

    /// Change this resource's own name. The caller (the rename cascade) is
    /// responsible for keeping the registry and store consistent.
    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validate a resource name for use as a store key.
///
/// Names are non-empty and must not smuggle path components, since the store
/// derives the record file name from them.
pub fn validate_name(name: &str) -> Result<(), GleanError> {
    let reason = if name.is_empty() {
        Some("name must not be empty")
    } else if name.contains(['/', '\\']) {
        Some("name must not contain path separators")
    } else if name == "." || name == ".." {
        Some("name must not be a relative path component")
    } else if name.starts_with('.') {
        Some("name must not start with '.'")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(GleanError::InvalidResourceName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
