//! On-disk resource store.
//!
//! One JSON record per resource, stored flat in a single directory as
//! `<name>.json`. The record's identity is its file name; the document only
//! carries the dependency data (`null` for atomic resources, an object of
//! `dependency: quantity` pairs for composites).
//!
//! Missing records are ordinary `Ok(None)` results, never errors: the
//! missing-dependency resolver treats absence as first-class control flow.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::RESOURCE_FILE_EXTENSION;
use crate::core::{DependencyMap, GleanError, Resource};
use crate::utils::fs::{atomic_write_string, ensure_dir};

/// Directory of persisted resource records.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    root: PathBuf,
}

impl ResourceStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record file backing `name`.
    pub fn record_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{RESOURCE_FILE_EXTENSION}"))
    }

    /// Whether a record file exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.record_path(name).is_file()
    }

    /// Load the record for `name`, if one exists.
    ///
    /// A missing file is `Ok(None)`. A file that exists but does not parse as
    /// a record is a [`GleanError::MalformedRecord`].
    pub fn load(&self, name: &str) -> Result<Option<Resource>> {
        let path = self.record_path(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read record: {}", path.display()));
            }
        };

        let record: Option<DependencyMap> =
            serde_json::from_str(&content).map_err(|err| GleanError::MalformedRecord {
                name: name.to_string(),
                reason: err.to_string(),
            })?;

        debug!(resource = name, "loaded record from store");
        Ok(Some(Resource::from_record(name, record)))
    }

    /// Persist a resource's record atomically.
    pub fn save(&self, resource: &Resource) -> Result<()> {
        let path = self.record_path(resource.name());
        let content = serde_json::to_string(&resource.to_record())
            .with_context(|| format!("failed to serialize record for '{}'", resource.name()))?;
        atomic_write_string(&path, &content)?;
        debug!(resource = resource.name(), "saved record to store");
        Ok(())
    }

    /// Remove the record for `name`, returning whether one existed.
    /// Absence is not an error.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let path = self.record_path(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(resource = name, "removed record from store");
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove record: {}", path.display()))
            }
        }
    }

    /// Names of every record in the store, sorted.
    pub fn list_names(&self) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("failed to read store directory: {}", self.root.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RESOURCE_FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.insert(stem.to_string());
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(temp: &TempDir) -> ResourceStore {
        ResourceStore::open(temp.path().join("resources")).unwrap()
    }

    #[test]
    fn test_missing_record_is_none() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        assert!(store.load("Bolt").unwrap().is_none());
        assert!(!store.contains("Bolt"));
    }

    #[test]
    fn test_save_and_load_atomic() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        store.save(&Resource::atomic("Bolt")).unwrap();

        let loaded = store.load("Bolt").unwrap().unwrap();
        assert!(loaded.is_atomic());
        // Record is the explicit null marker
        let raw = fs::read_to_string(store.record_path("Bolt")).unwrap();
        assert_eq!(raw, "null");
    }

    #[test]
    fn test_save_and_load_composite() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        let widget = Resource::composite("Widget", [("Bolt".to_string(), 3)]);
        store.save(&widget).unwrap();

        let loaded = store.load("Widget").unwrap().unwrap();
        assert_eq!(loaded, widget);
    }

    #[test]
    fn test_malformed_record_is_error() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        fs::write(store.record_path("Broken"), "{not json").unwrap();

        let err = store.load("Broken").unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn test_remove_absent_is_ok() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        assert!(!store.remove("Ghost").unwrap());

        store.save(&Resource::atomic("Bolt")).unwrap();
        assert!(store.remove("Bolt").unwrap());
        assert!(!store.contains("Bolt"));
    }

    #[test]
    fn test_list_names_ignores_foreign_files() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        store.save(&Resource::atomic("Bolt")).unwrap();
        store.save(&Resource::atomic("Widget")).unwrap();
        fs::write(store.root().join("notes.txt"), "x").unwrap();

        let names: Vec<_> = store.list_names().unwrap().into_iter().collect();
        assert_eq!(names, vec!["Bolt".to_string(), "Widget".to_string()]);
    }
}
