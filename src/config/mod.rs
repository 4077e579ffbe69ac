//! Global configuration.
//!
//! Glean keeps one small optional TOML file, by default at
//! `~/.glean/config.toml`:
//!
//! ```toml
//! # Where resource records live (defaults to the platform data dir)
//! resources_dir = "/srv/crafting/resources"
//! ```
//!
//! Discovery order for the resource store directory:
//! 1. `--resources-dir` CLI flag
//! 2. `GLEAN_RESOURCES_DIR` environment variable
//! 3. `resources_dir` in the config file
//! 4. `<platform data dir>/glean/resources`
//!
//! A missing config file is not an error — it yields the defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    APP_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME, RESOURCES_DIR_ENV_VAR, RESOURCES_DIR_NAME,
};
use crate::core::GleanError;

/// Contents of the global configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Resource store directory override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources_dir: Option<PathBuf>,
}

impl GlobalConfig {
    /// Default configuration file path.
    ///
    /// Honors the `GLEAN_CONFIG` environment variable, otherwise
    /// `~/.glean/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        dirs::home_dir()
            .map(|home| home.join(format!(".{APP_DIR_NAME}")).join(CONFIG_FILE_NAME))
            .context("could not determine home directory")
    }

    /// Load from the default path; a missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read config: {}", path.display()));
            }
        };
        let config = toml::from_str(&content).map_err(GleanError::ConfigParse)?;
        Ok(config)
    }

    /// Resolve the resource store directory (see module docs for priority).
    pub fn resources_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(RESOURCES_DIR_ENV_VAR) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = &self.resources_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|data| data.join(APP_DIR_NAME).join(RESOURCES_DIR_NAME))
            .context("could not determine platform data directory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = GlobalConfig::load_from(&temp.path().join("nope.toml")).unwrap();
        assert!(config.resources_dir.is_none());
    }

    #[test]
    fn test_load_resources_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "resources_dir = \"/tmp/crafting\"\n").unwrap();

        let config = GlobalConfig::load_from(&path).unwrap();
        assert_eq!(
            config.resources_dir,
            Some(PathBuf::from("/tmp/crafting"))
        );
    }

    #[test]
    fn test_malformed_config_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "resources_dir = [not toml").unwrap();
        assert!(GlobalConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_config_file_dir_takes_effect() {
        let config = GlobalConfig {
            resources_dir: Some(PathBuf::from("/srv/resources")),
        };
        // Env override wins over the file when set, so only assert the
        // file-backed path when the variable is absent.
        if std::env::var(RESOURCES_DIR_ENV_VAR).is_err() {
            assert_eq!(
                config.resources_dir().unwrap(),
                PathBuf::from("/srv/resources")
            );
        }
    }
}
