//! Global constants used throughout the glean codebase.
//!
//! Centralizing file-name and environment-variable conventions keeps the
//! store layout and configuration discovery in one discoverable place.

/// File extension for persisted resource records.
pub const RESOURCE_FILE_EXTENSION: &str = "json";

/// Application directory name used under the platform data/config dirs.
pub const APP_DIR_NAME: &str = "glean";

/// Subdirectory of the application data dir that holds resource records.
pub const RESOURCES_DIR_NAME: &str = "resources";

/// Global configuration file name (`~/.glean/config.toml`).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the global configuration file path.
pub const CONFIG_ENV_VAR: &str = "GLEAN_CONFIG";

/// Environment variable overriding the resource store directory.
///
/// Takes precedence over both the configuration file and the platform
/// default; only the `--resources-dir` flag outranks it.
pub const RESOURCES_DIR_ENV_VAR: &str = "GLEAN_RESOURCES_DIR";

/// Maximum Levenshtein distance, as a percentage of the looked-up name's
/// length, for a known name to qualify as a "did you mean" suggestion.
pub const SUGGESTION_THRESHOLD_PERCENT: usize = 50;

/// Maximum number of "did you mean" suggestions attached to a not-found error.
pub const MAX_SUGGESTIONS: usize = 3;
