//! Error handling for glean.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`GleanError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable
//!    suggestions at the CLI boundary
//!
//! Engine code returns [`GleanError`] variants through `anyhow::Result`; the
//! binary converts whatever bubbles up with [`user_friendly_error`] and
//! renders it with colors before exiting non-zero.
//!
//! Absence of a resource is ordinarily *not* an error: registry lookups
//! return `Option` and the missing-dependency resolver treats absent names as
//! first-class results. [`GleanError::ResourceNotFound`] is raised only where
//! an operation cannot proceed without the record (BOM and build-plan
//! computation, rename of an unknown resource).
//!
//! # Examples
//!
//! ```rust
//! use glean::core::{GleanError, user_friendly_error};
//!
//! let err = GleanError::CircularDependency {
//!     cycle: "Gear -> Plate -> Gear".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(err));
//! assert!(ctx.suggestion.is_some());
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for glean operations.
#[derive(Error, Debug)]
pub enum GleanError {
    /// A resource name has no in-memory instance and no backing store record.
    ///
    /// `suggestion` carries pre-formatted "did you mean" candidates computed
    /// against the known-name list at the point of failure (the registry has
    /// the names; the display layer does not).
    #[error("resource '{name}' is not defined")]
    ResourceNotFound {
        name: String,
        suggestion: Option<String>,
    },

    /// Refusing to overwrite an existing record (rename target collision).
    #[error("resource '{name}' already exists")]
    ResourceExists { name: String },

    /// Resource names double as store keys and are validated on entry.
    #[error("invalid resource name '{name}': {reason}")]
    InvalidResourceName { name: String, reason: String },

    /// A dependency walk re-entered a resource already on the recursion path.
    #[error("circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    /// A store record exists but does not parse as a resource record.
    #[error("malformed record for resource '{name}': {reason}")]
    MalformedRecord { name: String, reason: String },

    /// A rename cascade stopped partway: some parents now reference the new
    /// name, the rest still reference the old one. Re-running the rename
    /// finishes the job (already-updated parents no longer match the old
    /// key and are skipped).
    #[error(
        "rename of '{old}' to '{new}' interrupted while updating '{failed_parent}' \
         (updated: [{updated}]; still pending: [{pending}])"
    )]
    RenameIncomplete {
        old: String,
        new: String,
        failed_parent: String,
        /// Comma-joined parents persisted before the failure.
        updated: String,
        /// Comma-joined parents not yet rewritten.
        pending: String,
    },

    /// File system operation failed.
    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),

    /// Global configuration file failed to parse.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// User-friendly error wrapper with optional suggestion and details.
///
/// Rendered by the CLI on stderr: the error line in red, details in yellow,
/// the suggestion in green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying glean error.
    pub error: GleanError,
    /// Optional actionable step for resolving the error.
    pub suggestion: Option<String>,
    /// Optional additional context about why the error occurred.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no suggestion or details.
    #[must_use]
    pub const fn new(error: GleanError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion (displayed in green).
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add explanatory details (displayed in yellow).
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details, and suggestion to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with contextual suggestions.
///
/// Known [`GleanError`] variants get targeted suggestions; everything else
/// falls back to a generic message built from the error chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    match error.downcast::<GleanError>() {
        Ok(glean_error) => create_error_context(glean_error),
        Err(other) => ErrorContext::new(GleanError::Io(std::io::Error::other(format!(
            "{other:#}"
        ))))
        .with_suggestion("Run with RUST_LOG=debug for more detail"),
    }
}

fn create_error_context(error: GleanError) -> ErrorContext {
    match &error {
        GleanError::ResourceNotFound { suggestion, .. } => {
            let hint = suggestion.clone().unwrap_or_else(|| {
                "Run 'glean list' to see known resources, or 'glean add' to define it".to_string()
            });
            ErrorContext::new(error).with_suggestion(hint)
        }
        GleanError::ResourceExists { name } => {
            let details = format!("a record for '{name}' is already in the store");
            ErrorContext::new(error)
                .with_suggestion("Remove the existing resource first, or pick a different name")
                .with_details(details)
        }
        GleanError::CircularDependency { .. } => ErrorContext::new(error)
            .with_suggestion("Remove one edge of the cycle with 'glean add' before recomputing")
            .with_details("a resource cannot require itself, directly or transitively"),
        GleanError::RenameIncomplete { .. } => ErrorContext::new(error)
            .with_suggestion("Re-run the rename to finish updating the remaining parents"),
        GleanError::MalformedRecord { name, .. } => {
            let details = format!("the stored document for '{name}' is not valid JSON of the expected shape");
            ErrorContext::new(error)
                .with_suggestion("Fix or delete the record file and re-create the resource")
                .with_details(details)
        }
        GleanError::InvalidResourceName { .. } => ErrorContext::new(error)
            .with_suggestion("Resource names must be non-empty and free of path separators"),
        _ => ErrorContext::new(error),
    }
}
