//! Core types for glean.
//!
//! This module holds the two foundations everything else builds on:
//!
//! - [`error`] — the [`GleanError`] enum, the user-facing [`ErrorContext`]
//!   wrapper, and [`user_friendly_error`] for the CLI boundary
//! - [`resource`] — the [`Resource`] model (atomic/composite variants), the
//!   persisted record shape, and name validation
//!
//! Engines and the registry consume these types; nothing here touches the
//! file system.

pub mod error;
pub mod resource;

pub use error::{ErrorContext, GleanError, user_friendly_error};
pub use resource::{DependencyMap, Resource, ResourceKind, validate_name};
