//! Integration test suite for glean.
//!
//! Drives the `glean` binary end to end against temporary resource stores.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! Tests are organized by functionality area:
//! - **commands**: resource definition, listing, BOM/plan computation,
//!   rename cascades, missing-dependency discovery, cycle auditing

mod commands;
mod common;
