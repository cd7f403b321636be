//! Test utilities for the taxatree workspace
//!
//! Shared fixtures and assertions for the integration tests and benchmarks
//! of the taxatree crates.
//!
//! # Features
//!
//! - **Fixtures**: the reference trees used throughout the test suite and a
//!   seeded random tree generator
//! - **Assertions**: structural checks on parent/child links and lineages

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::{assert_links_consistent, assert_lineages_within, assert_real_node};
pub use fixtures::{filter_example_taxonomy, random_taxonomy, reference_taxonomy, taxonomy_from_parents};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};

/// Initialize test logging (safe to call from every test)
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(taxatree_core::logging::env_filter(
            &taxatree_core::config::LoggingConfig::default(),
        ))
        .with_test_writer()
        .try_init();
}
