//! Core utilities and types shared across all taxatree crates

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{default_ranks, load_config, save_config, Config};
pub use error::{TaxonomyError, TaxonomyResult};
