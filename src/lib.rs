//! Ranked taxonomy trees with weighted consensus, pruning and rank filtering

pub mod taxonomy;

pub use crate::taxonomy::{ConsensusOptions, Lineage, NewickLabel, Node, NodeKind, Taxonomy};
pub use taxatree_core::config::{ConsensusConfig, FilterConfig};
pub use taxatree_core::{Config, TaxonomyError, TaxonomyResult};
