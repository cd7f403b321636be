//! Core error types for taxatree

use thiserror::Error;

/// Main error type for taxonomy operations
#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("There is no node with id '{0}' in this taxonomy")]
    InvalidNode(String),

    #[error("A node with id '{0}' already exists in this taxonomy")]
    DuplicateId(String),

    #[error("Cannot compute a consensus from an empty set of votes")]
    EmptyVoteSet,

    #[error("Consensus threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("Votes do not share a common root")]
    NoConsensus,

    #[error("Cannot relink node '{0}': it has no parent")]
    RootRelink(String),

    #[error("Node '{child}' is not a child of '{parent}'")]
    NotAChild { parent: String, child: String },

    #[error("Taxonomy is empty")]
    EmptyTaxonomy,

    #[error("Lineage of '{0}' does not terminate at a root")]
    CyclicLineage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for taxonomy operations
pub type TaxonomyResult<T> = Result<T, TaxonomyError>;

impl TaxonomyError {
    /// Whether the error reports an id that could not be resolved
    pub fn is_invalid_node(&self) -> bool {
        matches!(self, TaxonomyError::InvalidNode(_))
    }
}
