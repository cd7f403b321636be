//! Weighted consensus and lowest common ancestor.
//!
//! Every vote counts for the node it names and for each of that node's
//! ancestors. Starting from the root, the descent moves into a child as long
//! as that child's share of the votes reaches the threshold. With a
//! threshold above one half at most one child can qualify per step; at or
//! below one half the first qualifying child in insertion order wins.
//!
//! When the votes fall into several disjoint trees, the descent starts from
//! the root with the highest score among those meeting the threshold.

use super::{Node, NodeKind, Taxonomy};
use indexmap::IndexMap;
use std::collections::HashMap;
use taxatree_core::config::ConsensusConfig;
use taxatree_core::{TaxonomyError, TaxonomyResult};
use tracing::{debug, trace};

/// Parameters of a consensus query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsensusOptions {
    /// Minimal share of votes, in `(0, 1]`
    pub threshold: f64,
    /// Drop unknown ids instead of failing
    pub ignore_missing: bool,
}

impl Default for ConsensusOptions {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            ignore_missing: false,
        }
    }
}

impl ConsensusOptions {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn ignore_missing(mut self, ignore: bool) -> Self {
        self.ignore_missing = ignore;
        self
    }

    fn validate(&self) -> TaxonomyResult<()> {
        // Written so that NaN is rejected too
        if self.threshold > 0.0 && self.threshold <= 1.0 {
            Ok(())
        } else {
            Err(TaxonomyError::InvalidThreshold(self.threshold))
        }
    }
}

impl From<&ConsensusConfig> for ConsensusOptions {
    fn from(config: &ConsensusConfig) -> Self {
        Self {
            threshold: config.threshold,
            ignore_missing: config.ignore_missing,
        }
    }
}

impl Taxonomy {
    /// Deepest node gathering at least `threshold` of the votes in `ids`.
    ///
    /// Repeated ids count as separate votes. Fails with
    /// [`TaxonomyError::InvalidNode`] on an unknown id.
    pub fn consensus<S: AsRef<str>>(&self, ids: &[S], threshold: f64) -> TaxonomyResult<&Node> {
        self.consensus_with(ids, &ConsensusOptions::new(threshold))
    }

    /// Lowest common ancestor of `ids`, i.e. a consensus at threshold 1
    pub fn lca<S: AsRef<str>>(&self, ids: &[S]) -> TaxonomyResult<&Node> {
        self.consensus(ids, 1.0)
    }

    /// Consensus with explicit options.
    ///
    /// The result is never a placeholder: a descent ending on one reports
    /// its nearest real ancestor instead.
    pub fn consensus_with<S: AsRef<str>>(
        &self,
        ids: &[S],
        options: &ConsensusOptions,
    ) -> TaxonomyResult<&Node> {
        options.validate()?;

        let votes = self.tally(ids, options.ignore_missing)?;
        let total: usize = votes.values().sum();
        if total == 0 {
            return Err(TaxonomyError::EmptyVoteSet);
        }

        let (roots, scores) = self.scores(&votes)?;
        let meets = |score: usize| score as f64 / total as f64 >= options.threshold;

        // Best scoring root; ties go to the root seen first among the votes
        let mut start: Option<(&Node, usize)> = None;
        for root in roots {
            let score = scores.get(root.id()).copied().unwrap_or(0);
            if meets(score) && start.map_or(true, |(_, best)| score > best) {
                start = Some((root, score));
            }
        }
        let (root, _) = start.ok_or(TaxonomyError::NoConsensus)?;

        let mut current = root;
        while let Some(next) = current
            .children()
            .find(|child| scores.get(child).is_some_and(|&s| meets(s)))
        {
            trace!(from = %current.id(), to = %next, "descending");
            current = self.node(next)?;
        }

        let result = self.nearest_real(current)?;
        debug!(
            votes = total,
            threshold = options.threshold,
            result = %result.id(),
            "consensus resolved"
        );
        Ok(result)
    }

    /// Resolve ids into vote counts per canonical id
    fn tally<S: AsRef<str>>(
        &self,
        ids: &[S],
        ignore_missing: bool,
    ) -> TaxonomyResult<IndexMap<&str, usize>> {
        let mut votes: IndexMap<&str, usize> = IndexMap::new();
        for id in ids {
            match self.resolve(id.as_ref()) {
                Ok(key) => *votes.entry(key).or_insert(0) += 1,
                Err(TaxonomyError::InvalidNode(missing)) if ignore_missing => {
                    trace!(id = %missing, "ignoring unknown id");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(votes)
    }

    /// Accumulate votes along every lineage.
    ///
    /// Also returns the distinct roots reached, in order of first vote.
    fn scores<'s>(
        &'s self,
        votes: &IndexMap<&str, usize>,
    ) -> TaxonomyResult<(Vec<&'s Node>, HashMap<&'s str, usize>)> {
        let mut scores: HashMap<&str, usize> = HashMap::new();
        let mut roots: Vec<&Node> = Vec::new();

        for (id, count) in votes {
            let lineage = self.lineage(id)?;
            for node in &lineage {
                *scores.entry(node.id()).or_insert(0) += count;
            }
            if let Some(root) = lineage.root() {
                if !roots.iter().any(|r| r.id() == root.id()) {
                    roots.push(root);
                }
            }
        }

        if roots.is_empty() {
            return Err(TaxonomyError::EmptyVoteSet);
        }
        Ok((roots, scores))
    }

    fn nearest_real<'s>(&'s self, node: &'s Node) -> TaxonomyResult<&'s Node> {
        let mut current = node;
        while let NodeKind::Placeholder = current.kind() {
            match current.parent() {
                Some(parent) => current = self.node(parent)?,
                None => break,
            }
        }
        Ok(current)
    }
}
