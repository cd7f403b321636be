//! Ranked taxonomy trees.
//!
//! A [`Taxonomy`] owns every [`Node`] in an index keyed by id. Nodes refer to
//! their parent and children by id, so structural edits (relinking, pruning,
//! placeholder insertion) are rewrites of that index rather than pointer
//! surgery. Queries borrow the taxonomy immutably; editors take `&mut self`
//! and have copying counterparts that leave the original untouched.
//!
//! # Example
//! ```
//! use taxatree::taxonomy::{Node, Taxonomy};
//!
//! let tax = Taxonomy::from_list(vec![
//!     Node::new("1", "root", "root"),
//!     Node::new("11", "node11", "middle").with_parent("1"),
//!     Node::new("12", "node12", "middle").with_parent("1"),
//!     Node::new("111", "node111", "leaf").with_parent("11"),
//! ])
//! .unwrap();
//!
//! assert_eq!(tax.lca(&["111", "12"]).unwrap().id(), "1");
//! assert_eq!(tax.distance("111", "12").unwrap(), 3);
//! ```

pub mod consensus;
pub mod filter;
pub mod lineage;
pub mod newick;
pub mod node;
pub mod prune;
pub mod query;

pub use consensus::ConsensusOptions;
pub use lineage::Lineage;
pub use newick::NewickLabel;
pub use node::{Node, NodeKind};

use indexmap::IndexMap;
use std::collections::HashMap;
use taxatree_core::{TaxonomyError, TaxonomyResult};
use tracing::trace;

const DEFAULT_DUMMY_PREFIX: &str = "dummy";

/// Indexed collection of taxonomy nodes sharing a single root
#[derive(Debug, Clone)]
pub struct Taxonomy {
    nodes: IndexMap<String, Node>,
    /// name -> id, latest registration wins
    names: HashMap<String, String>,
    /// merged (retired) id -> replacement id
    merged: HashMap<String, String>,
    /// parent id -> children added before their parent
    pending: HashMap<String, Vec<String>>,
    dummy_prefix: String,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            nodes: IndexMap::new(),
            names: HashMap::new(),
            merged: HashMap::new(),
            pending: HashMap::new(),
            dummy_prefix: DEFAULT_DUMMY_PREFIX.to_string(),
        }
    }
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `prefix` for the ids of placeholders created by editors
    pub fn with_dummy_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.dummy_prefix = prefix.into();
        self
    }

    pub fn dummy_prefix(&self) -> &str {
        &self.dummy_prefix
    }

    /// Build a taxonomy from nodes whose parent ids are already set.
    ///
    /// Order does not matter: children listed before their parent are
    /// attached once the parent arrives. Connectivity is not checked here;
    /// a missing ancestor surfaces as [`TaxonomyError::InvalidNode`] from the
    /// first query that walks through it.
    pub fn from_list<I>(nodes: I) -> TaxonomyResult<Self>
    where
        I: IntoIterator<Item = Node>,
    {
        let mut tax = Self::new();
        for node in nodes {
            tax.add_node(node)?;
        }
        Ok(tax)
    }

    /// Insert a node and register it in its parent's child set.
    ///
    /// A node naming itself as parent is treated as a root.
    pub fn add_node(&mut self, mut node: Node) -> TaxonomyResult<()> {
        if self.nodes.contains_key(&node.id) || self.merged.contains_key(&node.id) {
            return Err(TaxonomyError::DuplicateId(node.id));
        }

        let id = node.id.clone();
        if node.parent.as_deref() == Some(id.as_str()) {
            node.parent = None;
        }

        node.children.clear();
        if let Some(waiting) = self.pending.remove(&id) {
            node.children.extend(waiting);
        }

        if let Some(parent_id) = &node.parent {
            match self.nodes.get_mut(parent_id) {
                Some(parent) => {
                    parent.children.insert(id.clone());
                }
                None => self
                    .pending
                    .entry(parent_id.clone())
                    .or_default()
                    .push(id.clone()),
            }
        }

        if let NodeKind::Taxon { name } = &node.kind {
            if !name.is_empty() {
                self.names.insert(name.clone(), id.clone());
            }
        }

        trace!(id = %id, rank = %node.rank, "added node");
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Register `old_id` as merged into `new_id`; lookups of `old_id` follow the alias
    pub fn add_merged(
        &mut self,
        old_id: impl Into<String>,
        new_id: impl Into<String>,
    ) -> TaxonomyResult<()> {
        let old_id = old_id.into();
        if self.nodes.contains_key(&old_id) {
            return Err(TaxonomyError::DuplicateId(old_id));
        }
        self.merged.insert(old_id, new_id.into());
        Ok(())
    }

    /// Look up a node, following merged ids
    pub fn get(&self, id: &str) -> TaxonomyResult<&Node> {
        let mut current = id;
        // Bounded so that an alias cycle cannot spin forever
        for _ in 0..=self.merged.len() {
            if let Some(node) = self.nodes.get(current) {
                return Ok(node);
            }
            match self.merged.get(current) {
                Some(next) => current = next.as_str(),
                None => break,
            }
        }
        Err(TaxonomyError::InvalidNode(id.to_string()))
    }

    /// Canonical id of `id` after following merged ids
    pub fn resolve(&self, id: &str) -> TaxonomyResult<&str> {
        self.get(id).map(Node::id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.keys().map(String::as_str)
    }

    /// Number of placeholder nodes currently in the tree
    pub fn dummy_count(&self) -> usize {
        self.nodes.values().filter(|n| n.is_dummy()).count()
    }

    /// Root of the tree, found by walking up from any node
    pub fn root(&self) -> TaxonomyResult<&Node> {
        let (first, _) = self.nodes.first().ok_or(TaxonomyError::EmptyTaxonomy)?;
        self.lineage(first)?.root().ok_or(TaxonomyError::EmptyTaxonomy)
    }

    pub fn name_of(&self, id: &str) -> TaxonomyResult<&str> {
        self.get(id).map(Node::name)
    }

    pub fn rank_of(&self, id: &str) -> TaxonomyResult<&str> {
        self.get(id).map(Node::rank)
    }

    /// Parent node, `None` for the root
    pub fn parent_of(&self, id: &str) -> TaxonomyResult<Option<&Node>> {
        match self.get(id)?.parent() {
            Some(parent) => self.node(parent).map(Some),
            None => Ok(None),
        }
    }

    pub fn children_of(&self, id: &str) -> TaxonomyResult<Vec<&Node>> {
        self.get(id)?
            .children()
            .map(|child| self.node(child))
            .collect()
    }

    /// Id registered for a display name
    pub fn id_for_name(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    /// Path from `id` up to the root
    pub fn lineage(&self, id: &str) -> TaxonomyResult<Lineage<'_>> {
        let mut current = self.get(id)?;
        let mut nodes = vec![current];

        while let Some(parent_id) = current.parent() {
            if nodes.len() > self.nodes.len() {
                return Err(TaxonomyError::CyclicLineage(id.to_string()));
            }
            current = self.node(parent_id)?;
            nodes.push(current);
        }

        Ok(Lineage::new(nodes))
    }

    /// Whether `ancestor` lies strictly above `descendant`
    pub fn is_ancestor_of(&self, ancestor: &str, descendant: &str) -> TaxonomyResult<bool> {
        let ancestor = self.resolve(ancestor)?;
        let lineage = self.lineage(descendant)?;
        let found = lineage.iter().skip(1).any(|n| n.id() == ancestor);
        Ok(found)
    }

    /// Whether `descendant` lies strictly below `ancestor`
    pub fn is_descendant_of(&self, descendant: &str, ancestor: &str) -> TaxonomyResult<bool> {
        self.is_ancestor_of(ancestor, descendant)
    }

    /// Direct index lookup by canonical id, without alias resolution
    pub(crate) fn node(&self, key: &str) -> TaxonomyResult<&Node> {
        self.nodes
            .get(key)
            .ok_or_else(|| TaxonomyError::InvalidNode(key.to_string()))
    }

    pub(crate) fn node_mut(&mut self, key: &str) -> TaxonomyResult<&mut Node> {
        self.nodes
            .get_mut(key)
            .ok_or_else(|| TaxonomyError::InvalidNode(key.to_string()))
    }

    /// Drop name and alias entries that no longer resolve to an indexed node
    pub(crate) fn drop_stale_lookups(&mut self) {
        let nodes = &self.nodes;
        self.names.retain(|_, id| nodes.contains_key(id));

        let stale: Vec<String> = self
            .merged
            .keys()
            .filter(|old| self.get(old).is_err())
            .cloned()
            .collect();
        for old in stale {
            self.merged.remove(&old);
        }

        let nodes = &self.nodes;
        self.pending.retain(|_, waiting| {
            waiting.retain(|child| nodes.contains_key(child));
            !waiting.is_empty()
        });
    }
}
