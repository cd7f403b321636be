use super::node::Node;
use std::fmt;

/// Path from a node up to the root, both ends included.
///
/// Borrowed from the taxonomy it was computed on; placeholder hops are kept.
#[derive(Debug, Clone)]
pub struct Lineage<'a> {
    nodes: Vec<&'a Node>,
}

impl<'a> Lineage<'a> {
    pub(crate) fn new(nodes: Vec<&'a Node>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges between the node and the root
    pub fn depth(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// The node the lineage was computed for
    pub fn node(&self) -> Option<&'a Node> {
        self.nodes.first().copied()
    }

    pub fn root(&self) -> Option<&'a Node> {
        self.nodes.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<&'a Node> {
        self.nodes.get(index).copied()
    }

    /// Node to root
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a Node> + '_ {
        self.nodes.iter().copied()
    }

    /// Root to node
    pub fn descending(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.nodes.iter().rev().copied()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.nodes.iter().map(|n| n.id()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id() == id)
    }

    /// First node of the lineage carrying `rank`
    pub fn at_rank(&self, rank: &str) -> Option<&'a Node> {
        self.nodes.iter().copied().find(|n| n.rank() == rank)
    }

    /// One slot per requested rank, `None` where the lineage has no such rank
    pub fn filter_ranks<S: AsRef<str>>(&self, ranks: &[S]) -> Vec<Option<&'a Node>> {
        ranks.iter().map(|r| self.at_rank(r.as_ref())).collect()
    }
}

impl<'a, 'b> IntoIterator for &'b Lineage<'a> {
    type Item = &'a Node;
    type IntoIter = std::iter::Copied<std::slice::Iter<'b, &'a Node>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}

impl fmt::Display for Lineage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lineage([")?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", node)?;
        }
        write!(f, "])")
    }
}
