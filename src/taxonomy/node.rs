use indexmap::IndexSet;
use std::fmt;
use uuid::Uuid;

/// What a node stands for in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A real taxon with a display name
    Taxon { name: String },
    /// Structural placeholder standing in for a missing rank level
    Placeholder,
}

/// A vertex of a [`Taxonomy`](super::Taxonomy).
///
/// Nodes refer to their parent and children by id. Callers only set the
/// parent; the child set is maintained by the taxonomy the node lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) id: String,
    pub(crate) kind: NodeKind,
    pub(crate) rank: String,
    pub(crate) parent: Option<String>,
    pub(crate) children: IndexSet<String>,
}

impl Node {
    /// Create a real taxon without a parent
    pub fn new(id: impl Into<String>, name: impl Into<String>, rank: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Taxon { name: name.into() },
            rank: rank.into(),
            parent: None,
            children: IndexSet::new(),
        }
    }

    /// Set the parent id
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Create a placeholder of the given rank with a synthetic `dummy-<uuid>` id
    pub fn dummy(rank: impl Into<String>) -> Self {
        Self::dummy_with_prefix("dummy", rank)
    }

    /// Create a placeholder whose synthetic id starts with `prefix`
    pub fn dummy_with_prefix(prefix: &str, rank: impl Into<String>) -> Self {
        Self {
            id: format!("{}-{}", prefix, Uuid::new_v4().simple()),
            kind: NodeKind::Placeholder,
            rank: rank.into(),
            parent: None,
            children: IndexSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name; empty for placeholders
    pub fn name(&self) -> &str {
        match &self.kind {
            NodeKind::Taxon { name } => name,
            NodeKind::Placeholder => "",
        }
    }

    pub fn rank(&self) -> &str {
        &self.rank
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Child ids in insertion order
    pub fn children(&self) -> impl Iterator<Item = &str> + '_ {
        self.children.iter().map(String::as_str)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn has_child(&self, id: &str) -> bool {
        self.children.contains(id)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, NodeKind::Placeholder)
    }

    /// Replace `old` in the child set by `replacement`, keeping its position
    pub(crate) fn splice_child<I>(&mut self, old: &str, replacement: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut replacement = Some(replacement);
        let previous = std::mem::take(&mut self.children);
        for child in previous {
            if child == old {
                if let Some(new_children) = replacement.take() {
                    self.children.extend(new_children);
                }
            } else {
                self.children.insert(child);
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Taxon { .. } => write!(f, "Node({})", self.id),
            NodeKind::Placeholder => write!(f, "DummyNode({})", self.id),
        }
    }
}
