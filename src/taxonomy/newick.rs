use super::{Node, Taxonomy};
use taxatree_core::TaxonomyResult;

/// Which node attribute labels the vertices of a Newick export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewickLabel {
    #[default]
    Name,
    Id,
}

impl Taxonomy {
    /// Newick string of the whole tree, e.g. `((111,112)11,12)1;`.
    ///
    /// Spaces in names become underscores; placeholders have empty names.
    pub fn to_newick(&self, label: NewickLabel) -> TaxonomyResult<String> {
        let root = self.root()?;
        let mut out = String::new();
        self.write_subtree(root, label, &mut out)?;
        out.push(';');
        Ok(out)
    }

    fn write_subtree(&self, node: &Node, label: NewickLabel, out: &mut String) -> TaxonomyResult<()> {
        if !node.is_leaf() {
            out.push('(');
            for (i, child) in node.children().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                self.write_subtree(self.node(child)?, label, out)?;
            }
            out.push(')');
        }
        match label {
            NewickLabel::Name => out.push_str(&node.name().replace(' ', "_")),
            NewickLabel::Id => out.push_str(node.id()),
        }
        Ok(())
    }
}
