use super::Taxonomy;
use std::collections::HashSet;
use taxatree_core::TaxonomyResult;
use tracing::debug;

impl Taxonomy {
    /// Keep only the lineage of `id` and everything below it.
    ///
    /// Ancestors of `id` keep only the child leading to it; every node off
    /// that path is dropped together with its subtree.
    pub fn prune(&mut self, id: &str) -> TaxonomyResult<()> {
        let key = self.resolve(id)?.to_string();
        let path: Vec<String> = self
            .lineage(&key)?
            .iter()
            .map(|n| n.id().to_string())
            .collect();
        let below: Vec<String> = self
            .list_descendants(&key)?
            .into_iter()
            .map(str::to_string)
            .collect();

        for pair in path.windows(2) {
            let (child, parent) = (&pair[0], &pair[1]);
            self.node_mut(parent)?.children.retain(|c| c == child);
        }

        let keep: HashSet<String> = path.into_iter().chain(below).collect();
        let before = self.nodes.len();
        self.nodes.retain(|k, _| keep.contains(k));
        self.drop_stale_lookups();

        debug!(
            id = %key,
            kept = self.nodes.len(),
            removed = before - self.nodes.len(),
            "pruned taxonomy"
        );
        Ok(())
    }

    /// Pruned copy of this taxonomy; `self` is left untouched
    pub fn pruned(&self, id: &str) -> TaxonomyResult<Taxonomy> {
        let mut tax = self.clone();
        tax.prune(id)?;
        Ok(tax)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Node;
    use super::*;

    fn tree() -> Taxonomy {
        Taxonomy::from_list(vec![
            Node::new("0", "root", "root"),
            Node::new("1", "node1", "rank1").with_parent("0"),
            Node::new("2", "node2", "rank1").with_parent("0"),
            Node::new("11", "node11", "rank2").with_parent("1"),
            Node::new("12", "node12", "rank2").with_parent("1"),
        ])
        .unwrap()
    }

    #[test]
    fn test_prune_keeps_lineage_and_subtree() {
        let mut tax = tree();
        tax.prune("1").unwrap();

        assert_eq!(tax.lineage("11").unwrap().ids(), vec!["11", "1", "0"]);
        assert!(tax.get("2").is_err());
        assert_eq!(tax.len(), 4);
        assert_eq!(tax.get("0").unwrap().children().collect::<Vec<_>>(), vec!["1"]);
        assert_eq!(tax.id_for_name("node2"), None);
    }

    #[test]
    fn test_pruned_copy() {
        let tax = tree();
        let new = tax.pruned("11").unwrap();

        assert!(new.get("12").is_err());
        assert_eq!(new.len(), 3);
        assert_eq!(tax.lineage("12").unwrap().ids(), vec!["12", "1", "0"]);
        assert_eq!(tax.len(), 5);
    }

    #[test]
    fn test_prune_unknown_leaves_tree_untouched() {
        let mut tax = tree();
        assert!(tax.prune("404").unwrap_err().is_invalid_node());
        assert_eq!(tax.len(), 5);
    }

    #[test]
    fn test_prune_drops_stale_aliases() {
        let mut tax = tree();
        tax.add_merged("old2", "2").unwrap();
        tax.add_merged("old11", "11").unwrap();

        tax.prune("11").unwrap();

        assert!(tax.get("old2").is_err());
        assert_eq!(tax.get("old11").unwrap().id(), "11");
    }
}
