//! Rank filtering and the structural primitives it is built from.
//!
//! Filtering happens in two passes. The first relinks away every node whose
//! rank was not asked for, so its children hang from its parent. The second
//! walks down from the root and makes every branch follow the requested rank
//! order, splicing a placeholder wherever a level is missing and extending
//! short branches with placeholders down to the most specific rank.

use super::{Node, Taxonomy};
use std::collections::HashSet;
use taxatree_core::config::FilterConfig;
use taxatree_core::{default_ranks, TaxonomyError, TaxonomyResult};
use tracing::{debug, trace};

impl Taxonomy {
    /// Remove a non-root node, attaching its children to its parent in its place
    pub(crate) fn relink(&mut self, id: &str) -> TaxonomyResult<()> {
        let node = self.node(id)?;
        let parent_id = node
            .parent
            .clone()
            .ok_or_else(|| TaxonomyError::RootRelink(id.to_string()))?;
        self.node(&parent_id)?;

        let node = self
            .nodes
            .swap_remove(id)
            .ok_or_else(|| TaxonomyError::InvalidNode(id.to_string()))?;

        for child in &node.children {
            self.node_mut(child)?.parent = Some(parent_id.clone());
        }
        self.node_mut(&parent_id)?
            .splice_child(id, node.children.iter().cloned());

        trace!(id, parent = %parent_id, "relinked node");
        Ok(())
    }

    /// Splice a placeholder of `rank` between `parent` and its child `child`.
    ///
    /// Returns the placeholder's id.
    pub fn insert_dummy(&mut self, parent: &str, child: &str, rank: &str) -> TaxonomyResult<String> {
        let parent = self.resolve(parent)?.to_string();
        let child = self.resolve(child)?.to_string();
        if !self.node(&parent)?.has_child(&child) {
            return Err(TaxonomyError::NotAChild { parent, child });
        }

        let mut dummy = Node::dummy_with_prefix(&self.dummy_prefix, rank);
        let dummy_id = dummy.id.clone();
        dummy.parent = Some(parent.clone());
        dummy.children.insert(child.clone());

        self.node_mut(&child)?.parent = Some(dummy_id.clone());
        self.node_mut(&parent)?
            .splice_child(&child, std::iter::once(dummy_id.clone()));
        self.nodes.insert(dummy_id.clone(), dummy);

        trace!(parent = %parent, child = %child, dummy = %dummy_id, rank, "inserted placeholder");
        Ok(dummy_id)
    }

    /// Attach a new placeholder leaf of `rank` below `parent`; returns its id
    pub fn append_dummy(&mut self, parent: &str, rank: &str) -> TaxonomyResult<String> {
        let parent = self.resolve(parent)?.to_string();

        let mut dummy = Node::dummy_with_prefix(&self.dummy_prefix, rank);
        let dummy_id = dummy.id.clone();
        dummy.parent = Some(parent.clone());

        self.node_mut(&parent)?.children.insert(dummy_id.clone());
        self.nodes.insert(dummy_id.clone(), dummy);
        Ok(dummy_id)
    }

    /// Keep only nodes whose rank is in `ranks`, most specific rank first.
    ///
    /// The root is always kept. Missing levels are bridged with placeholder
    /// nodes so that every branch from the root runs through the requested
    /// ranks in order. Not atomic: a failure halfway (only possible on a
    /// malformed tree) leaves the taxonomy partially filtered.
    pub fn filter_ranks<S: AsRef<str>>(&mut self, ranks: &[S]) -> TaxonomyResult<()> {
        let wanted: HashSet<&str> = ranks.iter().map(|r| r.as_ref()).collect();
        let before = self.nodes.len();

        let unwanted: Vec<String> = self
            .nodes
            .values()
            .filter(|n| !n.is_root() && !wanted.contains(n.rank()))
            .map(|n| n.id.clone())
            .collect();
        for id in &unwanted {
            self.relink(id)?;
        }

        let root = self.root()?;
        let root_id = root.id.clone();
        let root_rank = root.rank.clone();
        let levels: Vec<&str> = ranks
            .iter()
            .map(|r| r.as_ref())
            .filter(|r| *r != root_rank)
            .collect();

        let inserted = self.fill_rank_gaps(&root_id, &levels)?;
        self.drop_stale_lookups();

        debug!(
            relinked = unwanted.len(),
            placeholders = inserted,
            before,
            after = self.nodes.len(),
            "filtered ranks"
        );
        Ok(())
    }

    /// Rank-filtered copy of this taxonomy; `self` is left untouched
    pub fn filtered<S: AsRef<str>>(&self, ranks: &[S]) -> TaxonomyResult<Taxonomy> {
        let mut tax = self.clone();
        tax.filter_ranks(ranks)?;
        Ok(tax)
    }

    /// Filter on the Linnaean ranks, species to kingdom
    pub fn filter_default_ranks(&mut self) -> TaxonomyResult<()> {
        self.filter_ranks(&default_ranks())
    }

    /// Filter on the configured ranks.
    ///
    /// The configured placeholder prefix is adopted for this and later edits.
    pub fn filter_with(&mut self, config: &FilterConfig) -> TaxonomyResult<()> {
        self.dummy_prefix = config.dummy_prefix.clone();
        self.filter_ranks(&config.ranks)
    }

    /// Copy filtered on the configured ranks; `self` is left untouched
    pub fn filtered_with(&self, config: &FilterConfig) -> TaxonomyResult<Taxonomy> {
        let mut tax = self.clone();
        tax.filter_with(config)?;
        Ok(tax)
    }

    /// Top-down pass making every branch follow `levels` (most specific first).
    ///
    /// Returns the number of placeholders created.
    fn fill_rank_gaps(&mut self, root: &str, levels: &[&str]) -> TaxonomyResult<usize> {
        let mut inserted = 0;
        let mut stack: Vec<(String, usize)> = vec![(root.to_string(), levels.len())];

        while let Some((node_id, remaining)) = stack.pop() {
            if remaining == 0 {
                continue;
            }
            let expected = levels[remaining - 1];
            let children: Vec<String> = self.node(&node_id)?.children.iter().cloned().collect();

            if children.is_empty() {
                let dummy = self.append_dummy(&node_id, expected)?;
                inserted += 1;
                stack.push((dummy, remaining - 1));
                continue;
            }

            for child in children {
                let next = if self.node(&child)?.rank() == expected {
                    child
                } else {
                    inserted += 1;
                    self.insert_dummy(&node_id, &child, expected)?
                };
                stack.push((next, remaining - 1));
            }
        }

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Taxonomy {
        Taxonomy::from_list(vec![
            Node::new("1", "root", "root"),
            Node::new("11", "node11", "rank1").with_parent("1"),
            Node::new("111", "node111", "rank2").with_parent("11"),
            Node::new("001", "node001", "rank2").with_parent("1"),
        ])
        .unwrap()
    }

    #[test]
    fn test_relink_moves_children_up() {
        let mut tax = Taxonomy::from_list(vec![
            Node::new("0", "root", "root"),
            Node::new("1", "a", "rank1").with_parent("0"),
            Node::new("2", "b", "rank1").with_parent("0"),
            Node::new("11", "c", "rank2").with_parent("1"),
            Node::new("12", "d", "rank2").with_parent("1"),
        ])
        .unwrap();

        tax.relink("1").unwrap();

        assert!(tax.get("1").is_err());
        assert_eq!(
            tax.get("0").unwrap().children().collect::<Vec<_>>(),
            vec!["11", "12", "2"]
        );
        assert_eq!(tax.get("11").unwrap().parent(), Some("0"));
        assert_eq!(tax.get("12").unwrap().parent(), Some("0"));
    }

    #[test]
    fn test_relink_root_fails() {
        let mut tax = tree();
        assert!(matches!(tax.relink("1"), Err(TaxonomyError::RootRelink(_))));
        assert_eq!(tax.len(), 4);
    }

    #[test]
    fn test_insert_dummy() {
        let mut tax = tree();
        let dummy = tax.insert_dummy("1", "001", "rank1").unwrap();

        let node = tax.get(&dummy).unwrap();
        assert!(node.is_dummy());
        assert_eq!(node.rank(), "rank1");
        assert_eq!(node.parent(), Some("1"));
        assert_eq!(node.children().collect::<Vec<_>>(), vec!["001"]);
        assert_eq!(tax.get("001").unwrap().parent(), Some(dummy.as_str()));
        assert_eq!(
            tax.get("1").unwrap().children().collect::<Vec<_>>(),
            vec!["11", dummy.as_str()]
        );
    }

    #[test]
    fn test_insert_dummy_requires_edge() {
        let mut tax = tree();
        assert!(matches!(
            tax.insert_dummy("11", "001", "rank1"),
            Err(TaxonomyError::NotAChild { .. })
        ));
    }

    #[test]
    fn test_filter_inserts_placeholder_for_gap() {
        let mut tax = tree();
        tax.filter_ranks(&["rank2", "rank1", "root"]).unwrap();

        assert_eq!(tax.len(), 5);
        assert_eq!(tax.dummy_count(), 1);
        let parent = tax.parent_of("001").unwrap().unwrap();
        assert!(parent.is_dummy());
        assert_eq!(parent.rank(), "rank1");
        assert_eq!(parent.parent(), Some("1"));
        assert_eq!(tax.lineage("111").unwrap().ids(), vec!["111", "11", "1"]);
    }

    #[test]
    fn test_filter_keeps_root_regardless() {
        let mut tax = tree();
        tax.filter_ranks(&["rank2", "rank1"]).unwrap();

        assert!(tax.contains("1"));
        assert_eq!(tax.len(), 5);
        assert_eq!(tax.dummy_count(), 1);

        let new = tax.filtered(&["rank1"]).unwrap();
        assert_eq!(new.len(), 3);
        assert!(new.contains("11"));
        assert!(!new.contains("111"));
        assert!(!new.contains("001"));
        assert_eq!(new.dummy_count(), 1);

        assert_eq!(tax.len(), 5);
    }

    #[test]
    fn test_filter_extends_short_branches() {
        let mut tax = tree();
        tax.filter_ranks(&["rank3", "rank2", "rank1"]).unwrap();

        for leaf in ["111", "001"] {
            let children = tax.children_of(leaf).unwrap();
            assert_eq!(children.len(), 1);
            assert!(children[0].is_dummy());
            assert_eq!(children[0].rank(), "rank3");
        }
    }

    #[test]
    fn test_filter_with_config() {
        let config = FilterConfig {
            ranks: vec!["rank2".to_string(), "rank1".to_string()],
            dummy_prefix: "gap".to_string(),
        };

        let tax = tree();
        let filtered = tax.filtered_with(&config).unwrap();

        assert_eq!(filtered.len(), 5);
        assert_eq!(filtered.dummy_prefix(), "gap");
        let parent = filtered.parent_of("001").unwrap().unwrap();
        assert!(parent.is_dummy());
        assert!(parent.id().starts_with("gap-"));
        assert_eq!(tax.dummy_prefix(), "dummy");
        assert_eq!(tax.len(), 4);
    }

    #[test]
    fn test_filter_with_default_config_uses_linnaean_ranks() {
        let mut tax = Taxonomy::from_list(vec![
            Node::new("1", "root", "no rank"),
            Node::new("2", "Bacteria", "superkingdom").with_parent("1"),
            Node::new("561", "Escherichia", "genus").with_parent("2"),
        ])
        .unwrap();

        tax.filter_with(&FilterConfig::default()).unwrap();

        assert!(!tax.contains("2"));
        // kingdom to family above the genus, species below it
        assert_eq!(tax.dummy_count(), 6);
        assert_eq!(tax.depth("561").unwrap(), 6);
    }

    #[test]
    fn test_filter_with_prefix() {
        let mut tax = tree().with_dummy_prefix("gap");
        tax.filter_ranks(&["rank2", "rank1"]).unwrap();

        let parent = tax.parent_of("001").unwrap().unwrap();
        assert!(parent.id().starts_with("gap-"));
    }
}
