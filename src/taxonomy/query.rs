use super::Taxonomy;
use indexmap::IndexSet;
use std::collections::HashSet;
use std::collections::VecDeque;
use taxatree_core::TaxonomyResult;

impl Taxonomy {
    /// Number of edges between `id` and the root
    pub fn depth(&self, id: &str) -> TaxonomyResult<usize> {
        Ok(self.lineage(id)?.depth())
    }

    /// Number of edges on the path between two nodes
    pub fn distance(&self, a: &str, b: &str) -> TaxonomyResult<usize> {
        let lca = self.lca(&[a, b])?;
        let d1 = self.depth(a)?;
        let d2 = self.depth(b)?;
        let dlca = self.depth(lca.id())?;

        Ok(d1 + d2 - 2 * dlca)
    }

    /// All strict descendants of `id`, breadth first. A leaf yields an empty set.
    pub fn list_descendants(&self, id: &str) -> TaxonomyResult<IndexSet<&str>> {
        let start = self.get(id)?;
        let mut found: IndexSet<&str> = IndexSet::new();
        let mut queue: VecDeque<&str> = start.children().collect();

        while let Some(current) = queue.pop_front() {
            if !found.insert(current) {
                continue;
            }
            queue.extend(self.node(current)?.children());
        }

        Ok(found)
    }

    /// Strict descendants of `id` whose rank is one of `ranks`.
    ///
    /// An empty `ranks` applies no filter.
    pub fn list_descendants_at_ranks<S: AsRef<str>>(
        &self,
        id: &str,
        ranks: &[S],
    ) -> TaxonomyResult<IndexSet<&str>> {
        let all = self.list_descendants(id)?;
        if ranks.is_empty() {
            return Ok(all);
        }
        let wanted: HashSet<&str> = ranks.iter().map(|r| r.as_ref()).collect();

        let mut kept = IndexSet::with_capacity(all.len());
        for descendant in all {
            if wanted.contains(self.node(descendant)?.rank()) {
                kept.insert(descendant);
            }
        }
        Ok(kept)
    }
}
