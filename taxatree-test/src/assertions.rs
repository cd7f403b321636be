//! Custom assertions for testing
//!
//! Structural checks on taxonomies after queries and edits.

use std::collections::HashSet;
use taxatree::{Node, Taxonomy};

/// Assert that parent and child links agree in both directions
pub fn assert_links_consistent(tax: &Taxonomy) {
    for node in tax.iter() {
        if let Some(parent) = node.parent() {
            let parent_node = tax
                .get(parent)
                .unwrap_or_else(|_| panic!("{} points at missing parent {}", node, parent));
            assert!(
                parent_node.has_child(node.id()),
                "{} is not listed as a child of {}",
                node,
                parent_node
            );
        }
        for child in node.children() {
            let child_node = tax
                .get(child)
                .unwrap_or_else(|_| panic!("{} lists missing child {}", node, child));
            assert_eq!(
                child_node.parent(),
                Some(node.id()),
                "{} does not point back at {}",
                child_node,
                node
            );
        }
    }

    let roots = tax.iter().filter(|n| n.is_root()).count();
    if !tax.is_empty() {
        assert_eq!(roots, 1, "expected a single root, found {}", roots);
    }
}

/// Assert that every node's full lineage lies inside the taxonomy
pub fn assert_lineages_within(tax: &Taxonomy) {
    let ids: HashSet<&str> = tax.ids().collect();
    for id in tax.ids() {
        let lineage = tax
            .lineage(id)
            .unwrap_or_else(|e| panic!("lineage of {} failed: {}", id, e));
        for ancestor in &lineage {
            assert!(
                ids.contains(ancestor.id()),
                "{} has ancestor {} outside the taxonomy",
                id,
                ancestor
            );
        }
    }
}

/// Assert that a query result is a real taxon with the expected id
pub fn assert_real_node(node: &Node, expected_id: &str) {
    assert!(!node.is_dummy(), "expected a real node, got {}", node);
    assert_eq!(node.id(), expected_id);
}
