//! Test fixtures and tree generators
//!
//! Common taxonomies for use across the taxatree workspace.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use taxatree::{Node, Taxonomy};

/// The tree most consensus and distance tests are written against:
///
/// ```text
/// 0 (root)
/// ├── 1 (rank1)
/// │   ├── 11 (rank2)
/// │   └── 12 (rank2)
/// │       ├── 121 (rank3)
/// │       └── 122 (rank3)
/// └── 2 (rank1)
///     ├── 21 (rank2)
///     ├── 22 (rank2)
///     └── 23 (rank2)
/// ```
pub fn reference_taxonomy() -> Taxonomy {
    let spec = [
        ("0", None, "root"),
        ("1", Some("0"), "rank1"),
        ("2", Some("0"), "rank1"),
        ("11", Some("1"), "rank2"),
        ("12", Some("1"), "rank2"),
        ("121", Some("12"), "rank3"),
        ("122", Some("12"), "rank3"),
        ("21", Some("2"), "rank2"),
        ("22", Some("2"), "rank2"),
        ("23", Some("2"), "rank2"),
    ];

    let nodes = spec.iter().map(|(id, parent, rank)| {
        let node = Node::new(*id, format!("node{}", id), *rank);
        match parent {
            Some(parent) => node.with_parent(*parent),
            None => node,
        }
    });

    Taxonomy::from_list(nodes).expect("reference taxonomy has unique ids")
}

/// Tree with a rank gap between the root and `001`:
///
/// ```text
/// 1 (root)
/// ├── 11 (rank1)
/// │   └── 111 (rank2)
/// └── 001 (rank2)
/// ```
pub fn filter_example_taxonomy() -> Taxonomy {
    Taxonomy::from_list(vec![
        Node::new("1", "node1", "root"),
        Node::new("11", "node11", "rank1").with_parent("1"),
        Node::new("111", "node111", "rank2").with_parent("11"),
        Node::new("001", "node001", "rank2").with_parent("1"),
    ])
    .expect("filter example has unique ids")
}

/// Build a tree from parent choices.
///
/// Node `0` is the root; node `i` (1-based position in `choices`) hangs
/// below node `choices[i - 1] % i`. Ranks are `rank<depth>`, the root
/// carrying `root`.
pub fn taxonomy_from_parents(choices: &[usize]) -> Taxonomy {
    let mut depths = vec![0usize];
    let mut nodes = vec![Node::new("0", "node0", "root")];

    for (offset, choice) in choices.iter().enumerate() {
        let id = offset + 1;
        let parent = choice % id;
        let depth = depths[parent] + 1;
        depths.push(depth);
        nodes.push(
            Node::new(id.to_string(), format!("node{}", id), format!("rank{}", depth))
                .with_parent(parent.to_string()),
        );
    }

    Taxonomy::from_list(nodes).expect("generated ids are unique")
}

/// Seeded random tree with `size` nodes
pub fn random_taxonomy(seed: u64, size: usize) -> Taxonomy {
    let mut rng = StdRng::seed_from_u64(seed);
    let choices: Vec<usize> = (1..size).map(|_| rng.gen_range(0..usize::MAX)).collect();
    taxonomy_from_parents(&choices)
}
