//! Tests for ForestBuilder

use std::collections::HashSet;

use rstest::rstest;

use cathier::domain::{Category, CategoryId, CategoryNode, Forest, ForestBuilder};
use cathier::util::testing::category;

fn ids(nodes: &[CategoryNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.id.as_str()).collect()
}

/// Deterministic pseudo-random forest: node i hangs under some j < i, or is a root.
fn generated(n: usize) -> Vec<Category> {
    let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let parent = if i == 0 || seed % 5 == 0 {
            None
        } else {
            Some(format!("n{}", seed as usize % i))
        };
        out.push(category(&format!("n{i}"), &format!("node {i}"), parent.as_deref()));
    }
    // scan order is not creation order
    out.reverse();
    out
}

#[test]
fn given_empty_input_when_building_then_empty_forest() {
    let forest = ForestBuilder::new().build(&[]);
    assert!(forest.is_empty());
    assert_eq!(forest.node_count(), 0);
}

#[test]
fn given_roots_and_children_when_building_then_scan_order_preserved() {
    let cats = vec![
        category("r2", "Second", None),
        category("c2", "c2", Some("r1")),
        category("r1", "First", None),
        category("c1", "c1", Some("r1")),
        category("c3", "c3", Some("r1")),
    ];

    let forest = ForestBuilder::new().build(&cats);

    assert_eq!(ids(&forest.roots), vec!["r2", "r1"]);
    assert_eq!(ids(&forest.roots[1].subcategories), vec!["c2", "c1", "c3"]);
}

#[test]
fn given_dangling_parent_when_building_then_child_and_subtree_omitted() {
    let cats = vec![
        category("root", "Root", None),
        category("lost", "Lost", Some("deleted-long-ago")),
        category("lost-child", "Lost child", Some("lost")),
    ];

    let forest = ForestBuilder::new().build(&cats);

    assert_eq!(ids(&forest.roots), vec!["root"]);
    assert_eq!(forest.node_count(), 1);
    assert!(forest.find(&CategoryId::from("lost")).is_none());
    assert!(forest.find(&CategoryId::from("lost-child")).is_none());
}

#[test]
fn given_node_fields_when_building_then_copied_into_node() {
    let mut cat = category("x", "Phones", None);
    cat.status = cathier::domain::CategoryStatus::Inactive;

    let forest = ForestBuilder::new().build(&[cat]);

    let node = &forest.roots[0];
    assert_eq!(node.name, "Phones");
    assert_eq!(node.status, cathier::domain::CategoryStatus::Inactive);
    assert!(node.is_leaf());
}

#[rstest]
#[case(1)]
#[case(10)]
#[case(250)]
fn given_generated_set_when_building_both_ways_then_identical(#[case] n: usize) {
    let cats = generated(n);

    let indexed = ForestBuilder::new().build(&cats);
    let naive = ForestBuilder::build_naive(&cats);

    assert_eq!(indexed, naive);
}

#[rstest]
#[case(50)]
#[case(500)]
fn given_generated_set_when_building_then_every_node_appears_exactly_once(#[case] n: usize) {
    let cats = generated(n);

    let forest: Forest = ForestBuilder::new().build(&cats);

    let mut seen = HashSet::new();
    for (_, node) in forest.walk() {
        assert!(seen.insert(node.id.clone()), "{} appears twice", node.id);
    }
    // all parents in the generated set exist, so nothing is dropped
    assert_eq!(seen.len(), n);
}

#[test]
fn given_long_chain_when_building_then_depth_preserved() {
    let depth = 2_000;
    let cats: Vec<Category> = (0..depth)
        .map(|i| {
            let parent = (i > 0).then(|| format!("c{}", i - 1));
            category(&format!("c{i}"), "chain", parent.as_deref())
        })
        .collect();

    let forest = ForestBuilder::new().build(&cats);

    assert_eq!(forest.node_count(), depth);
    let deepest = forest.walk().into_iter().map(|(d, _)| d).max().unwrap();
    assert_eq!(deepest, depth - 1);
}

#[test]
fn given_forest_when_serializing_then_array_of_nodes_with_subcategories() {
    let cats = vec![category("r", "Root", None), category("c", "Child", Some("r"))];

    let forest = ForestBuilder::new().build(&cats);
    let json = serde_json::to_value(&forest).unwrap();

    assert_eq!(
        json,
        serde_json::json!([
            {
                "id": "r",
                "name": "Root",
                "status": "active",
                "subcategories": [
                    { "id": "c", "name": "Child", "status": "active", "subcategories": [] }
                ]
            }
        ])
    );
}
