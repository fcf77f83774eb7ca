// tests/unit_sort.rs
//! Tests for sorting strategies and the replace-not-stack manager.

use serde_json::json;

use pathvis_core::model::{Edge, Node, Path};
use pathvis_core::sort::{SortingManager, SortingStrategy, StrategyKind};

fn node(id: u64) -> Node {
    Node {
        id,
        node_type: "gene".to_string(),
        properties: [("name".to_string(), json!(format!("n{id}")))]
            .into_iter()
            .collect(),
    }
}

fn path_with(id: usize, node_ids: &[u64], set: &str) -> Path {
    let nodes = node_ids.iter().map(|&n| node(n)).collect();
    let edges = (0..node_ids.len() - 1)
        .map(|i| Edge {
            id: 100 + i as u64,
            properties: [("pathways".to_string(), json!([set]))]
                .into_iter()
                .collect(),
        })
        .collect();
    let mut p = Path {
        id,
        nodes,
        edges,
        sets: Vec::new(),
    };
    p.derive_sets();
    p
}

#[test]
fn test_node_presence_orders_first() {
    let mut paths = vec![
        path_with(0, &[1, 2], "sa"),
        path_with(1, &[3, 4], "sb"),
        path_with(2, &[2, 5], "sa"),
    ];

    let mut manager = SortingManager::new();
    manager.add_or_replace(SortingStrategy::node_presence(vec![3]));
    manager.sort(&mut paths);

    assert_eq!(paths[0].id, 1, "Path containing the wanted node sorts first");
}

#[test]
fn test_set_presence_orders_first() {
    let mut paths = vec![
        path_with(0, &[1, 2], "sa"),
        path_with(1, &[3, 4], "sb"),
    ];

    let mut manager = SortingManager::new();
    manager.add_or_replace(SortingStrategy::set_presence(vec!["sb".to_string()]));
    manager.sort(&mut paths);

    assert_eq!(paths[0].id, 1);
}

#[test]
fn test_add_or_replace_keeps_one_per_kind() {
    let mut manager = SortingManager::new();
    manager.add_or_replace(SortingStrategy::node_presence(vec![1]));
    manager.add_or_replace(SortingStrategy::node_presence(vec![3]));

    assert_eq!(
        manager.strategies().len(),
        1,
        "Same-kind registration replaces, never stacks"
    );
    assert_eq!(manager.strategies()[0].kind, StrategyKind::NodePresence);

    let a = path_with(0, &[1, 2], "sa");
    let b = path_with(1, &[3, 4], "sb");
    assert_eq!(
        manager.compare(&a, &b),
        std::cmp::Ordering::Greater,
        "Only the latest registration is active"
    );
}

#[test]
fn test_chained_strategies_and_tiebreak() {
    let mut manager = SortingManager::new();
    manager.add_or_replace(SortingStrategy::node_presence(vec![1]));
    manager.add_or_replace(SortingStrategy::path_length());

    assert_eq!(manager.strategies().len(), 2, "Different kinds chain");

    let a = path_with(0, &[1, 2], "sa");
    let b = path_with(1, &[1, 3], "sa");
    assert_eq!(
        manager.compare(&a, &b),
        std::cmp::Ordering::Less,
        "Equal presence and length falls through to the path-id tiebreaker"
    );
}
