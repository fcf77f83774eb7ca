// tests/unit_layout.rs
//! Tests for the layered layout strategy.

use serde_json::json;

use pathvis_core::config::VisConfig;
use pathvis_core::graph::PathGraph;
use pathvis_core::layout::{GraphLayout, LayeredLayout, Size};
use pathvis_core::model::{Edge, Node, Path};
use pathvis_core::query::StaticQuery;

fn node(id: u64) -> Node {
    Node {
        id,
        node_type: "gene".to_string(),
        properties: [("name".to_string(), json!(format!("n{id}")))]
            .into_iter()
            .collect(),
    }
}

fn chain(id: usize, node_ids: &[u64], first_edge_id: u64) -> Path {
    let nodes = node_ids.iter().map(|&n| node(n)).collect();
    let edges = (0..node_ids.len() - 1)
        .map(|i| Edge {
            id: first_edge_id + i as u64,
            properties: [("pathways".to_string(), json!(["s1"]))]
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

fn build_graph(paths: &[Path]) -> PathGraph {
    let mut graph = PathGraph::new();
    graph.add_paths(paths, &VisConfig::new());
    graph
}

#[test]
fn test_chain_ranks_follow_edge_direction() {
    let paths = vec![chain(0, &[1, 2, 3, 4], 10)];
    let graph = build_graph(&paths);
    let mut layout = LayeredLayout::new();
    layout.render(&paths, &graph);

    let frame = layout.frame();
    for edge in graph.edges() {
        let source_y = frame.positions[&edge.source].y;
        let target_y = frame.positions[&edge.target].y;
        assert!(
            source_y < target_y,
            "Edge {} -> {} must point to a deeper rank",
            edge.source,
            edge.target
        );
    }
}

#[test]
fn test_every_node_positioned() {
    let paths = vec![chain(0, &[1, 2, 3], 10), chain(1, &[2, 4], 20)];
    let graph = build_graph(&paths);
    let mut layout = LayeredLayout::new();
    layout.render(&paths, &graph);

    for id in graph.node_ids() {
        assert!(
            layout.frame().positions.contains_key(&id),
            "Node {id} missing a position"
        );
    }
}

#[test]
fn test_cycle_does_not_fail() {
    // 1 -> 2 -> 3 -> 1 via three overlapping paths.
    let paths = vec![
        chain(0, &[1, 2], 10),
        chain(1, &[2, 3], 20),
        chain(2, &[3, 1], 30),
    ];
    let graph = build_graph(&paths);
    let mut layout = LayeredLayout::new();
    layout.render(&paths, &graph);

    assert_eq!(
        layout.frame().positions.len(),
        3,
        "Cycle members still get positions via the acyclic fallback"
    );
}

#[test]
fn test_no_overlap_within_rank() {
    let paths = vec![
        chain(0, &[1, 2], 10),
        chain(1, &[1, 3], 20),
        chain(2, &[1, 4], 30),
    ];
    let graph = build_graph(&paths);
    let mut layout = LayeredLayout::new();
    layout.render(&paths, &graph);

    let frame = layout.frame();
    // Nodes 2, 3, 4 share the rank below node 1.
    let mut xs: Vec<i64> = [2u64, 3, 4]
        .iter()
        .map(|id| frame.positions[id].x as i64)
        .collect();
    xs.sort_unstable();
    xs.dedup();
    assert_eq!(xs.len(), 3, "Same-rank nodes must not share an x slot");
}

#[test]
fn test_disconnected_components_are_packed() {
    let paths = vec![chain(0, &[1, 2], 10), chain(1, &[10, 11], 20)];
    let graph = build_graph(&paths);
    let mut layout = LayeredLayout::new();
    layout.render(&paths, &graph);

    let frame = layout.frame();
    let comp_a_x = frame.positions[&1].x;
    let comp_b_x = frame.positions[&10].x;
    assert_ne!(
        comp_a_x, comp_b_x,
        "Components are laid out independently and offset from each other"
    );
    assert_eq!(frame.positions.len(), 4);
}

#[test]
fn test_min_size_covers_frame() {
    let paths = vec![chain(0, &[1, 2, 3], 10)];
    let graph = build_graph(&paths);
    let mut layout = LayeredLayout::new();
    layout.render(&paths, &graph);

    let min = layout.min_size();
    let frame = layout.frame();
    assert!(min.width >= frame.size.width);
    assert!(min.height >= frame.size.height);
}

#[test]
fn test_center_graph_translates_without_relayout() {
    let paths = vec![chain(0, &[1, 2], 10)];
    let graph = build_graph(&paths);
    let mut layout = LayeredLayout::new();
    layout.render(&paths, &graph);

    let before = layout.frame().positions.clone();
    layout.center_graph(Size {
        width: 2000.0,
        height: 2000.0,
    });

    assert_eq!(
        layout.frame().positions, before,
        "Centering repositions the viewport only"
    );
    assert!(layout.frame().offset.x > 0.0);
    assert!(layout.frame().offset.y > 0.0);
}

#[test]
fn test_update_filter_keeps_positions() {
    let paths = vec![chain(0, &[1, 2, 3], 10)];
    let graph = build_graph(&paths);
    let mut layout = LayeredLayout::new();
    layout.render(&paths, &graph);
    let before = layout.frame().positions.clone();

    let mut query = StaticQuery::new();
    query.filter_node(2);
    layout.update_filter(&graph, &query);

    let frame = layout.frame();
    assert_eq!(frame.positions, before, "Filtering restyles, never repositions");
    assert!(frame.hidden_nodes.contains(&2));
    assert!(!frame.hidden_nodes.contains(&1));
    assert!(
        !frame.hidden_edges.is_empty(),
        "Edges touching a hidden node are hidden"
    );
}

#[test]
fn test_empty_graph_renders_empty_frame() {
    let graph = PathGraph::new();
    let mut layout = LayeredLayout::new();
    layout.render(&[], &graph);

    assert!(layout.frame().positions.is_empty());
    assert_eq!(layout.frame().size.width, 0.0);
}
