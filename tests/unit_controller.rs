// tests/unit_controller.rs
//! Tests for the view controller: update routing, rebuilds, and lossless
//! strategy switching.

use serde_json::json;

use pathvis_core::config::VisConfig;
use pathvis_core::controller::{LayoutKind, PathGraphController};
use pathvis_core::events::{ListenerBus, PathSelection, SelectionType, Update, UpdateKind};
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

fn batch() -> Vec<Path> {
    vec![chain(0, &[1, 2, 3], 10), chain(1, &[3, 4], 20)]
}

#[test]
fn test_streamed_adds_equal_bulk_render() {
    let paths = batch();

    let mut bulk = PathGraphController::new(VisConfig::new());
    bulk.render(paths.clone());

    let mut streamed = PathGraphController::new(VisConfig::new());
    for p in paths {
        streamed.add_path(p);
    }

    assert_eq!(
        bulk.graph().to_json(),
        streamed.graph().to_json(),
        "Incremental adds must converge to the bulk-render graph"
    );
}

#[test]
fn test_strategy_switch_is_lossless() {
    let mut controller = PathGraphController::new(VisConfig::new());
    controller.render(batch());
    controller.add_neighbor(3, node(50));
    let direct = controller.graph().to_json();

    controller.switch_layout(LayoutKind::Force);
    controller.switch_layout(LayoutKind::Layered);

    assert_eq!(
        controller.graph().to_json(),
        direct,
        "Switching strategies away and back must not drop or duplicate data"
    );
    assert_eq!(controller.active_layout(), LayoutKind::Layered);
    assert_eq!(
        controller.frame().positions.len(),
        controller.graph().node_count(),
        "Incoming strategy rendered the same graph"
    );
}

#[test]
fn test_switch_to_same_layout_is_noop() {
    let mut controller = PathGraphController::new(VisConfig::new());
    controller.render(batch());
    let before = controller.graph().to_json();
    controller.switch_layout(LayoutKind::Layered);
    assert_eq!(controller.graph().to_json(), before);
}

#[test]
fn test_filter_update_restyles_without_rebuild() {
    let mut controller = PathGraphController::new(VisConfig::new());
    controller.render(batch());
    let positions = controller.frame().positions.clone();

    let mut query = StaticQuery::new();
    query.filter_node(4);
    controller.on_query_update(&query);

    assert_eq!(
        controller.frame().positions,
        positions,
        "Plain filter updates never re-derive positions"
    );
    assert!(controller.frame().hidden_nodes.contains(&4));
}

#[test]
fn test_remove_filtered_paths_excises_from_graph() {
    let mut controller = PathGraphController::new(VisConfig::new());
    controller.render(batch());

    let mut query = StaticQuery::new();
    query.set_remove_filtered_paths(true);
    query.filter_path(1);
    controller.on_query_update(&query);

    assert!(
        !controller.graph().contains_node(4),
        "Node supported only by the filtered path is excised"
    );
    assert!(
        controller.graph().contains_node(3),
        "Node shared with an unfiltered path survives"
    );
    assert_eq!(
        controller.paths().len(),
        2,
        "Local filtering keeps the path list intact"
    );
}

#[test]
fn test_remote_query_prunes_path_list() {
    let mut controller = PathGraphController::new(VisConfig::new());
    controller.render(batch());

    let mut query = StaticQuery::new();
    query.set_remote_query(true);
    query.filter_path(0);
    controller.on_query_update(&query);

    assert_eq!(controller.paths().len(), 1, "Remote queries prune loaded paths");
    assert_eq!(controller.paths()[0].id, 1);
}

#[test]
fn test_neighbor_roundtrip_preserves_path_content() {
    let mut controller = PathGraphController::new(VisConfig::new());
    controller.render(batch());
    let before = controller.graph().to_json();

    controller.add_neighbor(3, node(50));
    controller.add_neighbor(3, node(51));
    assert_eq!(controller.graph().node_count(), 6);

    let query = StaticQuery::new();
    controller.remove_neighbors_of_node(3, &query);

    assert_eq!(
        controller.graph().to_json(),
        before,
        "Removing neighbor relations never removes path-supported content"
    );
    assert!(controller.neighbors().is_empty());
}

#[test]
fn test_remove_neighbor_node() {
    let mut controller = PathGraphController::new(VisConfig::new());
    controller.render(batch());
    controller.add_neighbor(3, node(50));
    controller.add_neighbor(50, node(51));

    let query = StaticQuery::new();
    controller.remove_neighbor_node(50, &query);

    assert!(
        !controller.graph().contains_node(50) && !controller.graph().contains_node(51),
        "Relations touching the node are dropped on both ends"
    );
}

#[test]
fn test_neighbor_to_absent_source_is_tolerated() {
    let mut controller = PathGraphController::new(VisConfig::new());
    controller.render(batch());
    let before = controller.graph().to_json();

    controller.add_neighbor(999, node(50));

    assert_eq!(
        controller.graph().to_json(),
        before,
        "Absent source never mutates the graph"
    );
}

#[test]
fn test_selection_update_highlights_path_nodes() {
    let mut controller = PathGraphController::new(VisConfig::new());
    controller.render(batch());

    let selection = PathSelection {
        selection_type: SelectionType::Selected,
        path_ids: vec![0],
    };
    controller.apply_update(&Update::PathSelection(selection), &StaticQuery::new());

    let highlighted = &controller.frame().highlighted_nodes;
    assert!(highlighted.contains(&1) && highlighted.contains(&2) && highlighted.contains(&3));
    assert!(!highlighted.contains(&4));
}

#[test]
fn test_reset_clears_everything() {
    let mut controller = PathGraphController::new(VisConfig::new());
    controller.render(batch());
    controller.add_neighbor(3, node(50));

    controller.reset();

    assert!(controller.paths().is_empty());
    assert!(controller.neighbors().is_empty());
    assert!(controller.graph().is_empty());
    assert!(controller.frame().positions.is_empty());
}

#[test]
fn test_bus_delivers_to_matching_kind_only() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut bus = ListenerBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    bus.subscribe(UpdateKind::QueryUpdate, move |u| {
        sink.borrow_mut().push(u.kind());
    });
    assert_eq!(bus.subscriber_count(UpdateKind::QueryUpdate), 1);

    bus.notify(&Update::QueryUpdate);
    bus.notify(&Update::SortUpdate);

    assert_eq!(seen.borrow().as_slice(), &[UpdateKind::QueryUpdate]);
}
