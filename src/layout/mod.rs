// src/layout/mod.rs
//! Layout strategies: a common contract over the path graph and two
//! interchangeable implementations (layered, force-directed).
//!
//! Strategies position nodes; they never own graph data. Switching the active
//! strategy calls `prepare_layout_change` on the outgoing one and `render` on
//! the incoming one over the same graph, so no path or neighbor data is ever
//! dropped or duplicated by a switch.

pub mod force;
pub mod layered;

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::events::PathSelection;
use crate::graph::{EdgeId, PathGraph};
use crate::model::{Node, NodeId, Path};
use crate::query::PathQuery;

pub use force::ForceLayout;
pub use layered::LayeredLayout;

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Extent of a laid-out graph or viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// The positioned output of a strategy: node coordinates plus styling state
/// that can change without re-deriving positions.
#[derive(Debug, Default)]
pub struct LayoutFrame {
    pub positions: HashMap<NodeId, Point>,
    pub hidden_nodes: HashSet<NodeId>,
    pub hidden_edges: HashSet<EdgeId>,
    pub highlighted_nodes: HashSet<NodeId>,
    /// Viewport-centering translation applied on top of positions.
    pub offset: Point,
    pub size: Size,
}

impl LayoutFrame {
    pub fn clear(&mut self) {
        self.positions.clear();
        self.hidden_nodes.clear();
        self.hidden_edges.clear();
        self.highlighted_nodes.clear();
        self.offset = Point::default();
        self.size = Size::default();
    }

    /// Recomputes `size` as the bounding box of all positions plus the node
    /// box extents.
    pub fn update_bounds(&mut self, node_width: f64, node_height: f64) {
        if self.positions.is_empty() {
            self.size = Size::default();
            return;
        }
        let mut max_x: f64 = 0.0;
        let mut max_y: f64 = 0.0;
        for p in self.positions.values() {
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        self.size = Size {
            width: max_x + node_width,
            height: max_y + node_height,
        };
    }
}

/// The capability set every layout strategy satisfies.
pub trait GraphLayout {
    fn init(&mut self);

    /// Full (re)layout over the given paths and graph.
    fn render(&mut self, paths: &[Path], graph: &PathGraph);

    /// Incremental handling of one newly added path.
    fn add_path(&mut self, path: &Path, graph: &PathGraph);

    /// Incremental handling of one newly attached neighbor.
    fn add_neighbor(&mut self, source_id: NodeId, neighbor: &Node, graph: &PathGraph);

    /// Restyles filtered-out elements without re-deriving positions.
    fn update_filter(&mut self, graph: &PathGraph, query: &dyn PathQuery);

    /// Reacts to a path selection change by restyling, never repositioning.
    fn on_path_selection_update(&mut self, selection: &PathSelection, paths: &[Path]);

    /// Releases layout-specific state before another strategy takes over.
    fn prepare_layout_change(&mut self);

    fn reset(&mut self);

    fn min_size(&self) -> Size;

    /// Repositions the viewport without recomputing layout.
    fn center_graph(&mut self, viewport: Size);

    fn frame(&self) -> &LayoutFrame;
}

/// Hidden-element computation shared by both strategies: a node is hidden
/// when the query filters it; a path edge is hidden when all of its sets are
/// filtered or when an endpoint is hidden. Neighbor edges follow their
/// endpoints only.
pub(crate) fn apply_filter(frame: &mut LayoutFrame, graph: &PathGraph, query: &dyn PathQuery) {
    frame.hidden_nodes.clear();
    frame.hidden_edges.clear();

    for graph_node in graph.nodes() {
        if query.is_node_filtered(graph_node.node.id) {
            frame.hidden_nodes.insert(graph_node.node.id);
        }
    }

    for edge in graph.edges() {
        let endpoint_hidden = frame.hidden_nodes.contains(&edge.source)
            || frame.hidden_nodes.contains(&edge.target);
        let sets_filtered = !edge.sets.is_empty()
            && edge.sets.iter().all(|s| query.is_edge_set_filtered(s));
        if endpoint_hidden || sets_filtered {
            frame.hidden_edges.insert(edge.id.clone());
        }
    }
}

/// Highlight computation shared by both strategies: every node on a selected
/// path is highlighted.
pub(crate) fn apply_selection(frame: &mut LayoutFrame, selection: &PathSelection, paths: &[Path]) {
    frame.highlighted_nodes.clear();
    for path in paths {
        if selection.path_ids.contains(&path.id) {
            for node in &path.nodes {
                frame.highlighted_nodes.insert(node.id);
            }
        }
    }
}

/// Centering translation for a bounding box inside a viewport.
pub(crate) fn center_offset(frame_size: Size, viewport: Size) -> Point {
    Point {
        x: ((viewport.width - frame_size.width) / 2.0).max(0.0),
        y: ((viewport.height - frame_size.height) / 2.0).max(0.0),
    }
}
