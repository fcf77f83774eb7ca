// src/graph.rs
//! The directed multigraph built from loaded paths and neighbor expansions.
//!
//! Node and edge identity is keyed by id, so re-inserting the same path is a
//! no-op by construction. Between any two node ids there is at most one edge
//! regardless of direction; an existing edge in either direction satisfies
//! "exists" for neighbor-edge insertion.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::VisConfig;
use crate::model::{Node, NodeId, Path, SetId};

/// Identity of a graph edge: either the wire id of a path edge, or a
/// synthesized neighbor-edge id scoped to one graph instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeId {
    PathEdge(u64),
    NeighborEdge(u64),
}

impl EdgeId {
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            EdgeId::PathEdge(id) => id.to_string(),
            EdgeId::NeighborEdge(n) => format!("neighborEdge{n}"),
        }
    }
}

/// Payload stored per graph node.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub node: Node,
    pub label: String,
    pub is_neighbor_node: bool,
    pub width: f64,
    pub height: f64,
}

/// Payload stored per graph edge.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub id: EdgeId,
    pub is_neighbor_edge: bool,
    pub sets: Vec<SetId>,
}

/// A node pulled in from outside the loaded paths, remembered alongside the
/// source it was attached to so rebuilds can reapply it.
#[derive(Debug, Clone)]
pub struct NeighborRelation {
    pub source_id: NodeId,
    pub node: Node,
}

/// Directed multigraph keyed by node id.
pub struct PathGraph {
    nodes: HashMap<NodeId, GraphNode>,
    edges: HashMap<(NodeId, NodeId), GraphEdge>,
    adjacency: HashMap<NodeId, HashSet<NodeId>>,
    next_neighbor_edge_id: u64,
}

impl PathGraph {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            adjacency: HashMap::new(),
            next_neighbor_edge_id: 0,
        }
    }

    /// Inserts every node and consecutive-pair edge of each path.
    /// First occurrence wins for node metadata; duplicate edges are deduped.
    pub fn add_paths(&mut self, paths: &[Path], config: &VisConfig) {
        for path in paths {
            self.add_path(path, config);
        }
    }

    pub fn add_path(&mut self, path: &Path, config: &VisConfig) {
        let mut prev: Option<NodeId> = None;
        for (i, node) in path.nodes.iter().enumerate() {
            self.ensure_node(node, false, config);
            if let Some(prev_id) = prev {
                let edge = &path.edges[i - 1];
                self.insert_edge(GraphEdge {
                    source: prev_id,
                    target: node.id,
                    id: EdgeId::PathEdge(edge.id),
                    is_neighbor_edge: false,
                    sets: edge.set_ids(),
                });
            }
            prev = Some(node.id);
        }
    }

    /// Attaches a neighbor node to `source_id`.
    ///
    /// Silent no-op when the source is not in the graph. The neighbor node is
    /// inserted only if new; the synthesized edge only if no edge exists
    /// between the pair in either direction.
    pub fn add_neighbor(&mut self, source_id: NodeId, neighbor: &Node, config: &VisConfig) {
        if !self.nodes.contains_key(&source_id) {
            return;
        }

        if !self.nodes.contains_key(&neighbor.id) {
            self.ensure_node(neighbor, true, config);
        }

        if self.edge_between(source_id, neighbor.id).is_some() {
            return;
        }

        self.next_neighbor_edge_id += 1;
        self.insert_edge(GraphEdge {
            source: source_id,
            target: neighbor.id,
            id: EdgeId::NeighborEdge(self.next_neighbor_edge_id),
            is_neighbor_edge: true,
            sets: Vec::new(),
        });
    }

    fn ensure_node(&mut self, node: &Node, is_neighbor: bool, config: &VisConfig) {
        if self.nodes.contains_key(&node.id) {
            return;
        }
        self.nodes.insert(
            node.id,
            GraphNode {
                label: config.node_label(node),
                node: node.clone(),
                is_neighbor_node: is_neighbor,
                width: config.node_width,
                height: config.node_height,
            },
        );
        self.adjacency.entry(node.id).or_default();
    }

    fn insert_edge(&mut self, edge: GraphEdge) {
        let key = (edge.source, edge.target);
        if self.edge_between(edge.source, edge.target).is_some() {
            return;
        }
        self.adjacency.entry(edge.source).or_default().insert(edge.target);
        self.adjacency.entry(edge.target).or_default().insert(edge.source);
        self.edges.insert(key, edge);
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// The edge between two ids, checking both directions.
    #[must_use]
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&GraphEdge> {
        self.edges.get(&(a, b)).or_else(|| self.edges.get(&(b, a)))
    }

    /// Node ids adjacent to `id`, in either edge direction.
    #[must_use]
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .adjacency
            .get(&id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// All node ids, sorted for deterministic iteration.
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.values()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sorted `{ nodes, edges }` JSON rep for inspection and test stability.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let node_ids = self.node_ids();
        let mut edges = BTreeMap::new();
        for edge in self.edges.values() {
            edges.insert(
                format!("{}-{}", edge.source, edge.target),
                json!({
                    "from": edge.source,
                    "to": edge.target,
                    "id": edge.id.label(),
                    "neighbor": edge.is_neighbor_edge,
                }),
            );
        }
        json!({
            "nodes": node_ids,
            "edges": edges.into_values().collect::<Vec<Value>>(),
        })
    }
}

impl Default for PathGraph {
    fn default() -> Self {
        Self::new()
    }
}
