// src/query.rs
//! The filter predicate seam.
//!
//! The engine never decides filter truth itself; it asks the query subsystem
//! through this trait and applies the current answer. `StaticQuery` is the
//! in-crate implementation backed by explicit filter sets, used by tests and
//! the CLI.

use std::collections::HashSet;

use crate::model::NodeId;

pub trait PathQuery {
    fn is_path_filtered(&self, path_id: usize) -> bool;
    fn is_node_filtered(&self, node_id: NodeId) -> bool;
    fn is_node_set_filtered(&self, set_id: &str) -> bool;
    fn is_edge_set_filtered(&self, set_id: &str) -> bool;
    /// When true, filtered paths are excised from the graph model instead of
    /// merely restyled.
    fn is_remove_filtered_paths(&self) -> bool;
    /// When true, the currently loaded path list itself is pruned on query
    /// updates (server-side filtering already happened).
    fn is_remote_query(&self) -> bool;
}

#[derive(Debug, Default, Clone)]
pub struct StaticQuery {
    filtered_paths: HashSet<usize>,
    filtered_nodes: HashSet<NodeId>,
    filtered_node_sets: HashSet<String>,
    filtered_edge_sets: HashSet<String>,
    remove_filtered_paths: bool,
    remote_query: bool,
}

impl StaticQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_path(&mut self, path_id: usize) {
        self.filtered_paths.insert(path_id);
    }

    pub fn unfilter_path(&mut self, path_id: usize) {
        self.filtered_paths.remove(&path_id);
    }

    pub fn filter_node(&mut self, node_id: NodeId) {
        self.filtered_nodes.insert(node_id);
    }

    pub fn unfilter_node(&mut self, node_id: NodeId) {
        self.filtered_nodes.remove(&node_id);
    }

    /// Filters a set for both node and edge membership.
    pub fn filter_set(&mut self, set_id: &str) {
        self.filtered_node_sets.insert(set_id.to_string());
        self.filtered_edge_sets.insert(set_id.to_string());
    }

    pub fn unfilter_set(&mut self, set_id: &str) {
        self.filtered_node_sets.remove(set_id);
        self.filtered_edge_sets.remove(set_id);
    }

    pub fn set_remove_filtered_paths(&mut self, remove: bool) {
        self.remove_filtered_paths = remove;
    }

    pub fn set_remote_query(&mut self, remote: bool) {
        self.remote_query = remote;
    }
}

impl PathQuery for StaticQuery {
    fn is_path_filtered(&self, path_id: usize) -> bool {
        self.filtered_paths.contains(&path_id)
    }

    fn is_node_filtered(&self, node_id: NodeId) -> bool {
        self.filtered_nodes.contains(&node_id)
    }

    fn is_node_set_filtered(&self, set_id: &str) -> bool {
        self.filtered_node_sets.contains(set_id)
    }

    fn is_edge_set_filtered(&self, set_id: &str) -> bool {
        self.filtered_edge_sets.contains(set_id)
    }

    fn is_remove_filtered_paths(&self) -> bool {
        self.remove_filtered_paths
    }

    fn is_remote_query(&self) -> bool {
        self.remote_query
    }
}
