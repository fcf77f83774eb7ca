// src/hierarchy.rs
//! Hierarchical aggregation tree over loaded paths.
//!
//! Four wrapper kinds index the same path set: by node, by node type, by set,
//! and by set type. Leaf wrappers answer `is_filtered` straight from the
//! query predicate; type wrappers AND their children on demand, so the
//! roll-up is always consistent with the latest filter state without an
//! invalidation step.

use std::collections::HashMap;

use crate::config::VisConfig;
use crate::model::{Edge, Node, NodeId, Path, SetId};
use crate::query::PathQuery;
use crate::sort::SortingStrategy;

/// The shape all four wrapper kinds share.
pub trait HierarchyElement {
    /// Ids of paths currently contributing to this element.
    fn path_ids(&self) -> &[usize];

    fn is_filtered(&self, query: &dyn PathQuery) -> bool;

    fn label(&self, config: &VisConfig) -> String;
}

/// One wrapper per node id; tracks the paths passing through that node.
pub struct NodeWrapper {
    pub node: Node,
    path_ids: Vec<usize>,
}

impl NodeWrapper {
    fn new(node: Node) -> Self {
        Self {
            node,
            path_ids: Vec::new(),
        }
    }

    pub fn add_path(&mut self, path: &Path) {
        if !self.path_ids.contains(&path.id) {
            self.path_ids.push(path.id);
        }
    }

    pub fn remove_path(&mut self, path_id: usize) {
        self.path_ids.retain(|&id| id != path_id);
    }

    /// Comparator ordering paths by presence of this node, registered on
    /// double-click in the statistics panel.
    #[must_use]
    pub fn sort_strategy(&self) -> SortingStrategy {
        SortingStrategy::node_presence(vec![self.node.id])
    }
}

impl HierarchyElement for NodeWrapper {
    fn path_ids(&self) -> &[usize] {
        &self.path_ids
    }

    fn is_filtered(&self, query: &dyn PathQuery) -> bool {
        query.is_node_filtered(self.node.id)
    }

    fn label(&self, config: &VisConfig) -> String {
        config.node_label(&self.node)
    }
}

/// One wrapper per node type; owns the node wrappers of that type.
pub struct NodeTypeWrapper {
    pub node_type: String,
    wrappers: HashMap<NodeId, NodeWrapper>,
    /// Child order, by first insertion.
    order: Vec<NodeId>,
    path_ids: Vec<usize>,
}

impl NodeTypeWrapper {
    #[must_use]
    pub fn new(node_type: String) -> Self {
        Self {
            node_type,
            wrappers: HashMap::new(),
            order: Vec::new(),
            path_ids: Vec::new(),
        }
    }

    /// Creates-or-reuses the wrapper for `node.id` and records the path at
    /// both levels, deduplicated.
    pub fn add_node(&mut self, node: &Node, path: &Path) {
        if !self.path_ids.contains(&path.id) {
            self.path_ids.push(path.id);
        }
        let wrapper = self.wrappers.entry(node.id).or_insert_with(|| {
            self.order.push(node.id);
            NodeWrapper::new(node.clone())
        });
        wrapper.add_path(path);
    }

    /// Detaches the child wrapper entirely. Missing child is a no-op.
    pub fn remove_node(&mut self, node_id: NodeId) {
        if self.wrappers.remove(&node_id).is_some() {
            self.order.retain(|&id| id != node_id);
        }
    }

    /// Removes the path id here and in every child.
    pub fn remove_path(&mut self, path_id: usize) {
        self.path_ids.retain(|&id| id != path_id);
        for wrapper in self.wrappers.values_mut() {
            wrapper.remove_path(path_id);
        }
    }

    #[must_use]
    pub fn children(&self) -> Vec<&NodeWrapper> {
        self.order
            .iter()
            .filter_map(|id| self.wrappers.get(id))
            .collect()
    }

    #[must_use]
    pub fn child(&self, node_id: NodeId) -> Option<&NodeWrapper> {
        self.wrappers.get(&node_id)
    }
}

impl HierarchyElement for NodeTypeWrapper {
    fn path_ids(&self) -> &[usize] {
        &self.path_ids
    }

    /// Filtered iff every child is filtered.
    fn is_filtered(&self, query: &dyn PathQuery) -> bool {
        self.wrappers.values().all(|w| w.is_filtered(query))
    }

    fn label(&self, _config: &VisConfig) -> String {
        self.node_type.clone()
    }
}

/// One wrapper per set id; tracks the paths whose nodes/edges belong to it.
pub struct SetWrapper {
    pub set_id: SetId,
    path_ids: Vec<usize>,
}

impl SetWrapper {
    fn new(set_id: SetId) -> Self {
        Self {
            set_id,
            path_ids: Vec::new(),
        }
    }

    pub fn add_node(&mut self, _node: &Node, path: &Path) {
        self.add_path_id(path.id);
    }

    pub fn add_edge(&mut self, _edge: &Edge, path: &Path) {
        self.add_path_id(path.id);
    }

    fn add_path_id(&mut self, path_id: usize) {
        if !self.path_ids.contains(&path_id) {
            self.path_ids.push(path_id);
        }
    }

    pub fn remove_path(&mut self, path_id: usize) {
        self.path_ids.retain(|&id| id != path_id);
    }

    #[must_use]
    pub fn sort_strategy(&self) -> SortingStrategy {
        SortingStrategy::set_presence(vec![self.set_id.clone()])
    }
}

impl HierarchyElement for SetWrapper {
    fn path_ids(&self) -> &[usize] {
        &self.path_ids
    }

    fn is_filtered(&self, query: &dyn PathQuery) -> bool {
        query.is_node_set_filtered(&self.set_id) && query.is_edge_set_filtered(&self.set_id)
    }

    fn label(&self, _config: &VisConfig) -> String {
        self.set_id.clone()
    }
}

/// One wrapper per set-type property key; owns the set wrappers of that type.
pub struct SetTypeWrapper {
    pub set_type: String,
    wrappers: HashMap<SetId, SetWrapper>,
    order: Vec<SetId>,
    path_ids: Vec<usize>,
}

impl SetTypeWrapper {
    #[must_use]
    pub fn new(set_type: String) -> Self {
        Self {
            set_type,
            wrappers: HashMap::new(),
            order: Vec::new(),
            path_ids: Vec::new(),
        }
    }

    pub fn add_node(&mut self, set_id: &str, node: &Node, path: &Path) {
        self.record(path.id);
        self.ensure_child(set_id).add_node(node, path);
    }

    pub fn add_edge(&mut self, set_id: &str, edge: &Edge, path: &Path) {
        self.record(path.id);
        self.ensure_child(set_id).add_edge(edge, path);
    }

    fn record(&mut self, path_id: usize) {
        if !self.path_ids.contains(&path_id) {
            self.path_ids.push(path_id);
        }
    }

    fn ensure_child(&mut self, set_id: &str) -> &mut SetWrapper {
        self.wrappers.entry(set_id.to_string()).or_insert_with(|| {
            self.order.push(set_id.to_string());
            SetWrapper::new(set_id.to_string())
        })
    }

    /// Detaches the child wrapper entirely. Missing child is a no-op.
    pub fn remove_set(&mut self, set_id: &str) {
        if self.wrappers.remove(set_id).is_some() {
            self.order.retain(|id| id != set_id);
        }
    }

    /// Removes the path id here and in every child.
    pub fn remove_path(&mut self, path_id: usize) {
        self.path_ids.retain(|&id| id != path_id);
        for wrapper in self.wrappers.values_mut() {
            wrapper.remove_path(path_id);
        }
    }

    #[must_use]
    pub fn children(&self) -> Vec<&SetWrapper> {
        self.order
            .iter()
            .filter_map(|id| self.wrappers.get(id))
            .collect()
    }

    #[must_use]
    pub fn child(&self, set_id: &str) -> Option<&SetWrapper> {
        self.wrappers.get(set_id)
    }
}

impl HierarchyElement for SetTypeWrapper {
    fn path_ids(&self) -> &[usize] {
        &self.path_ids
    }

    fn is_filtered(&self, query: &dyn PathQuery) -> bool {
        self.wrappers.values().all(|w| w.is_filtered(query))
    }

    fn label(&self, config: &VisConfig) -> String {
        config.set_type_label(&self.set_type)
    }
}

/// Root of the aggregation tree: node-type wrappers keyed by node type and
/// set-type wrappers keyed by set-membership property key.
#[derive(Default)]
pub struct PathStats {
    node_types: HashMap<String, NodeTypeWrapper>,
    node_type_order: Vec<String>,
    set_types: HashMap<String, SetTypeWrapper>,
    set_type_order: Vec<String>,
}

impl PathStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes one path: every node under its node-type wrapper, every edge
    /// set under its set-type wrapper.
    pub fn add_path(&mut self, path: &Path) {
        for node in &path.nodes {
            let wrapper = self.ensure_node_type(&node.node_type);
            wrapper.add_node(node, path);
        }
        for edge in &path.edges {
            for key in edge.set_type_keys() {
                let sets = {
                    let mut out = Vec::new();
                    if let Some(value) = edge.properties.get(&key) {
                        collect_strings(value, &mut out);
                    }
                    out
                };
                let wrapper = self.ensure_set_type(&key);
                for set_id in sets {
                    wrapper.add_edge(&set_id, edge, path);
                }
            }
        }
    }

    /// Removes a path id at every level of the tree.
    pub fn remove_path(&mut self, path_id: usize) {
        for wrapper in self.node_types.values_mut() {
            wrapper.remove_path(path_id);
        }
        for wrapper in self.set_types.values_mut() {
            wrapper.remove_path(path_id);
        }
    }

    /// Rebuilds the whole tree from a fresh path batch.
    pub fn rebuild(&mut self, paths: &[Path]) {
        self.node_types.clear();
        self.node_type_order.clear();
        self.set_types.clear();
        self.set_type_order.clear();
        for path in paths {
            self.add_path(path);
        }
    }

    fn ensure_node_type(&mut self, node_type: &str) -> &mut NodeTypeWrapper {
        self.node_types
            .entry(node_type.to_string())
            .or_insert_with(|| {
                self.node_type_order.push(node_type.to_string());
                NodeTypeWrapper::new(node_type.to_string())
            })
    }

    fn ensure_set_type(&mut self, set_type: &str) -> &mut SetTypeWrapper {
        self.set_types
            .entry(set_type.to_string())
            .or_insert_with(|| {
                self.set_type_order.push(set_type.to_string());
                SetTypeWrapper::new(set_type.to_string())
            })
    }

    #[must_use]
    pub fn node_type(&self, node_type: &str) -> Option<&NodeTypeWrapper> {
        self.node_types.get(node_type)
    }

    #[must_use]
    pub fn set_type(&self, set_type: &str) -> Option<&SetTypeWrapper> {
        self.set_types.get(set_type)
    }

    #[must_use]
    pub fn node_types(&self) -> Vec<&NodeTypeWrapper> {
        self.node_type_order
            .iter()
            .filter_map(|t| self.node_types.get(t))
            .collect()
    }

    #[must_use]
    pub fn set_types(&self) -> Vec<&SetTypeWrapper> {
        self.set_type_order
            .iter()
            .filter_map(|t| self.set_types.get(t))
            .collect()
    }
}

fn collect_strings(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::String(s) => out.push(s.clone()),
        serde_json::Value::Array(items) => {
            for item in items {
                collect_strings(item, out);
            }
        }
        serde_json::Value::Number(n) => out.push(n.to_string()),
        _ => {}
    }
}
