// src/model/path.rs
//! Paths are ordered sequences of typed nodes and connecting edges.
//!
//! Edges carry set membership in their properties: every property whose key
//! does not start with `'_'` names one or more sets the edge belongs to.
//! Underscore-prefixed keys are private bookkeeping and never become sets.

use std::collections::BTreeSet;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type NodeId = u64;
pub type SetId = String;

/// A node as it appears on the wire. Multiple paths may reference the same id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

/// An edge between two consecutive nodes of one path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: u64,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

impl Edge {
    /// Set ids this edge belongs to, across all non-private properties.
    /// Property values may be a single set id or a list of set ids.
    #[must_use]
    pub fn set_ids(&self) -> Vec<SetId> {
        let mut sets = Vec::new();
        for (key, value) in &self.properties {
            if key.starts_with('_') {
                continue;
            }
            collect_set_ids(value, &mut sets);
        }
        sets
    }

    /// Non-private property keys, i.e. the set-type keys this edge uses.
    #[must_use]
    pub fn set_type_keys(&self) -> Vec<String> {
        self.properties
            .keys()
            .filter(|k| !k.starts_with('_'))
            .cloned()
            .collect()
    }
}

fn collect_set_ids(value: &Value, out: &mut Vec<SetId>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => {
            for item in items {
                collect_set_ids(item, out);
            }
        }
        Value::Number(n) => out.push(n.to_string()),
        _ => {}
    }
}

/// One route through the source data.
///
/// Immutable once loaded, except for the batch-assigned `id` and the derived
/// `sets` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    #[serde(default)]
    pub id: usize,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub sets: Vec<SetId>,
}

impl Path {
    /// Recomputes the derived set list from edge properties, deduplicated
    /// and in stable order.
    pub fn derive_sets(&mut self) {
        let mut seen = BTreeSet::new();
        for edge in &self.edges {
            for set_id in edge.set_ids() {
                seen.insert(set_id);
            }
        }
        self.sets = seen.into_iter().collect();
    }

    /// True when the node/edge counts form a valid sequence
    /// (`edges.len() == nodes.len() - 1`).
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.nodes.is_empty() && self.edges.len() == self.nodes.len() - 1
    }
}
