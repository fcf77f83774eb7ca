// src/config.rs
//! Visual configuration: node box geometry, label resolution, set-type labels.
//!
//! The engine never hardcodes how a node is labeled or how large its box is;
//! both come from here so the same data can be rendered with different
//! conventions.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PathVisError, Result};
use crate::model::Node;

const DEFAULT_NODE_WIDTH: f64 = 90.0;
const DEFAULT_NODE_HEIGHT: f64 = 20.0;
const DEFAULT_NAME_PROPERTY: &str = "name";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisConfig {
    /// Width of a node box in layout units.
    pub node_width: f64,
    /// Height of a node box in layout units.
    pub node_height: f64,
    /// Property key used as a node's display label.
    pub node_name_property: String,
    /// Maps a set-membership property key to a human-readable set-type label.
    pub set_type_labels: HashMap<String, String>,
}

impl VisConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
            node_name_property: DEFAULT_NAME_PROPERTY.to_string(),
            set_type_labels: HashMap::new(),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PathVisError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the node box has a non-positive dimension.
    pub fn validate(&self) -> Result<()> {
        if self.node_width <= 0.0 || self.node_height <= 0.0 {
            return Err(PathVisError::Config(format!(
                "node box must have positive dimensions, got {}x{}",
                self.node_width, self.node_height
            )));
        }
        Ok(())
    }

    /// Resolves a node's display label via the configured name property.
    /// Falls back to the node id when the property is absent.
    #[must_use]
    pub fn node_label(&self, node: &Node) -> String {
        match node.properties.get(&self.node_name_property) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => node.id.to_string(),
        }
    }

    /// Human-readable label for a set-type property key.
    #[must_use]
    pub fn set_type_label(&self, property_key: &str) -> String {
        self.set_type_labels
            .get(property_key)
            .cloned()
            .unwrap_or_else(|| property_key.to_string())
    }
}

impl Default for VisConfig {
    fn default() -> Self {
        Self::new()
    }
}
