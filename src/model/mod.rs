// src/model/mod.rs
//! Path data model: nodes, edges, paths, and batch loading.

pub mod loader;
pub mod path;

pub use loader::{load_paths, parse_paths};
pub use path::{Edge, Node, NodeId, Path, SetId};
