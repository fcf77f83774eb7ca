// src/model/loader.rs
//! Loading path batches from JSON.
//!
//! The wire format is an array of `{ "nodes": [...], "edges": [...] }`
//! objects. Path ids are assigned at load time as indices into the batch;
//! derived set lists are computed immediately so downstream consumers never
//! see a path without them.

use std::fs;
use std::path::Path as FsPath;

use crate::error::{PathVisError, Result};
use crate::model::Path;

/// Parses a JSON path batch, assigning ids and deriving set membership.
///
/// # Errors
///
/// Returns an error on malformed JSON or on a path whose edge count does not
/// match its node count.
pub fn parse_paths(json: &str) -> Result<Vec<Path>> {
    let mut paths: Vec<Path> = serde_json::from_str(json)?;
    for (index, path) in paths.iter_mut().enumerate() {
        path.id = index;
        if !path.is_well_formed() {
            return Err(PathVisError::PathData(format!(
                "path {} has {} nodes but {} edges",
                index,
                path.nodes.len(),
                path.edges.len()
            )));
        }
        path.derive_sets();
    }
    Ok(paths)
}

/// Reads and parses a path batch from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_paths(path: &FsPath) -> Result<Vec<Path>> {
    let content = fs::read_to_string(path).map_err(|source| PathVisError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    parse_paths(&content)
}
