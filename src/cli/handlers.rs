// src/cli/handlers.rs
//! Command handlers for the pathvis binary.

use std::path::Path as FsPath;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::LayoutArg;
use crate::config::VisConfig;
use crate::controller::{LayoutKind, PathGraphController};
use crate::hierarchy::{HierarchyElement, PathStats};
use crate::model::load_paths;

pub fn load_config(path: Option<&FsPath>) -> Result<VisConfig> {
    match path {
        Some(p) => Ok(VisConfig::load(p)?),
        None => Ok(VisConfig::new()),
    }
}

/// Lays out the batch under the chosen strategy and prints the frame.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded.
pub fn handle_layout(
    input: &FsPath,
    layout: LayoutArg,
    json: bool,
    config: VisConfig,
) -> Result<()> {
    let paths = load_paths(input)?;
    let mut controller = PathGraphController::new(config);
    controller.render(paths);
    if layout == LayoutArg::Force {
        controller.switch_layout(LayoutKind::Force);
    }

    let frame = controller.frame();
    if json {
        let mut positions: Vec<_> = frame
            .positions
            .iter()
            .map(|(id, p)| json!({ "id": id, "x": p.x, "y": p.y }))
            .collect();
        positions.sort_by_key(|v| v["id"].as_u64());
        let out = json!({
            "layout": match layout {
                LayoutArg::Layered => "layered",
                LayoutArg::Force => "force",
            },
            "positions": positions,
            "size": frame.size,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{} {} nodes, {} edges, frame {:.0}x{:.0}",
        "layout:".bold(),
        controller.graph().node_count(),
        controller.graph().edge_count(),
        frame.size.width,
        frame.size.height
    );
    for id in controller.graph().node_ids() {
        if let (Some(pos), Some(node)) = (frame.positions.get(&id), controller.graph().node(id)) {
            println!("  {:>6}  ({:>7.1}, {:>7.1})  {}", id, pos.x, pos.y, node.label);
        }
    }
    Ok(())
}

/// Prints the aggregation tree: node types with their nodes, set types with
/// their sets, and per-wrapper path counts.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded.
pub fn handle_stats(input: &FsPath, json: bool, config: VisConfig) -> Result<()> {
    let paths = load_paths(input)?;
    let mut stats = PathStats::new();
    for path in &paths {
        stats.add_path(path);
    }

    if json {
        let node_types: Vec<_> = stats
            .node_types()
            .iter()
            .map(|t| {
                json!({
                    "type": t.node_type,
                    "paths": t.path_ids().len(),
                    "nodes": t.children().len(),
                })
            })
            .collect();
        let set_types: Vec<_> = stats
            .set_types()
            .iter()
            .map(|t| {
                json!({
                    "type": t.set_type,
                    "paths": t.path_ids().len(),
                    "sets": t.children().len(),
                })
            })
            .collect();
        let out = json!({ "node_types": node_types, "set_types": set_types });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} {} paths", "stats:".bold(), paths.len());
    for type_wrapper in stats.node_types() {
        println!(
            "  {} ({} paths)",
            type_wrapper.label(&config).cyan(),
            type_wrapper.path_ids().len()
        );
        for node_wrapper in type_wrapper.children() {
            println!(
                "    {} ({} paths)",
                node_wrapper.label(&config),
                node_wrapper.path_ids().len()
            );
        }
    }
    for type_wrapper in stats.set_types() {
        println!(
            "  {} ({} paths)",
            type_wrapper.label(&config).green(),
            type_wrapper.path_ids().len()
        );
        for set_wrapper in type_wrapper.children() {
            println!(
                "    {} ({} paths)",
                set_wrapper.label(&config),
                set_wrapper.path_ids().len()
            );
        }
    }
    Ok(())
}

/// Prints graph model counts.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded.
pub fn handle_info(input: &FsPath, config: VisConfig) -> Result<()> {
    let paths = load_paths(input)?;
    let mut controller = PathGraphController::new(config);
    controller.render(paths);
    println!(
        "{} {} paths, {} nodes, {} edges",
        "graph:".bold(),
        controller.paths().len(),
        controller.graph().node_count(),
        controller.graph().edge_count()
    );
    Ok(())
}
