// src/layout/force.rs
//! Force-directed layout strategy.
//!
//! Iterative physical simulation: pairwise repulsion, spring attraction
//! along edges, velocity damping and a per-tick step clamp. The simulation
//! advances one tick at a time under a fixed iteration budget; each tick is a
//! cancellation point, and `reset`/`prepare_layout_change` discard in-flight
//! state immediately.
//!
//! Incremental adds warm-start: existing positions are kept and new nodes
//! are seeded next to their attachment point with deterministic jitter, so a
//! small change never triggers a jarring full relayout.

use std::collections::HashMap;

use crate::events::PathSelection;
use crate::graph::PathGraph;
use crate::layout::{
    apply_filter, apply_selection, center_offset, GraphLayout, LayoutFrame, Point, Size,
};
use crate::model::{Node, NodeId, Path};
use crate::query::PathQuery;

const REPULSION: f64 = 6000.0;
const SPRING: f64 = 0.08;
const LINK_DISTANCE: f64 = 120.0;
const DAMPING: f64 = 0.85;
const MAX_STEP: f64 = 30.0;
const TICK_BUDGET: usize = 300;
const CONVERGENCE_EPS: f64 = 0.5;
const SEED_RADIUS: f64 = 40.0;

pub struct ForceLayout {
    frame: LayoutFrame,
    velocities: HashMap<NodeId, Point>,
    ticks_remaining: usize,
    node_width: f64,
    node_height: f64,
}

impl ForceLayout {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: LayoutFrame::default(),
            velocities: HashMap::new(),
            ticks_remaining: 0,
            node_width: 90.0,
            node_height: 20.0,
        }
    }

    /// True while the simulation still has scheduled ticks.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ticks_remaining > 0
    }

    /// Cancels any in-flight simulation, discarding scheduled ticks.
    pub fn cancel(&mut self) {
        self.ticks_remaining = 0;
        self.velocities.clear();
    }

    /// Seeds positions for nodes not yet placed: next to an already-placed
    /// adjacent node when one exists, otherwise around the current centroid.
    fn seed_new_nodes(&mut self, graph: &PathGraph) {
        let centroid = self.centroid();
        for id in graph.node_ids() {
            if self.frame.positions.contains_key(&id) {
                continue;
            }
            let anchor = graph
                .neighbors(id)
                .into_iter()
                .find_map(|nb| self.frame.positions.get(&nb).copied())
                .unwrap_or(centroid);
            self.frame.positions.insert(
                id,
                Point {
                    x: anchor.x + jitter(id, 0x9e37),
                    y: anchor.y + jitter(id, 0x79b9),
                },
            );
        }
        self.frame.positions.retain(|id, _| graph.contains_node(*id));
        self.velocities.retain(|id, _| graph.contains_node(*id));
    }

    fn centroid(&self) -> Point {
        if self.frame.positions.is_empty() {
            return Point::default();
        }
        let mut ids: Vec<NodeId> = self.frame.positions.keys().copied().collect();
        ids.sort_unstable();
        let n = ids.len() as f64;
        let (sx, sy) = ids.iter().fold((0.0, 0.0), |(sx, sy), id| {
            let p = self.frame.positions[id];
            (sx + p.x, sy + p.y)
        });
        Point { x: sx / n, y: sy / n }
    }

    /// Advances the simulation by one tick. Returns `false` once the budget
    /// is exhausted or movement falls below the convergence threshold.
    pub fn tick(&mut self, graph: &PathGraph) -> bool {
        if self.ticks_remaining == 0 {
            return false;
        }
        self.ticks_remaining -= 1;

        let ids = graph.node_ids();
        if ids.len() <= 1 {
            self.ticks_remaining = 0;
            return false;
        }
        for &id in &ids {
            self.frame.positions.entry(id).or_default();
        }

        let mut forces: HashMap<NodeId, Point> =
            ids.iter().map(|&id| (id, Point::default())).collect();

        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let pa = self.frame.positions[&ids[i]];
                let pb = self.frame.positions[&ids[j]];
                let dx = pa.x - pb.x;
                let dy = pa.y - pb.y;
                let dist2 = (dx * dx + dy * dy).max(0.01);
                let dist = dist2.sqrt();
                let f = REPULSION / dist2;
                let fx = f * dx / dist;
                let fy = f * dy / dist;
                add_force(&mut forces, ids[i], fx, fy);
                add_force(&mut forces, ids[j], -fx, -fy);
            }
        }

        for edge in graph.edges() {
            let pa = self.frame.positions[&edge.source];
            let pb = self.frame.positions[&edge.target];
            let dx = pb.x - pa.x;
            let dy = pb.y - pa.y;
            let len = (dx * dx + dy * dy).sqrt().max(0.001);
            let stretch = len - LINK_DISTANCE;
            let fx = SPRING * stretch * dx / len;
            let fy = SPRING * stretch * dy / len;
            add_force(&mut forces, edge.source, fx, fy);
            add_force(&mut forces, edge.target, -fx, -fy);
        }

        let mut max_move = 0.0f64;
        for &id in &ids {
            let force = forces[&id];
            let velocity = self.velocities.entry(id).or_default();
            velocity.x = (velocity.x + force.x) * DAMPING;
            velocity.y = (velocity.y + force.y) * DAMPING;

            let mut step_x = velocity.x;
            let mut step_y = velocity.y;
            let step_len = (step_x * step_x + step_y * step_y).sqrt();
            if step_len > MAX_STEP {
                step_x = step_x / step_len * MAX_STEP;
                step_y = step_y / step_len * MAX_STEP;
            }

            if let Some(pos) = self.frame.positions.get_mut(&id) {
                pos.x += step_x;
                pos.y += step_y;
            }
            max_move = max_move.max(step_x.hypot(step_y));
        }

        if max_move < CONVERGENCE_EPS {
            self.ticks_remaining = 0;
            return false;
        }
        self.ticks_remaining > 0
    }

    /// Runs scheduled ticks to completion, then normalizes coordinates to
    /// the positive quadrant.
    fn run_to_completion(&mut self, graph: &PathGraph) {
        while self.tick(graph) {}
        self.normalize();
        self.frame.update_bounds(self.node_width, self.node_height);
    }

    /// Shifts all positions so the top-left of the bounding box sits at the
    /// origin.
    fn normalize(&mut self) {
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        for p in self.frame.positions.values() {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
        }
        if min_x == f64::MAX {
            return;
        }
        for p in self.frame.positions.values_mut() {
            p.x -= min_x;
            p.y -= min_y;
        }
    }

    fn restart(&mut self, graph: &PathGraph) {
        if let Some(graph_node) = graph.nodes().next() {
            self.node_width = graph_node.width;
            self.node_height = graph_node.height;
        }
        self.seed_new_nodes(graph);
        self.ticks_remaining = TICK_BUDGET;
        self.run_to_completion(graph);
    }
}

impl Default for ForceLayout {
    fn default() -> Self {
        Self::new()
    }
}

fn add_force(forces: &mut HashMap<NodeId, Point>, id: NodeId, fx: f64, fy: f64) {
    if let Some(f) = forces.get_mut(&id) {
        f.x += fx;
        f.y += fy;
    }
}

/// Deterministic pseudo-random offset in `[-SEED_RADIUS, SEED_RADIUS)`,
/// derived from the node id so layouts are reproducible.
fn jitter(id: NodeId, salt: u64) -> f64 {
    let mixed = (id ^ salt).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    let unit = (mixed >> 11) as f64 / (1u64 << 53) as f64;
    (unit * 2.0 - 1.0) * SEED_RADIUS
}

impl GraphLayout for ForceLayout {
    fn init(&mut self) {
        self.frame.clear();
        self.velocities.clear();
        self.ticks_remaining = 0;
    }

    fn render(&mut self, _paths: &[Path], graph: &PathGraph) {
        // Warm start: positions of nodes still in the graph are kept.
        self.restart(graph);
    }

    fn add_path(&mut self, _path: &Path, graph: &PathGraph) {
        self.restart(graph);
    }

    fn add_neighbor(&mut self, _source_id: NodeId, _neighbor: &Node, graph: &PathGraph) {
        self.restart(graph);
    }

    fn update_filter(&mut self, graph: &PathGraph, query: &dyn PathQuery) {
        apply_filter(&mut self.frame, graph, query);
    }

    fn on_path_selection_update(&mut self, selection: &PathSelection, paths: &[Path]) {
        apply_selection(&mut self.frame, selection, paths);
    }

    fn prepare_layout_change(&mut self) {
        self.cancel();
        self.frame.clear();
    }

    fn reset(&mut self) {
        self.cancel();
        self.frame.clear();
    }

    fn min_size(&self) -> Size {
        Size {
            width: self.frame.size.width + self.node_width,
            height: self.frame.size.height + self.node_height,
        }
    }

    fn center_graph(&mut self, viewport: Size) {
        self.frame.offset = center_offset(self.frame.size, viewport);
    }

    fn frame(&self) -> &LayoutFrame {
        &self.frame
    }
}
