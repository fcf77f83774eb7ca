// src/layout/layered.rs
//! Layered (Sugiyama-style) layout strategy.
//!
//! Three phases per connected component: longest-path rank assignment in
//! Kahn order, iterated barycenter crossing reduction, coordinate
//! assignment. Cycles never fail the layout: nodes left unranked by the
//! topological pass are placed below the deepest rank. Disconnected
//! components are laid out independently and packed side by side.

use std::collections::{HashMap, HashSet};

use crate::events::PathSelection;
use crate::graph::PathGraph;
use crate::layout::{
    apply_filter, apply_selection, center_offset, GraphLayout, LayoutFrame, Point, Size,
};
use crate::model::{Node, NodeId, Path};
use crate::query::PathQuery;

const RANK_GAP: f64 = 40.0;
const NODE_GAP: f64 = 20.0;
const COMPONENT_GAP: f64 = 40.0;
const CROSSING_ITERATIONS: usize = 4;
const MARGIN: f64 = 10.0;

pub struct LayeredLayout {
    frame: LayoutFrame,
    node_width: f64,
    node_height: f64,
}

/// Dense index view over the graph used by the layout phases.
struct LayoutIndex {
    ids: Vec<NodeId>,
    adj: Vec<Vec<usize>>,
    rev: Vec<Vec<usize>>,
}

impl LayoutIndex {
    fn build(graph: &PathGraph) -> Self {
        let ids = graph.node_ids();
        let pos: HashMap<NodeId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let mut adj = vec![Vec::new(); ids.len()];
        let mut rev = vec![Vec::new(); ids.len()];
        for edge in graph.edges() {
            let (Some(&s), Some(&t)) = (pos.get(&edge.source), pos.get(&edge.target)) else {
                continue;
            };
            adj[s].push(t);
            rev[t].push(s);
        }
        for list in adj.iter_mut().chain(rev.iter_mut()) {
            list.sort_unstable();
            list.dedup();
        }
        Self { ids, adj, rev }
    }

    /// Weakly connected components as sorted index lists.
    fn components(&self) -> Vec<Vec<usize>> {
        let n = self.ids.len();
        let mut seen = vec![false; n];
        let mut components = Vec::new();
        for start in 0..n {
            if seen[start] {
                continue;
            }
            let mut member = Vec::new();
            let mut stack = vec![start];
            seen[start] = true;
            while let Some(v) = stack.pop() {
                member.push(v);
                for &w in self.adj[v].iter().chain(self.rev[v].iter()) {
                    if !seen[w] {
                        seen[w] = true;
                        stack.push(w);
                    }
                }
            }
            member.sort_unstable();
            components.push(member);
        }
        components
    }
}

impl LayeredLayout {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: LayoutFrame::default(),
            node_width: 90.0,
            node_height: 20.0,
        }
    }

    fn relayout(&mut self, graph: &PathGraph) {
        self.frame.clear();
        if graph.is_empty() {
            return;
        }

        if let Some(graph_node) = graph.nodes().next() {
            self.node_width = graph_node.width;
            self.node_height = graph_node.height;
        }

        let index = LayoutIndex::build(graph);
        let mut x_cursor = 0.0f64;

        for component in index.components() {
            let ranks = assign_ranks(&index, &component);
            let mut order = build_rank_order(&component, &ranks);
            minimize_crossings(&mut order, &index);

            let width = self.place_component(&index, &order, x_cursor);
            x_cursor += width + COMPONENT_GAP;
        }

        self.frame.update_bounds(self.node_width, self.node_height);
    }

    /// Assigns coordinates for one ordered component; returns its width.
    fn place_component(&mut self, index: &LayoutIndex, order: &[Vec<usize>], x_offset: f64) -> f64 {
        let mut width = 0.0f64;
        for (rank, row) in order.iter().enumerate() {
            let y = rank as f64 * (self.node_height + RANK_GAP);
            for (slot, &v) in row.iter().enumerate() {
                let x = x_offset + slot as f64 * (self.node_width + NODE_GAP);
                self.frame.positions.insert(index.ids[v], Point { x, y });
                width = width.max(x - x_offset + self.node_width);
            }
        }
        width
    }
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphLayout for LayeredLayout {
    fn init(&mut self) {
        self.frame.clear();
    }

    fn render(&mut self, _paths: &[Path], graph: &PathGraph) {
        self.relayout(graph);
    }

    fn add_path(&mut self, _path: &Path, graph: &PathGraph) {
        // Rank assignment is global, so an incremental path add relayouts.
        self.relayout(graph);
    }

    fn add_neighbor(&mut self, _source_id: NodeId, _neighbor: &Node, graph: &PathGraph) {
        self.relayout(graph);
    }

    fn update_filter(&mut self, graph: &PathGraph, query: &dyn PathQuery) {
        apply_filter(&mut self.frame, graph, query);
    }

    fn on_path_selection_update(&mut self, selection: &PathSelection, paths: &[Path]) {
        apply_selection(&mut self.frame, selection, paths);
    }

    fn prepare_layout_change(&mut self) {
        self.frame.clear();
    }

    fn reset(&mut self) {
        self.frame.clear();
    }

    fn min_size(&self) -> Size {
        Size {
            width: self.frame.size.width + 2.0 * MARGIN,
            height: self.frame.size.height + 2.0 * MARGIN,
        }
    }

    fn center_graph(&mut self, viewport: Size) {
        self.frame.offset = center_offset(self.frame.size, viewport);
    }

    fn frame(&self) -> &LayoutFrame {
        &self.frame
    }
}

/// Longest-path layering over one component, in Kahn order for determinism.
/// Nodes unreachable by the topological pass (cycle members) fall back to
/// `max_rank + 1` instead of failing.
fn assign_ranks(index: &LayoutIndex, component: &[usize]) -> HashMap<usize, usize> {
    let member: HashSet<usize> = component.iter().copied().collect();
    let mut in_degree: HashMap<usize, usize> = component
        .iter()
        .map(|&v| {
            let preds = index.rev[v].iter().filter(|p| member.contains(p)).count();
            (v, preds)
        })
        .collect();

    let mut queue: Vec<usize> = component
        .iter()
        .copied()
        .filter(|v| in_degree[v] == 0)
        .collect();
    let mut ranks: HashMap<usize, usize> = component.iter().map(|&v| (v, 0)).collect();
    let mut visited = HashSet::new();

    let mut head = 0;
    while head < queue.len() {
        let u = queue[head];
        head += 1;
        visited.insert(u);
        for &v in &index.adj[u] {
            if !member.contains(&v) {
                continue;
            }
            let next = ranks[&u] + 1;
            if next > ranks[&v] {
                ranks.insert(v, next);
            }
            if let Some(deg) = in_degree.get_mut(&v) {
                *deg -= 1;
                if *deg == 0 {
                    queue.push(v);
                }
            }
        }
    }

    if visited.len() < component.len() {
        let max_rank = ranks.values().copied().max().unwrap_or(0);
        for &v in component {
            if !visited.contains(&v) {
                ranks.insert(v, max_rank + 1);
            }
        }
    }

    ranks
}

/// Groups component members into per-rank rows, initially ordered by node id.
fn build_rank_order(component: &[usize], ranks: &HashMap<usize, usize>) -> Vec<Vec<usize>> {
    let max_rank = ranks.values().copied().max().unwrap_or(0);
    let mut order = vec![Vec::new(); max_rank + 1];
    for &v in component {
        order[ranks[&v]].push(v);
    }
    order
}

/// Barycenter of a node relative to the neighbor positions in an adjacent
/// row, or `None` when it has no neighbors there.
fn barycenter(adjacent_row: &[usize], neighbors: &[usize]) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &nb in neighbors {
        if let Some(slot) = adjacent_row.iter().position(|&x| x == nb) {
            sum += slot as f64;
            count += 1;
        }
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn sweep(order: &mut [Vec<usize>], index: &LayoutIndex, row: usize, against: usize, upward: bool) {
    let reference = order[against].clone();
    let mut scored: Vec<(usize, f64)> = order[row]
        .iter()
        .enumerate()
        .map(|(slot, &v)| {
            let neighbors = if upward { &index.rev[v] } else { &index.adj[v] };
            // Nodes without neighbors in the reference row keep their slot.
            let score = barycenter(&reference, neighbors).unwrap_or(slot as f64);
            (v, score)
        })
        .collect();
    scored.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| index.ids[a.0].cmp(&index.ids[b.0]))
    });
    order[row] = scored.into_iter().map(|(v, _)| v).collect();
}

fn count_crossings(row_a: &[usize], row_b: &[usize], index: &LayoutIndex) -> usize {
    let pos_b: HashMap<usize, usize> = row_b.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let mut spans: Vec<(usize, usize)> = Vec::new();
    for (i, &u) in row_a.iter().enumerate() {
        for &v in &index.adj[u] {
            if let Some(&j) = pos_b.get(&v) {
                spans.push((i, j));
            }
        }
    }

    let mut crossings = 0;
    for i in 0..spans.len() {
        for j in (i + 1)..spans.len() {
            let (a1, b1) = spans[i];
            let (a2, b2) = spans[j];
            if (a1 < a2 && b1 > b2) || (a1 > a2 && b1 < b2) {
                crossings += 1;
            }
        }
    }
    crossings
}

fn total_crossings(order: &[Vec<usize>], index: &LayoutIndex) -> usize {
    let mut total = 0;
    for r in 0..order.len().saturating_sub(1) {
        total += count_crossings(&order[r], &order[r + 1], index);
    }
    total
}

/// Alternating forward/backward barycenter sweeps, keeping the best ordering.
fn minimize_crossings(order: &mut Vec<Vec<usize>>, index: &LayoutIndex) {
    if order.len() <= 1 {
        return;
    }

    let mut best = total_crossings(order, index);
    let mut best_order = order.clone();

    for _ in 0..CROSSING_ITERATIONS {
        for r in 1..order.len() {
            sweep(order, index, r, r - 1, true);
        }
        for r in (0..order.len() - 1).rev() {
            sweep(order, index, r, r + 1, false);
        }

        let crossings = total_crossings(order, index);
        if crossings < best {
            best = crossings;
            best_order = order.clone();
        } else {
            *order = best_order;
            return;
        }
    }

    *order = best_order;
}
