// src/controller.rs
//! The view controller: owns the path list, the neighbor-expansion list, the
//! graph model, and both layout strategies, with exactly one strategy active
//! at a time.
//!
//! External update events route through `apply_update`; every mutation is
//! also a plain method so the controller can be driven without a live bus.
//! Path removal is realized as a full graph rebuild from the remaining paths
//! plus reapplication of all neighbor relations.

use crate::config::VisConfig;
use crate::events::{PathSelection, Update};
use crate::graph::{NeighborRelation, PathGraph};
use crate::layout::{ForceLayout, GraphLayout, LayeredLayout, LayoutFrame, Size};
use crate::model::{Node, NodeId, Path};
use crate::query::PathQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Layered,
    Force,
}

pub struct PathGraphController {
    config: VisConfig,
    paths: Vec<Path>,
    neighbors: Vec<NeighborRelation>,
    graph: PathGraph,
    layered: LayeredLayout,
    force: ForceLayout,
    active: LayoutKind,
}

impl PathGraphController {
    #[must_use]
    pub fn new(config: VisConfig) -> Self {
        let mut controller = Self {
            config,
            paths: Vec::new(),
            neighbors: Vec::new(),
            graph: PathGraph::new(),
            layered: LayeredLayout::new(),
            force: ForceLayout::new(),
            active: LayoutKind::Layered,
        };
        controller.layered.init();
        controller.force.init();
        controller
    }

    /// Discards all loaded data and layout state.
    pub fn reset(&mut self) {
        self.paths.clear();
        self.neighbors.clear();
        self.graph = PathGraph::new();
        self.layered.reset();
        self.force.reset();
    }

    /// Fresh wholesale load: rebuilds the graph from `paths` and renders
    /// under the active strategy.
    pub fn render(&mut self, paths: Vec<Path>) {
        self.paths = paths;
        self.rebuild_graph(None);
        self.render_active();
    }

    /// Incremental single-path add; the active strategy warm-starts from its
    /// current state.
    pub fn add_path(&mut self, path: Path) {
        self.graph.add_path(&path, &self.config);
        match self.active {
            LayoutKind::Layered => self.layered.add_path(&path, &self.graph),
            LayoutKind::Force => self.force.add_path(&path, &self.graph),
        }
        self.paths.push(path);
    }

    /// Attaches a neighbor node and remembers the relation for rebuilds.
    pub fn add_neighbor(&mut self, source_id: NodeId, node: Node) {
        self.graph.add_neighbor(source_id, &node, &self.config);
        match self.active {
            LayoutKind::Layered => self.layered.add_neighbor(source_id, &node, &self.graph),
            LayoutKind::Force => self.force.add_neighbor(source_id, &node, &self.graph),
        }
        self.neighbors.push(NeighborRelation { source_id, node });
    }

    /// Drops every neighbor relation whose source or neighbor is `node_id`,
    /// then rebuilds.
    pub fn remove_neighbor_node(&mut self, node_id: NodeId, query: &dyn PathQuery) {
        self.neighbors
            .retain(|n| n.source_id != node_id && n.node.id != node_id);
        self.update_graph(query);
    }

    /// Drops every neighbor relation touching a neighbor-flagged node
    /// adjacent to `node_id`, then rebuilds. Path-supported content is never
    /// removed.
    pub fn remove_neighbors_of_node(&mut self, node_id: NodeId, query: &dyn PathQuery) {
        let adjacent: Vec<NodeId> = self
            .graph
            .neighbors(node_id)
            .into_iter()
            .filter(|id| {
                self.graph
                    .node(*id)
                    .is_some_and(|n| n.is_neighbor_node)
            })
            .collect();
        self.neighbors
            .retain(|n| !adjacent.contains(&n.source_id) && !adjacent.contains(&n.node.id));
        self.update_graph(query);
    }

    /// Full rebuild from the retained path list plus reapplication of all
    /// neighbor relations, honoring the remove-filtered-paths toggle.
    pub fn update_graph(&mut self, query: &dyn PathQuery) {
        self.rebuild_graph(Some(query));
        self.render_active();
    }

    fn rebuild_graph(&mut self, query: Option<&dyn PathQuery>) {
        self.graph = PathGraph::new();
        for path in &self.paths {
            let excised = query.is_some_and(|q| {
                q.is_remove_filtered_paths() && q.is_path_filtered(path.id)
            });
            if !excised {
                self.graph.add_path(path, &self.config);
            }
        }
        for relation in &self.neighbors {
            self.graph
                .add_neighbor(relation.source_id, &relation.node, &self.config);
        }
    }

    fn render_active(&mut self) {
        match self.active {
            LayoutKind::Layered => self.layered.render(&self.paths, &self.graph),
            LayoutKind::Force => self.force.render(&self.paths, &self.graph),
        }
    }

    /// Switches the active strategy losslessly: the outgoing strategy
    /// releases its state, the incoming one renders the same graph and paths.
    pub fn switch_layout(&mut self, kind: LayoutKind) {
        if kind == self.active {
            return;
        }
        match self.active {
            LayoutKind::Layered => self.layered.prepare_layout_change(),
            LayoutKind::Force => self.force.prepare_layout_change(),
        }
        self.active = kind;
        self.render_active();
    }

    /// Routes one external update to the matching handler.
    pub fn apply_update(&mut self, update: &Update, query: &dyn PathQuery) {
        match update {
            Update::PathSelection(selection) => self.on_path_selection_update(selection),
            Update::QueryUpdate => self.on_query_update(query),
            Update::RemoveFilteredPathsUpdate { .. } => self.update_graph(query),
            Update::SetInfoUpdate | Update::SortUpdate => {}
        }
    }

    /// Query change: remote queries prune the path list itself; the
    /// remove-filtered-paths toggle rebuilds; otherwise the active strategy
    /// restyles in place.
    pub fn on_query_update(&mut self, query: &dyn PathQuery) {
        if query.is_remove_filtered_paths() || query.is_remote_query() {
            if query.is_remote_query() {
                self.paths.retain(|p| !query.is_path_filtered(p.id));
            }
            self.update_graph(query);
        } else {
            match self.active {
                LayoutKind::Layered => self.layered.update_filter(&self.graph, query),
                LayoutKind::Force => self.force.update_filter(&self.graph, query),
            }
        }
    }

    pub fn on_path_selection_update(&mut self, selection: &PathSelection) {
        match self.active {
            LayoutKind::Layered => self.layered.on_path_selection_update(selection, &self.paths),
            LayoutKind::Force => self.force.on_path_selection_update(selection, &self.paths),
        }
    }

    pub fn center_graph(&mut self, viewport: Size) {
        match self.active {
            LayoutKind::Layered => self.layered.center_graph(viewport),
            LayoutKind::Force => self.force.center_graph(viewport),
        }
    }

    #[must_use]
    pub fn min_size(&self) -> Size {
        match self.active {
            LayoutKind::Layered => self.layered.min_size(),
            LayoutKind::Force => self.force.min_size(),
        }
    }

    #[must_use]
    pub fn frame(&self) -> &LayoutFrame {
        match self.active {
            LayoutKind::Layered => self.layered.frame(),
            LayoutKind::Force => self.force.frame(),
        }
    }

    #[must_use]
    pub fn active_layout(&self) -> LayoutKind {
        self.active
    }

    #[must_use]
    pub fn graph(&self) -> &PathGraph {
        &self.graph
    }

    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    #[must_use]
    pub fn neighbors(&self) -> &[NeighborRelation] {
        &self.neighbors
    }

    #[must_use]
    pub fn config(&self) -> &VisConfig {
        &self.config
    }
}
