// src/sort.rs
//! Path sorting strategies and their manager.
//!
//! Double-clicking a node or set in the statistics panel registers a
//! presence comparator here. Registration replaces any prior strategy of the
//! same kind, so there is a single active strategy per kind; the manager
//! chains the rest in registration order with a stable path-id tiebreaker.

use std::cmp::Ordering;

use crate::model::{NodeId, Path, SetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    NodePresence,
    SetPresence,
    PathLength,
}

/// Orders paths by one criterion. Presence strategies put paths containing
/// any of the wanted ids first.
#[derive(Debug, Clone)]
pub struct SortingStrategy {
    pub kind: StrategyKind,
    node_ids: Vec<NodeId>,
    set_ids: Vec<SetId>,
}

impl SortingStrategy {
    #[must_use]
    pub fn node_presence(node_ids: Vec<NodeId>) -> Self {
        Self {
            kind: StrategyKind::NodePresence,
            node_ids,
            set_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn set_presence(set_ids: Vec<SetId>) -> Self {
        Self {
            kind: StrategyKind::SetPresence,
            node_ids: Vec::new(),
            set_ids,
        }
    }

    #[must_use]
    pub fn path_length() -> Self {
        Self {
            kind: StrategyKind::PathLength,
            node_ids: Vec::new(),
            set_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn compare(&self, a: &Path, b: &Path) -> Ordering {
        match self.kind {
            StrategyKind::NodePresence => {
                let pa = a.nodes.iter().any(|n| self.node_ids.contains(&n.id));
                let pb = b.nodes.iter().any(|n| self.node_ids.contains(&n.id));
                pb.cmp(&pa)
            }
            StrategyKind::SetPresence => {
                let pa = a.sets.iter().any(|s| self.set_ids.contains(s));
                let pb = b.sets.iter().any(|s| self.set_ids.contains(s));
                pb.cmp(&pa)
            }
            StrategyKind::PathLength => a.nodes.len().cmp(&b.nodes.len()),
        }
    }
}

/// Holds the chain of active strategies, one per kind at most.
#[derive(Debug, Default)]
pub struct SortingManager {
    strategies: Vec<SortingStrategy>,
}

impl SortingManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a strategy, replacing any prior one of the same kind in
    /// place; new kinds append to the end of the chain.
    pub fn add_or_replace(&mut self, strategy: SortingStrategy) {
        if let Some(existing) = self
            .strategies
            .iter_mut()
            .find(|s| s.kind == strategy.kind)
        {
            *existing = strategy;
        } else {
            self.strategies.push(strategy);
        }
    }

    #[must_use]
    pub fn strategies(&self) -> &[SortingStrategy] {
        &self.strategies
    }

    /// Chained comparison across the strategy chain, tiebroken by path id
    /// for stability.
    #[must_use]
    pub fn compare(&self, a: &Path, b: &Path) -> Ordering {
        for strategy in &self.strategies {
            let ordering = strategy.compare(a, b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.id.cmp(&b.id)
    }

    /// Sorts a path batch under the current chain.
    pub fn sort(&self, paths: &mut [Path]) {
        paths.sort_by(|a, b| self.compare(a, b));
    }
}
