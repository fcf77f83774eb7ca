// src/events.rs
//! Typed update kinds exchanged with the surrounding application.
//!
//! The bus transport itself is an external collaborator; this module defines
//! the payloads and a minimal subscription registry so components can be
//! wired together. The controller's mutation methods are callable without a
//! bus, which is how the tests drive it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    PathSelection,
    QueryUpdate,
    RemoveFilteredPathsUpdate,
    SetInfoUpdate,
    SortUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionType {
    Selected,
    Hovered,
}

/// Payload of a `PathSelection` update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSelection {
    pub selection_type: SelectionType,
    pub path_ids: Vec<usize>,
}

/// One update as delivered to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Update {
    PathSelection(PathSelection),
    QueryUpdate,
    RemoveFilteredPathsUpdate { remove: bool },
    SetInfoUpdate,
    SortUpdate,
}

impl Update {
    #[must_use]
    pub fn kind(&self) -> UpdateKind {
        match self {
            Update::PathSelection(_) => UpdateKind::PathSelection,
            Update::QueryUpdate => UpdateKind::QueryUpdate,
            Update::RemoveFilteredPathsUpdate { .. } => UpdateKind::RemoveFilteredPathsUpdate,
            Update::SetInfoUpdate => UpdateKind::SetInfoUpdate,
            Update::SortUpdate => UpdateKind::SortUpdate,
        }
    }
}

type Handler = Box<dyn FnMut(&Update)>;

/// Minimal subscription registry keyed by update kind.
#[derive(Default)]
pub struct ListenerBus {
    handlers: HashMap<UpdateKind, Vec<Handler>>,
}

impl ListenerBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: UpdateKind, handler: F)
    where
        F: FnMut(&Update) + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Delivers an update to every subscriber of its kind. Taking `&mut self`
    /// means a handler can never re-enter the bus mid-dispatch.
    pub fn notify(&mut self, update: &Update) {
        if let Some(handlers) = self.handlers.get_mut(&update.kind()) {
            for handler in handlers {
                handler(update);
            }
        }
    }

    #[must_use]
    pub fn subscriber_count(&self, kind: UpdateKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}
