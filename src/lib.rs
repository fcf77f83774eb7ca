// src/lib.rs
//! pathvis: renders sets of graph paths as positioned diagram geometry under
//! interchangeable layout strategies, and maintains a hierarchical
//! aggregation tree over the same paths for filtering and sorting.

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod graph;
pub mod hierarchy;
pub mod layout;
pub mod model;
pub mod query;
pub mod sort;
