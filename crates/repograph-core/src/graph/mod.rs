//! Dependency graph structure and algorithms.

pub mod cycles;
pub mod dependency_graph;
