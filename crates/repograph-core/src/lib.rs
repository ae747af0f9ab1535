//! Repograph Core — static analysis engine for repository structure and
//! import dependency graphs.
//!
//! This crate contains all analysis logic: tree-sitter parsing into a common
//! structural model, file-hierarchy assembly, relative-import resolution,
//! dependency-graph construction, analytics, and cycle detection.

pub mod acquire;
pub mod config;
pub mod external;
pub mod graph;
pub mod languages;
pub mod output;
pub mod phases;
pub mod pipeline;
