//! Directed file-dependency graph backed by petgraph::DiGraph.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// Edge payload: the raw specifier that produced the edge plus a global
/// insertion ordinal. Source order is recovered by sorting on the ordinal
/// rather than relying on petgraph's per-node iteration order.
#[derive(Debug, Clone)]
pub struct ImportEdge {
    pub specifier: String,
    pub order: usize,
}

/// Wrapper around petgraph::DiGraph with path-keyed node lookup.
///
/// Nodes exist only for files that touch at least one resolved edge;
/// duplicate edges and self-edges are kept.
pub struct DependencyGraph {
    graph: DiGraph<String, ImportEdge>,
    id_index: HashMap<String, NodeIndex>,
    next_order: usize,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            id_index: HashMap::new(),
            next_order: 0,
        }
    }

    fn ensure_node(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.id_index.get(path) {
            idx
        } else {
            let idx = self.graph.add_node(path.to_string());
            self.id_index.insert(path.to_string(), idx);
            idx
        }
    }

    /// Add a resolved import edge.
    pub fn add_import(&mut self, from: &str, to: &str, specifier: &str) {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);
        let order = self.next_order;
        self.next_order += 1;
        self.graph.add_edge(
            from_idx,
            to_idx,
            ImportEdge {
                specifier: specifier.to_string(),
                order,
            },
        );
    }

    pub fn has_node(&self, path: &str) -> bool {
        self.id_index.contains_key(path)
    }

    /// Outgoing dependency paths in source order (duplicates kept).
    pub fn dependencies_of(&self, path: &str) -> Vec<String> {
        let Some(&idx) = self.id_index.get(path) else {
            return Vec::new();
        };
        let mut edges: Vec<(usize, String)> = self
            .graph
            .edges(idx)
            .map(|e| (e.weight().order, self.graph[e.target()].clone()))
            .collect();
        edges.sort_by_key(|(order, _)| *order);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    /// Number of outgoing edges, duplicates counted.
    pub fn imports_count(&self, path: &str) -> usize {
        self.id_index
            .get(path)
            .map(|&idx| self.graph.edges(idx).count())
            .unwrap_or(0)
    }

    /// Number of incoming edges across the whole graph, duplicates counted.
    pub fn imported_by_count(&self, path: &str) -> usize {
        self.id_index
            .get(path)
            .map(|&idx| self.graph.edges_directed(idx, Direction::Incoming).count())
            .unwrap_or(0)
    }

    /// Every path that is a source or target of at least one edge, ascending.
    pub fn node_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.graph.node_weights().cloned().collect();
        paths.sort();
        paths
    }

    /// Paths with at least one outgoing edge, ascending.
    pub fn source_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph.edges(idx).next().is_some())
            .map(|idx| self.graph[idx].clone())
            .collect();
        paths.sort();
        paths
    }

    /// All edges as (from, to, specifier), in insertion order.
    pub fn edges(&self) -> Vec<(String, String, String)> {
        let mut all: Vec<(usize, (String, String, String))> = self
            .graph
            .edge_indices()
            .filter_map(|e| {
                let (src, tgt) = self.graph.edge_endpoints(e)?;
                let weight = self.graph.edge_weight(e)?;
                Some((
                    weight.order,
                    (
                        self.graph[src].clone(),
                        self.graph[tgt].clone(),
                        weight.specifier.clone(),
                    ),
                ))
            })
            .collect();
        all.sort_by_key(|(order, _)| *order);
        all.into_iter().map(|(_, edge)| edge).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dependencies_preserve_source_order() {
        let mut g = DependencyGraph::new();
        g.add_import("main.js", "b.js", "./b");
        g.add_import("main.js", "a.js", "./a");
        g.add_import("main.js", "c.js", "./c");
        assert_eq!(g.dependencies_of("main.js"), vec!["b.js", "a.js", "c.js"]);
    }

    #[test]
    fn duplicate_edges_both_count() {
        let mut g = DependencyGraph::new();
        g.add_import("main.js", "util.js", "./util");
        g.add_import("main.js", "util.js", "./util");
        assert_eq!(g.imports_count("main.js"), 2);
        assert_eq!(g.imported_by_count("util.js"), 2);
        assert_eq!(
            g.dependencies_of("main.js"),
            vec!["util.js", "util.js"]
        );
    }

    #[test]
    fn self_edge_kept() {
        let mut g = DependencyGraph::new();
        g.add_import("loop.js", "loop.js", "./loop");
        assert_eq!(g.imports_count("loop.js"), 1);
        assert_eq!(g.imported_by_count("loop.js"), 1);
    }

    #[test]
    fn unknown_path_has_no_edges() {
        let g = DependencyGraph::new();
        assert_eq!(g.imports_count("ghost.js"), 0);
        assert_eq!(g.imported_by_count("ghost.js"), 0);
        assert!(g.dependencies_of("ghost.js").is_empty());
        assert!(!g.has_node("ghost.js"));
    }

    #[test]
    fn node_and_source_paths_sorted() {
        let mut g = DependencyGraph::new();
        g.add_import("z.js", "a.js", "./a");
        g.add_import("m.js", "a.js", "./a");
        assert_eq!(g.node_paths(), vec!["a.js", "m.js", "z.js"]);
        assert_eq!(g.source_paths(), vec!["m.js", "z.js"]);
    }

    #[test]
    fn edges_in_insertion_order() {
        let mut g = DependencyGraph::new();
        g.add_import("a.js", "b.js", "./b");
        g.add_import("b.js", "c.js", "./c");
        let edges = g.edges();
        assert_eq!(edges[0], ("a.js".into(), "b.js".into(), "./b".into()));
        assert_eq!(edges[1], ("b.js".into(), "c.js".into(), "./c".into()));
    }
}
