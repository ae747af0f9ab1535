//! Phase 5: dependency analytics over the finished graph.

use std::collections::HashMap;

use crate::config::{DependencyAnalysis, DependencyInfo, ParsedFile};
use crate::graph::cycles::find_circular_dependencies;
use crate::graph::dependency_graph::DependencyGraph;

const TOP_N: usize = 10;

/// Run the analysis phase: rankings, isolated files, and cycles.
pub fn run_analysis_phase(
    files: &HashMap<String, ParsedFile>,
    graph: &DependencyGraph,
) -> DependencyAnalysis {
    // Isolated: known files with neither outgoing nor incoming resolved
    // edges. Unresolved imports do not count against isolation.
    let mut isolated_files: Vec<String> = files
        .keys()
        .filter(|path| graph.imports_count(path) == 0 && graph.imported_by_count(path) == 0)
        .cloned()
        .collect();
    isolated_files.sort();

    // Every file that is a source or target of at least one edge is ranked.
    let dep_info: Vec<DependencyInfo> = graph
        .node_paths()
        .into_iter()
        .map(|path| DependencyInfo {
            imports_count: graph.imports_count(&path),
            imported_by_count: graph.imported_by_count(&path),
            path,
        })
        .collect();

    let mut most_imported = dep_info.clone();
    most_imported.sort_by(|a, b| {
        b.imported_by_count
            .cmp(&a.imported_by_count)
            .then_with(|| a.path.cmp(&b.path))
    });
    most_imported.truncate(TOP_N);

    let mut most_importing = dep_info;
    most_importing.sort_by(|a, b| {
        b.imports_count
            .cmp(&a.imports_count)
            .then_with(|| a.path.cmp(&b.path))
    });
    most_importing.truncate(TOP_N);

    DependencyAnalysis {
        most_imported,
        most_importing,
        isolated_files,
        circular_dependencies: find_circular_dependencies(graph),
    }
}
