//! Shared test helpers for integration tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use repograph_core::config::{AnalysisConfig, ParsedFile, SourceFile};
use repograph_core::graph::dependency_graph::DependencyGraph;
use repograph_core::phases;

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

pub struct PhaseResult {
    pub config: AnalysisConfig,
    pub files: Vec<SourceFile>,
    pub parsed: HashMap<String, ParsedFile>,
    pub graph: DependencyGraph,
}

/// Run the walk phase on a fixture directory.
pub fn run_walk(fixture_name: &str) -> PhaseResult {
    let path = fixture_path(fixture_name);
    let config = AnalysisConfig {
        repo_path: path.to_string_lossy().to_string(),
        ..Default::default()
    };
    let files = phases::walk::run_walk_phase(&config);
    PhaseResult {
        config,
        files,
        parsed: HashMap::new(),
        graph: DependencyGraph::new(),
    }
}

/// Run walk + parsing on a fixture directory.
pub fn run_parsed(fixture_name: &str) -> PhaseResult {
    let mut r = run_walk(fixture_name);
    r.parsed = phases::parsing::run_parsing_phase(&r.config, &r.files);
    r
}

/// Run walk + parsing + imports on a fixture directory.
pub fn run_graph(fixture_name: &str) -> PhaseResult {
    let mut r = run_parsed(fixture_name);
    r.graph = phases::imports::run_imports_phase(&r.parsed);
    r
}

/// Relative paths discovered by the walk phase, sorted.
pub fn walked_paths(result: &PhaseResult) -> Vec<String> {
    let mut paths: Vec<String> = result.files.iter().map(|f| f.path.clone()).collect();
    paths.sort();
    paths
}

/// Element names in a parsed file, in source order.
pub fn element_names(result: &PhaseResult, path: &str) -> Vec<String> {
    result
        .parsed
        .get(path)
        .map(|f| f.elements.iter().map(|e| e.name.clone()).collect())
        .unwrap_or_default()
}
