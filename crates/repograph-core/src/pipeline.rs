//! Sequential phase orchestrator with timing.

use std::collections::HashMap;
use std::time::Instant;

use crate::config::{
    AnalysisConfig, AnalysisReport, DependencyAnalysis, FolderNode, ParsedFile, SourceFile,
};
use crate::graph::dependency_graph::DependencyGraph;
use crate::output::build_report;
use crate::phases;

/// Phase labels for progress reporting.
const PHASE_LABELS: &[(&str, &str)] = &[
    ("walk", "Scanning file tree"),
    ("parse", "Parsing source files"),
    ("tree", "Assembling file hierarchy"),
    ("imports", "Resolving imports"),
    ("analysis", "Analyzing dependencies"),
];

/// Progress callback type: (phase_name, label).
pub type ProgressCallback = Box<dyn FnMut(&str, &str)>;

/// Mutable state threaded through the pipeline phases.
#[derive(Default)]
pub struct AnalysisState {
    pub files: Vec<SourceFile>,
    pub parsed: HashMap<String, ParsedFile>,
    pub hierarchy: FolderNode,
    pub graph: DependencyGraph,
    pub analysis: DependencyAnalysis,
}

/// Type alias for phase function closures to keep signatures readable.
type PhaseFn =
    Box<dyn FnOnce(&AnalysisConfig, &mut AnalysisState) -> Result<(), Box<dyn std::error::Error>>>;

/// Execute the five-phase analysis pipeline and return the report.
pub fn run_pipeline(
    config: &AnalysisConfig,
    mut progress_callback: Option<ProgressCallback>,
) -> Result<AnalysisReport, Box<dyn std::error::Error>> {
    let mut state = AnalysisState::default();
    let mut timings: HashMap<String, f64> = HashMap::new();
    let total_start = Instant::now();

    let phase_fns: Vec<(&str, PhaseFn)> = vec![
        (
            "walk",
            Box::new(|config, state| {
                state.files = phases::walk::run_walk_phase(config);
                Ok(())
            }),
        ),
        (
            "parse",
            Box::new(|config, state| {
                state.parsed = phases::parsing::run_parsing_phase(config, &state.files);
                Ok(())
            }),
        ),
        (
            "tree",
            Box::new(|_config, state| {
                state.hierarchy = phases::tree::build_file_tree(&state.parsed);
                Ok(())
            }),
        ),
        (
            "imports",
            Box::new(|_config, state| {
                state.graph = phases::imports::run_imports_phase(&state.parsed);
                Ok(())
            }),
        ),
        (
            "analysis",
            Box::new(|_config, state| {
                state.analysis = phases::analysis::run_analysis_phase(&state.parsed, &state.graph);
                Ok(())
            }),
        ),
    ];

    for (name, phase_fn) in phase_fns {
        if let Some(ref mut cb) = progress_callback {
            let label = PHASE_LABELS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, l)| *l)
                .unwrap_or(name);
            cb(name, label);
        }

        let start = Instant::now();
        phase_fn(config, &mut state)?;
        timings.insert(name.to_string(), start.elapsed().as_secs_f64());
    }

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;

    Ok(build_report(config, &state, &timings, total_ms))
}
