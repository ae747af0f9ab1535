//! JSON report assembly and serialization.

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use chrono::Utc;

use crate::config::{
    AnalysisConfig, AnalysisReport, DependenciesOutput, EdgeOutput, FileSummary, FolderNode,
    RepoNode, StructureOutput,
};
use crate::pipeline::AnalysisState;

/// Try to get the current git commit hash (first 12 chars).
fn get_commit_hash(repo_path: &str) -> Option<String> {
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(repo_path)
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Some(hash[..hash.len().min(12)].to_string())
            } else {
                None
            }
        })
}

/// Count files per language.
fn count_languages(state: &AnalysisState) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for file in state.parsed.values() {
        *counts.entry(file.language.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

fn count_folders(node: &FolderNode) -> usize {
    node.children
        .iter()
        .map(|child| match child {
            RepoNode::Folder(folder) => 1 + count_folders(folder),
            RepoNode::File(_) => 0,
        })
        .sum()
}

/// Build the AnalysisReport from the pipeline state.
pub fn build_report(
    config: &AnalysisConfig,
    state: &AnalysisState,
    timings: &HashMap<String, f64>,
    total_ms: f64,
) -> AnalysisReport {
    let repo_path = Path::new(&config.repo_path)
        .canonicalize()
        .unwrap_or_else(|_| Path::new(&config.repo_path).to_path_buf());
    let repo_name = repo_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let edges = state.graph.edges();
    let languages = count_languages(state);

    // Build metadata
    let mut metadata = HashMap::new();
    metadata.insert(
        "repo_name".to_string(),
        serde_json::Value::String(repo_name),
    );
    metadata.insert(
        "repo_path".to_string(),
        serde_json::Value::String(repo_path.to_string_lossy().to_string()),
    );
    metadata.insert(
        "analysed_at".to_string(),
        serde_json::Value::String(Utc::now().to_rfc3339()),
    );
    metadata.insert(
        "repograph_version".to_string(),
        serde_json::Value::String(env!("CARGO_PKG_VERSION").to_string()),
    );
    if let Some(hash) = get_commit_hash(&config.repo_path) {
        metadata.insert("commit_hash".to_string(), serde_json::Value::String(hash));
    } else {
        metadata.insert("commit_hash".to_string(), serde_json::Value::Null);
    }
    metadata.insert(
        "analysis_duration_ms".to_string(),
        serde_json::json!(((total_ms * 10.0).round() / 10.0)),
    );
    metadata.insert(
        "phase_timings".to_string(),
        serde_json::to_value(timings).unwrap_or_default(),
    );

    // Build stats
    let total_elements: usize = state.parsed.values().map(|f| f.elements.len()).sum();
    let total_specifiers: usize = state.parsed.values().map(|f| f.imports.len()).sum();

    let mut stats = HashMap::new();
    stats.insert("files".to_string(), serde_json::json!(state.parsed.len()));
    stats.insert(
        "folders".to_string(),
        serde_json::json!(count_folders(&state.hierarchy)),
    );
    stats.insert("elements".to_string(), serde_json::json!(total_elements));
    stats.insert(
        "import_specifiers".to_string(),
        serde_json::json!(total_specifiers),
    );
    stats.insert("resolved_edges".to_string(), serde_json::json!(edges.len()));
    stats.insert(
        "isolated_files".to_string(),
        serde_json::json!(state.analysis.isolated_files.len()),
    );
    stats.insert(
        "cycles".to_string(),
        serde_json::json!(state.analysis.circular_dependencies.len()),
    );
    stats.insert(
        "languages".to_string(),
        serde_json::to_value(&languages).unwrap_or_default(),
    );

    // Build structure
    let mut files: Vec<FileSummary> = state
        .parsed
        .values()
        .map(|f| FileSummary {
            path: f.path.clone(),
            language: f.language,
            size: f.size,
            elements: f.elements.len(),
            imports: f.imports.len(),
        })
        .collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    // Build dependencies
    let edge_output: Vec<EdgeOutput> = edges
        .into_iter()
        .map(|(from, to, specifier)| EdgeOutput {
            from,
            to,
            specifier,
        })
        .collect();

    AnalysisReport {
        version: "1.0".to_string(),
        metadata,
        stats,
        structure: StructureOutput {
            hierarchy: RepoNode::Folder(state.hierarchy.clone()),
            files,
        },
        dependencies: DependenciesOutput {
            edges: edge_output,
            analysis: state.analysis.clone(),
        },
    }
}

/// Write the analysis report to a JSON file.
pub fn write_report(report: &AnalysisReport, output_path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(output_path, json)
}
