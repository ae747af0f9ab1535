//! Phase 4: import resolution and dependency-graph construction.

use std::collections::HashMap;

use crate::config::ParsedFile;
use crate::graph::dependency_graph::DependencyGraph;

/// Probe suffixes, plain source extensions first, then index conventions.
/// The order is fixed and total: resolution is deterministic for a given
/// specifier, origin, and file set.
const RESOLUTION_SUFFIXES: &[&str] = &[
    ".py",
    ".js",
    ".ts",
    ".jsx",
    ".tsx",
    "/__init__.py",
    "/index.js",
    "/index.ts",
];

/// Run the imports phase: resolve every file's specifiers and build the
/// directed dependency graph. Files are processed in ascending path order
/// and specifiers in source order; duplicate edges and self-edges are kept.
pub fn run_imports_phase(files: &HashMap<String, ParsedFile>) -> DependencyGraph {
    let mut graph = DependencyGraph::new();

    let mut paths: Vec<&String> = files.keys().collect();
    paths.sort();

    for path in paths {
        let file = &files[path.as_str()];
        for specifier in &file.imports {
            if let Some(target) = resolve_import(specifier, path, files) {
                graph.add_import(path, &target, specifier);
            }
        }
    }

    graph
}

/// Resolve a raw import specifier against the known file set.
///
/// Only lexically relative specifiers (leading `.`) are attempted; bare
/// package names and absolute module paths are external dependencies and
/// resolve to `None`.
pub fn resolve_import(
    specifier: &str,
    origin: &str,
    known_files: &HashMap<String, ParsedFile>,
) -> Option<String> {
    if !specifier.starts_with('.') {
        return None;
    }

    let origin_dir = match origin.rfind('/') {
        Some(pos) => &origin[..pos],
        None => "",
    };
    let joined = if origin_dir.is_empty() {
        specifier.to_string()
    } else {
        format!("{origin_dir}/{specifier}")
    };
    let resolved = normalize_path(&joined);

    if known_files.contains_key(&resolved) {
        return Some(resolved);
    }
    for suffix in RESOLUTION_SUFFIXES {
        let candidate = format!("{resolved}{suffix}");
        if known_files.contains_key(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Collapse `.` and empty segments and resolve `..` pairs; backslashes are
/// normalized to `/`. A leading `..` that has nothing to collapse against is
/// kept, so specifiers escaping the tree stay unresolvable instead of
/// aliasing a root-level file.
fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(parts.last(), Some(&"..") | None) {
                    parts.push("..");
                } else {
                    parts.pop();
                }
            }
            _ => parts.push(segment),
        }
    }
    parts.join("/")
}
