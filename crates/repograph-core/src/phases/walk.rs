//! Phase 1: walk the repository and collect candidate source files.

use std::path::Path;

use walkdir::WalkDir;

use crate::config::{AnalysisConfig, Language, SourceFile};

/// Directories never descended into.
const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    "node_modules",
    ".vscode",
    ".idea",
    "venv",
    ".env",
    "dist",
    "build",
];

/// Extensions eligible for analysis.
const SUPPORTED_EXTENSIONS: &[&str] = &["py", "js", "jsx", "ts", "tsx"];

/// Run the walk phase: traverse the tree and emit filtered source files
/// with slash-normalized relative paths, in deterministic order.
pub fn run_walk_phase(config: &AnalysisConfig) -> Vec<SourceFile> {
    let repo_path = Path::new(&config.repo_path);
    let ignore: Vec<&str> = DEFAULT_IGNORE_DIRS
        .iter()
        .copied()
        .chain(config.exclude_patterns.iter().map(|s| s.as_str()))
        .collect();

    let mut files = Vec::new();
    for entry in WalkDir::new(repo_path)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !(e.file_type().is_dir() && ignore.iter().any(|p| name == *p))
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("walk error: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let ext = entry
            .path()
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }

        let language = Language::from_extension(&ext);
        if let Some(ref filter) = config.languages {
            if !filter.iter().any(|f| f.eq_ignore_ascii_case(language.as_str())) {
                continue;
            }
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            continue;
        }
        if size > config.max_file_size {
            log::debug!(
                "skipping large file {} ({size} bytes)",
                entry.path().display()
            );
            continue;
        }

        let rel_path = entry
            .path()
            .strip_prefix(repo_path)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");

        files.push(SourceFile {
            path: rel_path,
            abs_path: entry.path().to_path_buf(),
            language,
            size,
        });
    }
    files
}
