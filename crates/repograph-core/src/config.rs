//! Core data types and configuration for Repograph analysis.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Kind of code element extracted from source code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Function,
    Class,
    Method,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Method => "method",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language of a source file.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    #[default]
    Unknown,
}

impl Language {
    /// Map a file extension (without the dot) to its language.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "py" => Self::Python,
            "js" | "jsx" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared construct (function, class, or method) in a source file.
///
/// Methods are flattened into the file's element sequence immediately after
/// their owning class, in source order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodeElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub name: String,
    /// 1-based, inclusive.
    pub start_line: usize,
    /// 1-based, inclusive; always >= start_line.
    pub end_line: usize,
    pub doc_comment: Option<String>,
    /// Parameter names in declaration order (functions/methods only).
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Literal return-type annotation text, if present.
    pub return_type: Option<String>,
    /// Literal base/parent type names (classes only).
    #[serde(default)]
    pub base_types: Vec<String>,
}

/// The structural model for one parsed file: ordered code elements plus the
/// raw import specifiers exactly as written in source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedFile {
    /// Slash-normalized path relative to the analyzed root; unique key.
    pub path: String,
    pub language: Language,
    pub size: u64,
    #[serde(default)]
    pub elements: Vec<CodeElement>,
    /// Unresolved specifiers in source order; duplicates preserved.
    #[serde(default)]
    pub imports: Vec<String>,
}

/// A candidate file discovered by the walker, before parsing.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub abs_path: PathBuf,
    pub language: Language,
    pub size: u64,
}

/// A node in the hierarchical repository view: either a file or a folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RepoNode {
    File(ParsedFile),
    Folder(FolderNode),
}

/// A folder with its ordered children (files and sub-folders interleaved).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FolderNode {
    pub path: String,
    #[serde(default)]
    pub children: Vec<RepoNode>,
}

/// Per-file dependency counts used by the rankings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DependencyInfo {
    pub path: String,
    pub imports_count: usize,
    pub imported_by_count: usize,
}

/// A group of files whose import edges form a closed loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CircularDependency {
    /// Member paths, sorted ascending.
    pub files: Vec<String>,
}

/// Derived, read-only summary of the dependency graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DependencyAnalysis {
    #[serde(default)]
    pub most_imported: Vec<DependencyInfo>,
    #[serde(default)]
    pub most_importing: Vec<DependencyInfo>,
    #[serde(default)]
    pub isolated_files: Vec<String>,
    #[serde(default)]
    pub circular_dependencies: Vec<CircularDependency>,
}

/// Subprocess parser override for one language.
///
/// The file path is appended to `args`; the process must print
/// `{"elements": [...], "imports": [...]}` on stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalParserSpec {
    pub language: Language,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Configuration for an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub repo_path: String,
    pub output_path: Option<String>,
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Ceiling on simultaneous external-parser subprocesses.
    #[serde(default = "default_max_external_parsers")]
    pub max_external_parsers: usize,
    #[serde(default)]
    pub external_parsers: Vec<ExternalParserSpec>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub quiet: bool,
}

fn default_max_file_size() -> u64 {
    500_000
}
fn default_max_external_parsers() -> usize {
    4
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            repo_path: String::new(),
            output_path: None,
            languages: None,
            exclude_patterns: Vec::new(),
            max_file_size: default_max_file_size(),
            max_external_parsers: default_max_external_parsers(),
            external_parsers: Vec::new(),
            verbose: false,
            quiet: false,
        }
    }
}

/// Result of an analysis run — matches the JSON output schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub stats: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub structure: StructureOutput,
    #[serde(default)]
    pub dependencies: DependenciesOutput,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for AnalysisReport {
    fn default() -> Self {
        Self {
            version: default_version(),
            metadata: HashMap::new(),
            stats: HashMap::new(),
            structure: StructureOutput::default(),
            dependencies: DependenciesOutput::default(),
        }
    }
}

/// Structure section of the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureOutput {
    pub hierarchy: RepoNode,
    #[serde(default)]
    pub files: Vec<FileSummary>,
}

impl Default for StructureOutput {
    fn default() -> Self {
        Self {
            hierarchy: RepoNode::Folder(FolderNode::default()),
            files: Vec::new(),
        }
    }
}

/// Flat per-file summary in the output JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    pub path: String,
    pub language: Language,
    pub size: u64,
    pub elements: usize,
    pub imports: usize,
}

/// Dependencies section of the output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependenciesOutput {
    #[serde(default)]
    pub edges: Vec<EdgeOutput>,
    #[serde(default)]
    pub analysis: DependencyAnalysis,
}

/// One resolved import edge in the output JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeOutput {
    pub from: String,
    pub to: String,
    /// The raw specifier that produced the edge.
    pub specifier: String,
}
