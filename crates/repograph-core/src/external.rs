//! External parser backend: per-file subprocess invocation.
//!
//! Languages configured with an [`ExternalParserSpec`] are parsed by a child
//! process instead of the native tree-sitter backends. The process receives
//! the file path as its last argument and must print a JSON document
//! `{"elements": [...], "imports": [...]}` on stdout. Every failure mode is
//! soft: the caller downgrades it to an empty result for that file.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use thiserror::Error;

use crate::config::{CodeElement, ExternalParserSpec};

/// Document an external parser must print on stdout.
#[derive(Debug, Default, Deserialize)]
struct ExternalParseOutput {
    #[serde(default)]
    elements: Vec<CodeElement>,
    #[serde(default)]
    imports: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ExternalParseError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("malformed parser output: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Invoke the configured external parser on one file.
pub fn run_external_parser(
    spec: &ExternalParserSpec,
    file_path: &Path,
) -> Result<(Vec<CodeElement>, Vec<String>), ExternalParseError> {
    let output = Command::new(&spec.command)
        .args(&spec.args)
        .arg(file_path)
        .output()
        .map_err(|e| ExternalParseError::Spawn {
            command: spec.command.clone(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(ExternalParseError::Failed {
            command: spec.command.clone(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let parsed: ExternalParseOutput = serde_json::from_slice(&output.stdout)?;
    Ok((parsed.elements, parsed.imports))
}
