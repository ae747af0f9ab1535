//! Phase 2: parse discovered files into the structural model.
//!
//! Each file's parse is independent and produces an immutable result;
//! failures are confined to their own file and never abort the batch.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::config::{AnalysisConfig, ExternalParserSpec, Language, ParsedFile, SourceFile};
use crate::external::run_external_parser;
use crate::languages;

/// Run the parsing phase: fan out one parse per file, fan results into a
/// map keyed by relative path.
pub fn run_parsing_phase(
    config: &AnalysisConfig,
    files: &[SourceFile],
) -> HashMap<String, ParsedFile> {
    let overrides: HashMap<Language, &ExternalParserSpec> = config
        .external_parsers
        .iter()
        .map(|s| (s.language, s))
        .collect();

    let (external, native): (Vec<&SourceFile>, Vec<&SourceFile>) = files
        .iter()
        .partition(|f| overrides.contains_key(&f.language));

    let mut parsed: HashMap<String, ParsedFile> = native
        .into_par_iter()
        .filter_map(|file| parse_native(file).map(|p| (p.path.clone(), p)))
        .collect();

    if !external.is_empty() {
        // A dedicated pool caps simultaneous subprocess invocations.
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_external_parsers.max(1))
            .build()
        {
            Ok(pool) => {
                let results: Vec<(String, ParsedFile)> = pool.install(|| {
                    external
                        .par_iter()
                        .map(|&file| parse_external(file, overrides[&file.language]))
                        .collect()
                });
                parsed.extend(results);
            }
            Err(e) => {
                log::warn!("external parser pool unavailable ({e}); parsing sequentially");
                parsed.extend(
                    external
                        .iter()
                        .map(|&file| parse_external(file, overrides[&file.language])),
                );
            }
        }
    }

    parsed
}

fn parse_native(file: &SourceFile) -> Option<ParsedFile> {
    let source = match std::fs::read(&file.abs_path) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("skipping unreadable file {}: {e}", file.path);
            return None;
        }
    };
    let (elements, imports) = languages::parse_source(file.language, &source, &file.path);
    Some(ParsedFile {
        path: file.path.clone(),
        language: file.language,
        size: file.size,
        elements,
        imports,
    })
}

fn parse_external(file: &SourceFile, spec: &ExternalParserSpec) -> (String, ParsedFile) {
    let (elements, imports) = match run_external_parser(spec, &file.abs_path) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("external parser failed on {}: {e}", file.path);
            (Vec::new(), Vec::new())
        }
    };
    (
        file.path.clone(),
        ParsedFile {
            path: file.path.clone(),
            language: file.language,
            size: file.size,
            elements,
            imports,
        },
    )
}
