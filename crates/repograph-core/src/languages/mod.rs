//! Per-language structural parsers.

use crate::config::{CodeElement, Language};

pub mod python;
pub mod typescript;

/// Parse a source file into its code elements and raw import specifiers.
///
/// Dispatch is a closed match over the known language set; `Unknown` yields
/// an empty result rather than an error. A parse failure for a supported
/// language is downgraded to an empty result for that file only — the
/// backend logs the diagnostic.
pub fn parse_source(
    language: Language,
    source: &[u8],
    path: &str,
) -> (Vec<CodeElement>, Vec<String>) {
    match language {
        Language::Python => python::parse(source, path),
        Language::JavaScript | Language::TypeScript => typescript::parse(source, path, language),
        Language::Unknown => (Vec::new(), Vec::new()),
    }
}
