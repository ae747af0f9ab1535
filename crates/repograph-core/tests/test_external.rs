//! External parser backend integration tests.

mod common;

use common::*;
use repograph_core::config::{AnalysisConfig, ElementKind, ExternalParserSpec, Language};
use repograph_core::external::run_external_parser;
use repograph_core::phases;

fn spec(command: &str, args: &[&str]) -> ExternalParserSpec {
    ExternalParserSpec {
        language: Language::JavaScript,
        command: command.to_string(),
        args: args.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn well_formed_output_is_honored() {
    let json = r#"{"elements":[{"type":"function","name":"fromSubprocess","start_line":1,"end_line":2,"doc_comment":null,"parameters":["x"],"return_type":null,"base_types":[]}],"imports":["./other"]}"#;
    let spec = spec("sh", &["-c", &format!("printf '%s' '{json}'")]);

    let path = fixture_path("js_app").join("index.js");
    let (elements, imports) = run_external_parser(&spec, &path).unwrap();

    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].kind, ElementKind::Function);
    assert_eq!(elements[0].name, "fromSubprocess");
    assert_eq!(elements[0].parameters, vec!["x"]);
    assert_eq!(imports, vec!["./other"]);
}

#[test]
fn missing_sections_default_to_empty() {
    let spec = spec("sh", &["-c", "printf '%s' '{}'"]);
    let path = fixture_path("js_app").join("index.js");
    let (elements, imports) = run_external_parser(&spec, &path).unwrap();
    assert!(elements.is_empty());
    assert!(imports.is_empty());
}

#[test]
fn nonzero_exit_is_an_error() {
    let spec = spec("sh", &["-c", "echo boom >&2; exit 3"]);
    let path = fixture_path("js_app").join("index.js");
    let err = run_external_parser(&spec, &path).unwrap_err();
    assert!(err.to_string().contains("boom"));
}

#[test]
fn malformed_output_is_an_error() {
    let spec = spec("sh", &["-c", "printf '%s' 'not json'"]);
    let path = fixture_path("js_app").join("index.js");
    assert!(run_external_parser(&spec, &path).is_err());
}

#[test]
fn missing_command_is_an_error() {
    let spec = spec("/nonexistent/parser-binary", &[]);
    let path = fixture_path("js_app").join("index.js");
    assert!(run_external_parser(&spec, &path).is_err());
}

#[test]
fn override_routes_language_through_subprocess() {
    let r = run_walk("js_app");
    let config = AnalysisConfig {
        external_parsers: vec![spec(
            "sh",
            &["-c", r#"printf '%s' '{"elements":[],"imports":["./stub"]}'"#],
        )],
        ..r.config
    };
    let parsed = phases::parsing::run_parsing_phase(&config, &r.files);

    // Every JavaScript file went through the stub parser.
    assert_eq!(parsed.len(), 5);
    for file in parsed.values() {
        assert_eq!(file.imports, vec!["./stub"]);
        assert!(file.elements.is_empty());
    }
}

#[test]
fn failing_override_degrades_to_empty_results() {
    let r = run_walk("js_app");
    let config = AnalysisConfig {
        external_parsers: vec![spec("false", &[])],
        ..r.config
    };
    let parsed = phases::parsing::run_parsing_phase(&config, &r.files);

    // Soft failure: the batch completes and every file is present, empty.
    assert_eq!(parsed.len(), 5);
    for file in parsed.values() {
        assert!(file.elements.is_empty());
        assert!(file.imports.is_empty());
    }
}
