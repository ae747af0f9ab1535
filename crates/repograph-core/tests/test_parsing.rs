//! Phase 2: parsing integration tests.

mod common;

use common::*;
use repograph_core::config::ElementKind;

#[test]
fn python_files_parsed_into_elements() {
    let r = run_parsed("python_app");
    assert_eq!(r.parsed.len(), 4);

    assert_eq!(element_names(&r, "main.py"), vec!["main"]);
    assert_eq!(
        element_names(&r, "app/models.py"),
        vec!["User", "__init__", "display_name", "anonymous"]
    );
}

#[test]
fn python_class_methods_flattened_after_class() {
    let r = run_parsed("python_app");
    let models = &r.parsed["app/models.py"];
    let kinds: Vec<ElementKind> = models.elements.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Class,
            ElementKind::Method,
            ElementKind::Method,
            ElementKind::Function,
        ]
    );
}

#[test]
fn python_docstrings_extracted() {
    let r = run_parsed("python_app");
    let models = &r.parsed["app/models.py"];
    assert_eq!(
        models.elements[0].doc_comment.as_deref(),
        Some("A registered user.")
    );
    assert_eq!(
        models.elements[2].doc_comment.as_deref(),
        Some("Human-readable name.")
    );
}

#[test]
fn python_imports_collected_as_written() {
    let r = run_parsed("python_app");
    assert_eq!(
        r.parsed["main.py"].imports,
        vec!["os", "sys", "app.models", "app.services"]
    );
    assert_eq!(r.parsed["app/services.py"].imports, vec![".models"]);
}

#[test]
fn javascript_files_parsed_into_elements() {
    let r = run_parsed("js_app");
    assert_eq!(r.parsed.len(), 5);

    assert_eq!(element_names(&r, "index.js"), vec!["startServer"]);
    assert_eq!(
        element_names(&r, "services/user_service.js"),
        vec!["UserService", "constructor", "findById", "rename"]
    );
    assert_eq!(
        element_names(&r, "utils/helpers.js"),
        vec!["formatName", "clamp"]
    );
}

#[test]
fn javascript_imports_in_source_order() {
    let r = run_parsed("js_app");
    assert_eq!(
        r.parsed["index.js"].imports,
        vec![
            "express",
            "./services/user_service",
            "./services/auth_service",
        ]
    );
    assert_eq!(
        r.parsed["services/user_service.js"].imports,
        vec!["../utils/helpers", "./auth_service"]
    );
}

#[test]
fn jsdoc_extracted_for_exported_class() {
    let r = run_parsed("js_app");
    let service = &r.parsed["services/user_service.js"];
    assert_eq!(
        service.elements[0].doc_comment.as_deref(),
        Some("Lookup and mutation of user records.")
    );
}

#[test]
fn mangled_file_yields_empty_result_without_breaking_batch() {
    let r = run_parsed("broken_app");
    assert_eq!(r.parsed.len(), 3);

    let mangled = &r.parsed["mangled.py"];
    assert!(mangled.elements.is_empty());
    assert!(mangled.imports.is_empty());

    // The other files are unaffected.
    assert_eq!(element_names(&r, "valid.py"), vec!["works"]);
    assert_eq!(element_names(&r, "valid2.js"), vec!["alsoWorks"]);
}

#[test]
fn file_sizes_recorded_from_disk() {
    let r = run_parsed("python_app");
    for file in r.parsed.values() {
        assert!(file.size > 0, "{} should have nonzero size", file.path);
    }
}
