//! Phases 4-5: import resolution, graph, analytics, cycles.

mod common;

use common::*;
use repograph_core::phases::analysis::run_analysis_phase;

#[test]
fn resolved_edges_match_fixture_layout() {
    let r = run_graph("js_app");

    assert_eq!(
        r.graph.dependencies_of("index.js"),
        vec!["services/user_service.js", "services/auth_service.js"]
    );
    assert_eq!(
        r.graph.dependencies_of("services/user_service.js"),
        vec!["utils/helpers.js", "services/auth_service.js"]
    );
    assert_eq!(
        r.graph.dependencies_of("services/auth_service.js"),
        vec!["services/user_service.js"]
    );
    assert_eq!(r.graph.edge_count(), 5);
}

#[test]
fn external_packages_not_in_graph() {
    let r = run_graph("js_app");
    for (_, to, _) in r.graph.edges() {
        assert!(
            r.parsed.contains_key(&to),
            "edge target {to} must be a known file"
        );
    }
    assert!(!r.graph.has_node("express"));
    assert!(!r.graph.has_node("lodash"));
}

#[test]
fn service_cycle_detected() {
    let r = run_graph("js_app");
    let analysis = run_analysis_phase(&r.parsed, &r.graph);
    assert_eq!(analysis.circular_dependencies.len(), 1);
    assert_eq!(
        analysis.circular_dependencies[0].files,
        vec!["services/auth_service.js", "services/user_service.js"]
    );
}

#[test]
fn standalone_file_is_isolated() {
    let r = run_graph("js_app");
    let analysis = run_analysis_phase(&r.parsed, &r.graph);
    // standalone.js only imports an external package.
    assert_eq!(analysis.isolated_files, vec!["standalone.js"]);
}

#[test]
fn most_imported_ranking() {
    let r = run_graph("js_app");
    let analysis = run_analysis_phase(&r.parsed, &r.graph);

    // user_service and auth_service are each imported twice; the tie breaks
    // on ascending path.
    assert_eq!(
        analysis.most_imported[0].path,
        "services/auth_service.js"
    );
    assert_eq!(analysis.most_imported[0].imported_by_count, 2);
    assert_eq!(
        analysis.most_imported[1].path,
        "services/user_service.js"
    );
    assert_eq!(analysis.most_imported[1].imported_by_count, 2);
}

#[test]
fn most_importing_ranking() {
    let r = run_graph("js_app");
    let analysis = run_analysis_phase(&r.parsed, &r.graph);

    // index.js and user_service.js both have two outgoing edges.
    assert_eq!(analysis.most_importing[0].path, "index.js");
    assert_eq!(analysis.most_importing[0].imports_count, 2);
    assert_eq!(
        analysis.most_importing[1].path,
        "services/user_service.js"
    );
}

#[test]
fn python_dotted_relative_imports_stay_unresolved() {
    let r = run_graph("python_app");
    // `.models` is retained in imports but produces no edge.
    assert_eq!(r.parsed["app/services.py"].imports, vec![".models"]);
    assert_eq!(r.graph.edge_count(), 0);

    let analysis = run_analysis_phase(&r.parsed, &r.graph);
    assert_eq!(analysis.isolated_files.len(), 4);
}
