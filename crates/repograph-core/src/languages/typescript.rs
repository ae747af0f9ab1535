//! JavaScript/TypeScript structural parser.
//!
//! One backend handles all four extensions; the grammar is chosen per file.

use std::sync::LazyLock;

use regex::Regex;
use tree_sitter::{Node, Parser};

use crate::config::{CodeElement, ElementKind, Language};

static JSDOC_LINE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\*\s?").unwrap());

/// Parse JavaScript/TypeScript source into code elements and import specifiers.
pub fn parse(source: &[u8], path: &str, language: Language) -> (Vec<CodeElement>, Vec<String>) {
    let mut parser = Parser::new();
    if parser.set_language(&grammar_for(path, language)).is_err() {
        log::warn!("grammar unavailable, skipping {path}");
        return (Vec::new(), Vec::new());
    }
    let tree = match parser.parse(source, None) {
        Some(t) => t,
        None => {
            log::warn!("failed to parse {path}");
            return (Vec::new(), Vec::new());
        }
    };

    let root = tree.root_node();
    let mut elements = Vec::new();
    let mut imports = Vec::new();
    for i in 0..root.child_count() {
        let Some(child) = root.child(i) else { continue };
        collect_statement(&child, source, &mut elements, &mut imports);
    }
    (elements, imports)
}

fn grammar_for(path: &str, language: Language) -> tree_sitter::Language {
    if path.ends_with(".tsx") {
        tree_sitter_typescript::LANGUAGE_TSX.into()
    } else if language == Language::TypeScript {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
    } else {
        tree_sitter_javascript::LANGUAGE.into()
    }
}

fn collect_statement(
    node: &Node,
    source: &[u8],
    elements: &mut Vec<CodeElement>,
    imports: &mut Vec<String>,
) {
    match node.kind() {
        "import_statement" => {
            if let Some(spec) = string_source(node, source) {
                imports.push(spec);
            }
        }
        "export_statement" => {
            // Re-exports (`export { X } from './mod'`) count as imports;
            // otherwise unwrap the exported declaration.
            if let Some(spec) = string_source(node, source) {
                imports.push(spec);
            } else if let Some(decl) = node.child_by_field_name("declaration") {
                collect_declaration(&decl, source, elements, node);
            }
        }
        _ => collect_declaration(node, source, elements, node),
    }
}

fn collect_declaration(
    node: &Node,
    source: &[u8],
    elements: &mut Vec<CodeElement>,
    doc_anchor: &Node,
) {
    match node.kind() {
        "function_declaration" | "generator_function_declaration" => {
            if let Some(el) = function_element(node, source, ElementKind::Function, doc_anchor) {
                elements.push(el);
            }
        }
        "class_declaration" => collect_class(node, source, elements, doc_anchor),
        "lexical_declaration" | "variable_declaration" => {
            collect_function_consts(node, source, elements, doc_anchor)
        }
        _ => {}
    }
}

fn text(node: &Node, source: &[u8]) -> Option<String> {
    node.utf8_text(source).ok().map(|s| s.to_string())
}

fn function_element(
    node: &Node,
    source: &[u8],
    kind: ElementKind,
    doc_anchor: &Node,
) -> Option<CodeElement> {
    let name = text(&node.child_by_field_name("name")?, source)?;
    Some(CodeElement {
        kind,
        name,
        start_line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
        doc_comment: jsdoc(doc_anchor, source),
        parameters: node
            .child_by_field_name("parameters")
            .map(|p| parameter_names(&p, source))
            .unwrap_or_default(),
        return_type: return_type_text(node, source),
        base_types: Vec::new(),
    })
}

fn return_type_text(node: &Node, source: &[u8]) -> Option<String> {
    node.child_by_field_name("return_type")
        .and_then(|r| text(&r, source))
        .map(|t| t.trim_start_matches(':').trim().to_string())
}

fn parameter_names(params: &Node, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    for i in 0..params.named_child_count() {
        let Some(child) = params.named_child(i) else { continue };
        if child.kind() == "comment" {
            continue;
        }
        if let Some(name) = parameter_name(&child, source) {
            names.push(name);
        }
    }
    names
}

fn parameter_name(node: &Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "identifier" | "this" => text(node, source),
        // TS parameters wrap the binding in a pattern field.
        "required_parameter" | "optional_parameter" => node
            .child_by_field_name("pattern")
            .and_then(|p| parameter_name(&p, source)),
        "assignment_pattern" => node
            .child_by_field_name("left")
            .and_then(|l| parameter_name(&l, source)),
        // Destructuring and rest patterns keep their literal text.
        _ => text(node, source),
    }
}

fn collect_class(node: &Node, source: &[u8], elements: &mut Vec<CodeElement>, doc_anchor: &Node) {
    let Some(name) = node.child_by_field_name("name").and_then(|n| text(&n, source)) else {
        return;
    };
    elements.push(CodeElement {
        kind: ElementKind::Class,
        name,
        start_line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
        doc_comment: jsdoc(doc_anchor, source),
        parameters: Vec::new(),
        return_type: None,
        base_types: base_type_names(node, source),
    });

    let Some(body) = node.child_by_field_name("body") else {
        return;
    };
    for i in 0..body.child_count() {
        let Some(member) = body.child(i) else { continue };
        if member.kind() == "method_definition" {
            if let Some(el) = function_element(&member, source, ElementKind::Method, &member) {
                elements.push(el);
            }
        }
    }
}

fn base_type_names(class_node: &Node, source: &[u8]) -> Vec<String> {
    let mut bases = Vec::new();
    for i in 0..class_node.child_count() {
        let Some(heritage) = class_node.child(i) else { continue };
        if heritage.kind() != "class_heritage" {
            continue;
        }
        // TS wraps bases in extends/implements clauses; JS puts the
        // expression directly under class_heritage.
        let has_clauses = (0..heritage.named_child_count())
            .filter_map(|j| heritage.named_child(j))
            .any(|c| c.kind().ends_with("_clause"));
        for j in 0..heritage.named_child_count() {
            let Some(child) = heritage.named_child(j) else { continue };
            if has_clauses {
                if child.kind() != "extends_clause" {
                    continue;
                }
                for k in 0..child.named_child_count() {
                    let Some(base) = child.named_child(k) else { continue };
                    if base.kind() == "type_arguments" {
                        continue;
                    }
                    if let Some(t) = text(&base, source) {
                        bases.push(t);
                    }
                }
            } else if let Some(t) = text(&child, source) {
                bases.push(t);
            }
        }
    }
    bases
}

/// `const foo = (...) => ...` and function-expression consts.
fn collect_function_consts(
    node: &Node,
    source: &[u8],
    elements: &mut Vec<CodeElement>,
    doc_anchor: &Node,
) {
    for i in 0..node.named_child_count() {
        let Some(declarator) = node.named_child(i) else { continue };
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        let Some(value) = declarator.child_by_field_name("value") else {
            continue;
        };
        if !matches!(
            value.kind(),
            "arrow_function" | "function_expression" | "function"
        ) {
            continue;
        }
        let Some(name) = declarator
            .child_by_field_name("name")
            .and_then(|n| text(&n, source))
        else {
            continue;
        };

        let parameters = value
            .child_by_field_name("parameters")
            .map(|p| parameter_names(&p, source))
            .or_else(|| {
                // `x => ...`: a single bare parameter.
                value
                    .child_by_field_name("parameter")
                    .and_then(|p| text(&p, source))
                    .map(|p| vec![p])
            })
            .unwrap_or_default();

        elements.push(CodeElement {
            kind: ElementKind::Function,
            name,
            start_line: declarator.start_position().row + 1,
            end_line: declarator.end_position().row + 1,
            doc_comment: jsdoc(doc_anchor, source),
            parameters,
            return_type: return_type_text(&value, source),
            base_types: Vec::new(),
        });
    }
}

/// JSDoc block immediately preceding the declaration (or its export wrapper).
fn jsdoc(node: &Node, source: &[u8]) -> Option<String> {
    let prev = node.prev_sibling()?;
    if prev.kind() != "comment" {
        return None;
    }
    let raw = prev.utf8_text(source).ok()?;
    if !raw.starts_with("/**") {
        return None;
    }
    let inner = raw.trim_start_matches("/**").trim_end_matches("*/");
    let cleaned = JSDOC_LINE_PREFIX.replace_all(inner, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// The string literal inside an import/export statement's source field.
fn string_source(node: &Node, source: &[u8]) -> Option<String> {
    let string_node = node.child_by_field_name("source")?;
    for i in 0..string_node.named_child_count() {
        if let Some(fragment) = string_node.named_child(i) {
            if fragment.kind() == "string_fragment" {
                return text(&fragment, source);
            }
        }
    }
    None
}
