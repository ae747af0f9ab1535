//! Python structural parser.

use tree_sitter::{Node, Parser};

use crate::config::{CodeElement, ElementKind};

/// Parse Python source into code elements and import specifiers.
pub fn parse(source: &[u8], path: &str) -> (Vec<CodeElement>, Vec<String>) {
    let mut parser = Parser::new();
    if parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .is_err()
    {
        log::warn!("python grammar unavailable, skipping {path}");
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

fn collect_statement(
    node: &Node,
    source: &[u8],
    elements: &mut Vec<CodeElement>,
    imports: &mut Vec<String>,
) {
    match node.kind() {
        "function_definition" => {
            // Top-level only; nested functions are deliberately not extracted.
            if let Some(el) = function_element(node, source, ElementKind::Function) {
                elements.push(el);
            }
        }
        "class_definition" => collect_class(node, source, elements),
        "decorated_definition" => {
            if let Some(def) = node.child_by_field_name("definition") {
                collect_statement(&def, source, elements, imports);
            }
        }
        "import_statement" => collect_import(node, source, imports),
        "import_from_statement" => collect_import_from(node, source, imports),
        _ => {}
    }
}

fn text(node: &Node, source: &[u8]) -> Option<String> {
    node.utf8_text(source).ok().map(|s| s.to_string())
}

fn function_element(node: &Node, source: &[u8], kind: ElementKind) -> Option<CodeElement> {
    let name = text(&node.child_by_field_name("name")?, source)?;
    let parameters = node
        .child_by_field_name("parameters")
        .map(|p| parameter_names(&p, source))
        .unwrap_or_default();
    let return_type = node
        .child_by_field_name("return_type")
        .and_then(|r| text(&r, source));
    Some(CodeElement {
        kind,
        name,
        start_line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
        doc_comment: docstring(node, source),
        parameters,
        return_type,
        base_types: Vec::new(),
    })
}

fn parameter_names(params: &Node, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    for i in 0..params.child_count() {
        let Some(child) = params.child(i) else { continue };
        let name = match child.kind() {
            "identifier" => text(&child, source),
            "typed_parameter" => child
                .child(0)
                .filter(|c| c.kind() == "identifier")
                .and_then(|c| text(&c, source)),
            "default_parameter" | "typed_default_parameter" => child
                .child_by_field_name("name")
                .and_then(|c| text(&c, source)),
            _ => None,
        };
        if let Some(name) = name {
            names.push(name);
        }
    }
    names
}

/// First statement of the body, when it is a bare string expression.
fn docstring(def: &Node, source: &[u8]) -> Option<String> {
    let body = def.child_by_field_name("body")?;
    let first = body.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = first.named_child(0)?;
    if expr.kind() != "string" {
        return None;
    }
    text(&expr, source).map(|s| strip_string_quotes(&s))
}

fn strip_string_quotes(raw: &str) -> String {
    let s = raw.trim_start_matches(|c: char| "rRbBuUfF".contains(c));
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if s.starts_with(quote) && s.ends_with(quote) && s.len() >= quote.len() * 2 {
            return s[quote.len()..s.len() - quote.len()].trim().to_string();
        }
    }
    s.trim().to_string()
}

fn collect_class(node: &Node, source: &[u8], elements: &mut Vec<CodeElement>) {
    let Some(name) = node.child_by_field_name("name").and_then(|n| text(&n, source)) else {
        return;
    };
    let base_types = node
        .child_by_field_name("superclasses")
        .map(|s| base_type_names(&s, source))
        .unwrap_or_default();

    elements.push(CodeElement {
        kind: ElementKind::Class,
        name,
        start_line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
        doc_comment: docstring(node, source),
        parameters: Vec::new(),
        return_type: None,
        base_types,
    });

    // Direct methods only; the class body is not recursed into further.
    let Some(body) = node.child_by_field_name("body") else {
        return;
    };
    for i in 0..body.child_count() {
        let Some(mut member) = body.child(i) else { continue };
        if member.kind() == "decorated_definition" {
            match member.child_by_field_name("definition") {
                Some(def) => member = def,
                None => continue,
            }
        }
        if member.kind() == "function_definition" {
            if let Some(el) = function_element(&member, source, ElementKind::Method) {
                elements.push(el);
            }
        }
    }
}

fn base_type_names(args: &Node, source: &[u8]) -> Vec<String> {
    let mut bases = Vec::new();
    for i in 0..args.named_child_count() {
        let Some(child) = args.named_child(i) else { continue };
        // Keyword arguments (metaclass=...) are not base types.
        if matches!(child.kind(), "keyword_argument" | "comment") {
            continue;
        }
        if let Some(t) = text(&child, source) {
            bases.push(t);
        }
    }
    bases
}

/// `import a, b` yields one specifier per imported module.
fn collect_import(node: &Node, source: &[u8], imports: &mut Vec<String>) {
    for i in 0..node.named_child_count() {
        let Some(child) = node.named_child(i) else { continue };
        match child.kind() {
            "dotted_name" => {
                if let Some(t) = text(&child, source) {
                    imports.push(t);
                }
            }
            "aliased_import" => {
                if let Some(t) = child
                    .child_by_field_name("name")
                    .and_then(|n| text(&n, source))
                {
                    imports.push(t);
                }
            }
            _ => {}
        }
    }
}

/// `from X import y` yields the specifier `X`, keeping any leading relative
/// dots. A from-import with no module name (`from . import y`) yields the
/// relative marker plus the first imported name as a best-effort placeholder.
fn collect_import_from(node: &Node, source: &[u8], imports: &mut Vec<String>) {
    let Some(module_text) = node
        .child_by_field_name("module_name")
        .and_then(|m| text(&m, source))
    else {
        return;
    };

    if !module_text.is_empty() && !module_text.chars().all(|c| c == '.') {
        imports.push(module_text);
        return;
    }

    match first_imported_name(node, source) {
        Some(name) => imports.push(format!("{module_text}{name}")),
        None => imports.push(module_text),
    }
}

fn first_imported_name(node: &Node, source: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children_by_field_name("name", &mut cursor) {
        return match child.kind() {
            "aliased_import" => child
                .child_by_field_name("name")
                .and_then(|n| text(&n, source)),
            _ => text(&child, source),
        };
    }
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            if child.kind() == "wildcard_import" {
                return Some("*".to_string());
            }
        }
    }
    None
}
