use super::{javadoc, AstProvider, ParseFailure};
use std::cell::RefCell;
use anyhow::{anyhow, Result};
use tree_sitter::{Node, Parser, Query, QueryCursor, Tree};
use tracing::debug;
use crate::ast::{
    BodyNode, CompilationUnit, FieldDecl, ImportDecl, MethodDecl, NodeKind, Parameter,
    SourceSpan, TypeBody, TypeDeclaration, VariableDecl,
};

// One parser per worker thread; the rayon pool reuses them across files.
thread_local! {
    static JAVA_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

fn with_parser<F, R>(language: &tree_sitter::Language, f: F) -> Result<R>
where
    F: FnOnce(&mut Parser) -> Result<R>,
{
    JAVA_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            let mut parser = Parser::new();
            parser.set_language(language)
                .map_err(|e| anyhow!("Java grammar rejected by tree-sitter: {e}"))?;
            *slot = Some(parser);
        }

        let parser = slot
            .as_mut()
            .ok_or_else(|| anyhow!("Java parser slot empty after initialization"))?;
        f(parser)
    })
}

/// Diagnostics reported per file before the rest are dropped
const MAX_DIAGNOSTICS: usize = 10;

pub struct JavaTreeSitterParser {
    language: tree_sitter::Language,
    /// `package a.b.c;` name
    package_query: Query,
    /// every `import` declaration, static or not
    import_query: Query,
}

impl JavaTreeSitterParser {
    pub fn new() -> Result<Self> {
        let language = tree_sitter_java::language();

        let package_query = Self::compile_package_query(&language)?;
        let import_query = Self::compile_import_query(&language)?;

        Ok(Self {
            language,
            package_query,
            import_query,
        })
    }

    /// `package app;` parses to a bare identifier, dotted names to a scoped one
    fn compile_package_query(language: &tree_sitter::Language) -> Result<Query> {
        let query_str = r#"
            (package_declaration
                [
                    (scoped_identifier) @package_name
                    (identifier) @package_name
                ]
            )
        "#;
        Query::new(language, query_str).map_err(|e| anyhow!("Failed to compile package query: {e}"))
    }

    /// 编译 Import 提取查询 (名称和通配符在匹配后从子节点读取)
    fn compile_import_query(language: &tree_sitter::Language) -> Result<Query> {
        let query_str = r#"
            (import_declaration) @import
        "#;
        Query::new(language, query_str).map_err(|e| anyhow!("Failed to compile import query: {e}"))
    }

    /// Parse into a raw tree-sitter tree (using the thread-local parser)
    fn parse_tree(&self, code: &str) -> Result<Tree> {
        with_parser(&self.language, |parser| {
            parser.parse(code, None).ok_or_else(|| anyhow!("Failed to parse code"))
        })
    }

    /// Extract package declaration from already-parsed tree
    fn extract_package_from_tree(&self, tree: &Tree, code: &str) -> Option<String> {
        let mut cursor = QueryCursor::new();
        let matches = cursor.matches(&self.package_query, tree.root_node(), code.as_bytes());

        for m in matches {
            for capture in m.captures {
                if let Ok(text) = capture.node.utf8_text(code.as_bytes()) {
                    return Some(text.to_string());
                }
            }
        }

        None
    }

    /// Extract imports (name + wildcard flag) from already-parsed tree
    fn extract_imports_from_tree(&self, tree: &Tree, code: &str) -> Vec<ImportDecl> {
        let mut imports = Vec::new();
        let mut cursor = QueryCursor::new();
        let matches = cursor.matches(&self.import_query, tree.root_node(), code.as_bytes());

        for m in matches {
            for capture in m.captures {
                let node = capture.node;
                let mut name = None;
                let mut is_wildcard = false;

                let mut child_cursor = node.walk();
                for child in node.named_children(&mut child_cursor) {
                    match child.kind() {
                        "scoped_identifier" | "identifier" => name = Some(text(child, code)),
                        "asterisk" => is_wildcard = true,
                        _ => {}
                    }
                }

                if let Some(name) = name {
                    imports.push(ImportDecl::new(name, is_wildcard));
                }
            }
        }

        imports
    }

    fn lower_unit(&self, tree: &Tree, code: &str) -> CompilationUnit {
        let root = tree.root_node();
        let mut types = Vec::new();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "class_declaration" => types.push(TypeDeclaration::Class(lower_type_body(child, code))),
                "interface_declaration" => types.push(TypeDeclaration::Interface(lower_type_body(child, code))),
                "enum_declaration" | "record_declaration" | "annotation_type_declaration" => {
                    debug!(
                        "Skipping {} at line {}",
                        child.kind(),
                        child.start_position().row + 1
                    );
                }
                _ => {}
            }
        }

        CompilationUnit {
            package: self.extract_package_from_tree(tree, code),
            imports: self.extract_imports_from_tree(tree, code),
            types,
        }
    }
}

impl AstProvider for JavaTreeSitterParser {
    fn supported_extension(&self) -> &str {
        "java"
    }

    fn parse(&self, code: &str) -> Result<CompilationUnit, ParseFailure> {
        let tree = self
            .parse_tree(code)
            .map_err(|e| ParseFailure::new(vec![e.to_string()]))?;

        let root = tree.root_node();
        if root.has_error() {
            let mut diagnostics = Vec::new();
            collect_diagnostics(root, code, &mut diagnostics);
            if diagnostics.is_empty() {
                diagnostics.push("syntax error".to_string());
            }
            return Err(ParseFailure::new(diagnostics));
        }

        Ok(self.lower_unit(&tree, code))
    }
}

// ============================================================================
// 语法错误收集
// ============================================================================

fn collect_diagnostics(node: Node, code: &str, out: &mut Vec<String>) {
    if out.len() >= MAX_DIAGNOSTICS {
        return;
    }

    let pos = node.start_position();
    if node.is_missing() {
        out.push(format!(
            "missing \"{}\" at line {}, column {}",
            node.kind(),
            pos.row + 1,
            pos.column + 1
        ));
        return;
    }
    if node.is_error() {
        let snippet: String = text(node, code)
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .chars()
            .take(40)
            .collect();
        out.push(format!(
            "syntax error near \"{}\" at line {}, column {}",
            snippet,
            pos.row + 1,
            pos.column + 1
        ));
        return;
    }
    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_diagnostics(child, code, out);
    }
}

// ============================================================================
// 声明层降级 (tree-sitter → ast)
// ============================================================================

fn text<'a>(node: Node, code: &'a str) -> &'a str {
    node.utf8_text(code.as_bytes()).unwrap_or("")
}

fn span_of(node: Node) -> Option<SourceSpan> {
    Some(SourceSpan::new(
        node.start_position().row + 1,
        node.end_position().row + 1,
    ))
}

fn is_comment(node: Node) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment" | "comment")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Type as written, whitespace normalized: `Map<String, Integer>`
fn type_text(node: Node, code: &str) -> String {
    collapse_whitespace(text(node, code))
}

/// Type name with outer scope but without type arguments:
/// `java.util.AbstractList<E>` → `java.util.AbstractList`
fn type_name_with_scope(node: Node, code: &str) -> String {
    let mut depth = 0usize;
    let mut name = String::new();
    for ch in text(node, code).chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if depth == 0 && !c.is_whitespace() => name.push(c),
            _ => {}
        }
    }
    name
}

/// Receiver expression with line breaks and indentation removed
fn receiver_text(node: Node, code: &str) -> String {
    text(node, code)
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("")
}

/// Keyword modifiers in source order; annotations are not modifiers
fn modifiers_of(node: Node, code: &str) -> Vec<String> {
    let mut cursor = node.walk();
    let modifiers = node.children(&mut cursor).find(|c| c.kind() == "modifiers");
    let Some(modifiers) = modifiers else {
        return Vec::new();
    };

    let mut cursor = modifiers.walk();
    modifiers
        .children(&mut cursor)
        .filter(|c| !c.is_named())
        .map(|c| text(c, code).to_string())
        .collect()
}

/// Names in a `superclass` / `super_interfaces` / `extends_interfaces` clause
fn clause_type_names(node: Node, code: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if is_comment(child) {
            continue;
        }
        if child.kind() == "type_list" {
            let mut list_cursor = child.walk();
            for ty in child.named_children(&mut list_cursor) {
                if !is_comment(ty) {
                    names.push(type_name_with_scope(ty, code));
                }
            }
        } else {
            names.push(type_name_with_scope(child, code));
        }
    }
    names
}

fn lower_type_body(node: Node, code: &str) -> TypeBody {
    let mut body = TypeBody {
        name: node.child_by_field_name("name").map(|n| text(n, code).to_string()).unwrap_or_default(),
        modifiers: modifiers_of(node, code),
        span: span_of(node),
        ..Default::default()
    };

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "superclass" | "extends_interfaces" => {
                body.extended_types.extend(clause_type_names(child, code));
            }
            "super_interfaces" => {
                body.implemented_types.extend(clause_type_names(child, code));
            }
            _ => {}
        }
    }

    if let Some(members) = node.child_by_field_name("body") {
        // 紧邻方法之前的 /** */ 注释视为该方法的 Javadoc
        let mut pending_doc: Option<String> = None;
        let mut member_cursor = members.walk();
        for member in members.named_children(&mut member_cursor) {
            match member.kind() {
                "block_comment" | "comment" if javadoc::is_doc_comment(text(member, code)) => {
                    pending_doc = Some(text(member, code).to_string());
                }
                "field_declaration" | "constant_declaration" => {
                    pending_doc = None;
                    body.fields.push(lower_field(member, code));
                }
                "method_declaration" => {
                    body.methods.push(lower_method(member, code, pending_doc.take()));
                }
                _ => pending_doc = None,
            }
        }
    }

    body
}

fn lower_field(node: Node, code: &str) -> FieldDecl {
    let base_type = node
        .child_by_field_name("type")
        .map(|t| type_text(t, code))
        .unwrap_or_default();

    let mut cursor = node.walk();
    let variables = node
        .children_by_field_name("declarator", &mut cursor)
        .map(|declarator| {
            let name = declarator
                .child_by_field_name("name")
                .map(|n| text(n, code))
                .unwrap_or("");
            // `int a[]` declares an `int[]`
            let dimensions = declarator
                .child_by_field_name("dimensions")
                .map(|d| type_text(d, code))
                .unwrap_or_default();
            VariableDecl::new(name, &format!("{}{}", base_type, dimensions))
        })
        .collect();

    FieldDecl {
        modifiers: modifiers_of(node, code),
        variables,
    }
}

fn lower_parameters(node: Node, code: &str) -> Vec<Parameter> {
    let mut parameters = Vec::new();
    let mut cursor = node.walk();
    for param in node.named_children(&mut cursor) {
        match param.kind() {
            "formal_parameter" => {
                let ty = param.child_by_field_name("type").map(|t| type_text(t, code)).unwrap_or_default();
                let dimensions = param
                    .child_by_field_name("dimensions")
                    .map(|d| type_text(d, code))
                    .unwrap_or_default();
                let name = param.child_by_field_name("name").map(|n| text(n, code)).unwrap_or("");
                parameters.push(Parameter::new(&format!("{}{}", ty, dimensions), name));
            }
            "spread_parameter" => {
                let mut ty = String::new();
                let mut name = "";
                let mut spread_cursor = param.walk();
                for child in param.named_children(&mut spread_cursor) {
                    match child.kind() {
                        "modifiers" | "marker_annotation" | "annotation" => {}
                        "variable_declarator" => {
                            name = child.child_by_field_name("name").map(|n| text(n, code)).unwrap_or("");
                        }
                        _ if ty.is_empty() && !is_comment(child) => ty = type_text(child, code),
                        _ => {}
                    }
                }
                parameters.push(Parameter::new(&format!("{}...", ty), name));
            }
            _ => {}
        }
    }
    parameters
}

fn lower_method(node: Node, code: &str, doc_comment: Option<String>) -> MethodDecl {
    MethodDecl {
        name: node.child_by_field_name("name").map(|n| text(n, code).to_string()).unwrap_or_default(),
        return_type: node.child_by_field_name("type").map(|t| type_text(t, code)).unwrap_or_default(),
        parameters: node
            .child_by_field_name("parameters")
            .map(|p| lower_parameters(p, code))
            .unwrap_or_default(),
        modifiers: modifiers_of(node, code),
        doc_comment,
        body: node.child_by_field_name("body").map(|b| {
            let mut nodes = Vec::new();
            lower_children(b, code, &mut nodes);
            nodes
        }),
        span: span_of(node),
    }
}

// ============================================================================
// 方法体降级: 只保留分析关心的节点，其余节点展开为其子节点
// ============================================================================

fn lower_children(node: Node, code: &str, out: &mut Vec<BodyNode>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        lower_node(child, code, out);
    }
}

fn lower_node(node: Node, code: &str, out: &mut Vec<BodyNode>) {
    let line = node.start_position().row + 1;
    let kind = match node.kind() {
        "if_statement" => NodeKind::If,
        "for_statement" => NodeKind::For,
        "enhanced_for_statement" => NodeKind::ForEach,
        "while_statement" => NodeKind::While,
        "do_statement" => NodeKind::DoWhile,
        "catch_clause" => NodeKind::Catch,
        "ternary_expression" => NodeKind::Conditional,
        "method_invocation" => NodeKind::Call {
            receiver: node.child_by_field_name("object").map(|o| receiver_text(o, code)),
            name: node.child_by_field_name("name").map(|n| text(n, code).to_string()).unwrap_or_default(),
        },
        "switch_block_statement_group" | "switch_rule" => {
            lower_switch_group(node, code, out);
            return;
        }
        "line_comment" | "block_comment" | "comment" => return,
        _ => {
            lower_children(node, code, out);
            return;
        }
    };

    let mut children = Vec::new();
    lower_children(node, code, &mut children);
    out.push(BodyNode::new(kind, line, children));
}

/// Each `case`/`default` label opens its own group; statements after stacked
/// labels belong to the last one.
fn lower_switch_group(node: Node, code: &str, out: &mut Vec<BodyNode>) {
    let mut groups: Vec<BodyNode> = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "switch_label" {
            groups.push(BodyNode::leaf(
                NodeKind::SwitchGroup { labels: switch_labels(child, code) },
                child.start_position().row + 1,
            ));
        } else if let Some(last) = groups.last_mut() {
            lower_node(child, code, &mut last.children);
        } else {
            lower_node(child, code, out);
        }
    }
    out.extend(groups);
}

fn switch_labels(label: Node, code: &str) -> Vec<String> {
    let mut labels = Vec::new();
    let mut cursor = label.walk();
    for child in label.children(&mut cursor) {
        if child.is_named() {
            if !is_comment(child) && child.kind() != "guard" {
                labels.push(collapse_whitespace(text(child, code)));
            }
        } else if child.kind() == "default" {
            labels.push("default".to_string());
        }
    }
    labels
}

// Test-only helpers
#[cfg(test)]
impl JavaTreeSitterParser {
    pub fn extract_package(&self, code: &str) -> Result<Option<String>> {
        let tree = self.parse_tree(code)?;
        Ok(self.extract_package_from_tree(&tree, code))
    }

    pub fn extract_imports(&self, code: &str) -> Result<Vec<ImportDecl>> {
        let tree = self.parse_tree(code)?;
        Ok(self.extract_imports_from_tree(&tree, code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> CompilationUnit {
        let parser = JavaTreeSitterParser::new().unwrap();
        parser.parse(code).unwrap()
    }

    fn first_method(unit: &CompilationUnit) -> &MethodDecl {
        &unit.types[0].body().methods[0]
    }

    #[test]
    fn test_extract_package() {
        let parser = JavaTreeSitterParser::new().unwrap();

        let dotted = "package org.acme.billing;\nimport java.util.Map;\nclass Invoice {}\n";
        assert_eq!(parser.extract_package(dotted).unwrap(), Some("org.acme.billing".to_string()));

        let single = "package billing;\nclass Invoice {}\n";
        assert_eq!(parser.extract_package(single).unwrap(), Some("billing".to_string()));
    }

    #[test]
    fn test_extract_package_none() {
        let parser = JavaTreeSitterParser::new().unwrap();
        assert_eq!(parser.extract_package("class Scratch { int x; }").unwrap(), None);
    }

    #[test]
    fn test_extract_imports_with_wildcard() {
        let code = r#"
            package com.example.demo;
            import java.util.List;
            import java.util.concurrent.*;
            import static java.lang.Math.max;
            public class Test {}
        "#;

        let parser = JavaTreeSitterParser::new().unwrap();
        let imports = parser.extract_imports(code).unwrap();

        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0], ImportDecl::new("java.util.List", false));
        assert_eq!(imports[1], ImportDecl::new("java.util.concurrent", true));
        assert_eq!(imports[2], ImportDecl::new("java.lang.Math.max", false));
    }

    #[test]
    fn test_class_header() {
        let code = r#"
            package com.example;

            @Service
            public final class UserService extends java.util.AbstractList<User> implements Serializable, Comparable<UserService> {
            }
        "#;

        let unit = parse(code);
        assert_eq!(unit.package_name(), "com.example");
        assert_eq!(unit.types.len(), 1);

        let decl = &unit.types[0];
        assert!(!decl.is_interface());
        let body = decl.body();
        assert_eq!(body.name, "UserService");
        assert_eq!(body.modifiers, vec!["public", "final"]);
        assert_eq!(body.extended_types, vec!["java.util.AbstractList"]);
        assert_eq!(body.implemented_types, vec!["Serializable", "Comparable"]);
        assert_eq!(body.span, Some(SourceSpan::new(4, 6)));
    }

    #[test]
    fn test_interface_extends_list() {
        let code = r#"
            public interface Repo<T> extends Iterable<T>, AutoCloseable {
                int LIMIT = 10;
                T find(long id);
            }
        "#;

        let unit = parse(code);
        let decl = &unit.types[0];
        assert!(decl.is_interface());
        assert_eq!(decl.body().extended_types, vec!["Iterable", "AutoCloseable"]);
        assert!(decl.body().implemented_types.is_empty());

        // 接口常量也是字段
        assert_eq!(decl.body().fields.len(), 1);
        assert_eq!(decl.body().fields[0].variables[0], VariableDecl::new("LIMIT", "int"));

        let method = &decl.body().methods[0];
        assert_eq!(method.name, "find");
        assert_eq!(method.return_type, "T");
        assert!(method.body.is_none());
    }

    #[test]
    fn test_multi_variable_field() {
        let code = r#"
            public class Point {
                private static int x, y[];
                protected Map<String, List<Integer>> index;
            }
        "#;

        let unit = parse(code);
        let fields = &unit.types[0].body().fields;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].modifiers, vec!["private", "static"]);
        assert_eq!(
            fields[0].variables,
            vec![VariableDecl::new("x", "int"), VariableDecl::new("y", "int[]")]
        );
        assert_eq!(fields[1].variables[0].declared_type, "Map<String, List<Integer>>");
    }

    #[test]
    fn test_method_signature_and_doc() {
        let code = r#"
            public class Calc {
                /**
                 * Adds numbers.
                 * @param a first
                 */
                @Override
                public static synchronized int add(int a, final long[] b, String... rest) {
                    return a;
                }

                // plain comment
                void plain() {}
            }
        "#;

        let unit = parse(code);
        let methods = &unit.types[0].body().methods;
        assert_eq!(methods.len(), 2);

        let add = &methods[0];
        assert_eq!(add.name, "add");
        assert_eq!(add.return_type, "int");
        assert_eq!(add.modifiers, vec!["public", "static", "synchronized"]);
        assert_eq!(
            add.parameters,
            vec![
                Parameter::new("int", "a"),
                Parameter::new("long[]", "b"),
                Parameter::new("String...", "rest"),
            ]
        );
        assert!(add.doc_comment.as_deref().unwrap().contains("Adds numbers."));
        // annotation line through closing brace
        assert_eq!(add.span, Some(SourceSpan::new(7, 10)));

        assert!(methods[1].doc_comment.is_none());
    }

    #[test]
    fn test_constructors_and_nested_types_skipped() {
        let code = r#"
            public class Outer {
                public Outer() { init(); }
                void run() {}
                static class Inner { void hidden() {} }
            }
            enum Color { RED }
        "#;

        let unit = parse(code);
        assert_eq!(unit.types.len(), 1);
        let methods = &unit.types[0].body().methods;
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "run");
    }

    #[test]
    fn test_body_lowering_order() {
        let code = r#"
            public class Foo {
                public void bar() {
                    if (x) {
                        for (int i = 0; i < 1; i++) {}
                    }
                }
            }
        "#;

        let unit = parse(code);
        let body = first_method(&unit).body.as_ref().unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].kind, NodeKind::If);
        assert_eq!(body[0].children.len(), 1);
        assert_eq!(body[0].children[0].kind, NodeKind::For);
    }

    #[test]
    fn test_call_receivers() {
        let code = r#"
            public class Svc {
                void work() {
                    helper();
                    this.save(a);
                    repo.findAll()
                        .stream()
                        .count();
                }
            }
        "#;

        let unit = parse(code);
        let body = first_method(&unit).body.as_ref().unwrap();

        let calls: Vec<(Option<String>, String)> = flatten(body)
            .into_iter()
            .filter_map(|k| match k {
                NodeKind::Call { receiver, name } => Some((receiver, name)),
                _ => None,
            })
            .collect();

        assert_eq!(
            calls,
            vec![
                (None, "helper".to_string()),
                (Some("this".to_string()), "save".to_string()),
                (Some("repo.findAll().stream()".to_string()), "count".to_string()),
                (Some("repo.findAll()".to_string()), "stream".to_string()),
                (Some("repo".to_string()), "findAll".to_string()),
            ]
        );
    }

    #[test]
    fn test_switch_labels() {
        let code = r#"
            public class Sw {
                int pick(int v) {
                    switch (v) {
                        case 1:
                        case 2:
                            return a ? 1 : 2;
                        default:
                            return 0;
                    }
                }
            }
        "#;

        let unit = parse(code);
        let body = first_method(&unit).body.as_ref().unwrap();
        let groups: Vec<&BodyNode> = body
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::SwitchGroup { .. }))
            .collect();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].kind, NodeKind::SwitchGroup { labels: vec!["1".to_string()] });
        assert!(groups[0].children.is_empty());
        assert_eq!(groups[1].kind, NodeKind::SwitchGroup { labels: vec!["2".to_string()] });
        assert_eq!(groups[1].children[0].kind, NodeKind::Conditional);
        assert_eq!(groups[2].kind, NodeKind::SwitchGroup { labels: vec!["default".to_string()] });
    }

    #[test]
    fn test_syntax_error_is_parse_failure() {
        let code = r#"
            public class Broken {
                void run( {
            }
        "#;

        let parser = JavaTreeSitterParser::new().unwrap();
        let failure = parser.parse(code).unwrap_err();
        assert!(!failure.diagnostics.is_empty());
        assert!(failure.diagnostics.len() <= MAX_DIAGNOSTICS);
        assert!(failure.to_string().contains("line"));
    }

    fn flatten(nodes: &[BodyNode]) -> Vec<NodeKind> {
        let mut out = Vec::new();
        for node in nodes {
            out.push(node.kind.clone());
            out.extend(flatten(&node.children));
        }
        out
    }
}
