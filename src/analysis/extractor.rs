// ============================================================================
// 结构提取 - 类型声明 -> ClassRecord / MethodRecord
// ============================================================================

use std::collections::BTreeSet;
use crate::ast::{self, ImportDecl, MethodDecl, TypeDeclaration};
use crate::config::Thresholds;
use crate::model::{CallEdge, ClassRecord, FieldRecord, MethodRecord};
use crate::scanner::javadoc;
use super::call_edges::{collect_call_sites, edges_for_method};
use super::complexity;
use super::matcher::StructuralMatcher;

/// Standard-library import prefixes never reported as external
const STANDARD_PREFIXES: &[&str] = &["java.", "javax."];

/// 提取器：持有阈值与匹配器
pub struct ClassExtractor<'a> {
    thresholds: &'a Thresholds,
    matcher: &'a StructuralMatcher,
}

impl<'a> ClassExtractor<'a> {
    pub fn new(thresholds: &'a Thresholds, matcher: &'a StructuralMatcher) -> Self {
        Self { thresholds, matcher }
    }

    /// One top-level declaration -> record plus every call edge of its methods
    pub fn extract_class(
        &self,
        decl: &TypeDeclaration,
        package: &str,
        imports: &[ImportDecl],
    ) -> (ClassRecord, Vec<CallEdge>) {
        let body = decl.body();
        let mut record = ClassRecord::new(package, &body.name, decl.is_interface());
        record.modifiers = body.modifiers.clone();
        record.line_count = ast::line_count(body.span);
        record.imports = imports.iter().map(ImportDecl::display_name).collect();

        for field in &body.fields {
            for var in &field.variables {
                record.add_field(FieldRecord {
                    name: var.name.clone(),
                    declared_type: var.declared_type.clone(),
                    modifiers: field.modifiers.clone(),
                });
            }
        }

        let mut edges = Vec::new();
        for method in &body.methods {
            let (method_record, method_edges) =
                self.extract_method(method, &record.fully_qualified_name);
            record.add_method(method_record);
            edges.extend(method_edges);
        }

        if record.line_count > self.thresholds.large_class_loc {
            record.add_warning(self.thresholds.large_class_warning());
        }
        if record.method_count() > self.thresholds.many_methods {
            record.add_warning(self.thresholds.many_methods_warning());
        }

        record.extended_types = body.extended_types.clone();
        record.implemented_types = body.implemented_types.clone();
        record.external_libraries = external_libraries(&record.imports, package);
        record.summary = self.matcher.summarize(&record);

        (record, edges)
    }

    /// One method -> record plus one edge per call site
    pub fn extract_method(&self, method: &MethodDecl, owner_fqcn: &str) -> (MethodRecord, Vec<CallEdge>) {
        let measured = complexity::measure(method.body.as_deref());
        let sites = method
            .body
            .as_deref()
            .map(collect_call_sites)
            .unwrap_or_default();

        let mut record = MethodRecord {
            name: method.name.clone(),
            return_type: method.return_type.clone(),
            parameters: method
                .parameters
                .iter()
                .map(|p| format!("{} {}", p.declared_type, p.name))
                .collect(),
            modifiers: method.modifiers.clone(),
            line_count: ast::line_count(method.span),
            cyclomatic_complexity: measured.value,
            doc_summary: method.doc_comment.as_deref().and_then(javadoc::summary),
            invoked_targets: sites.iter().map(|s| s.target()).collect(),
            control_statements: measured.control_statements,
            warnings: Vec::new(),
        };

        if record.line_count > self.thresholds.long_method_loc {
            record.warnings.push(self.thresholds.long_method_warning());
        }
        if record.cyclomatic_complexity > self.thresholds.high_complexity {
            record.warnings.push(self.thresholds.high_complexity_warning());
        }
        if method.parameters.len() > self.thresholds.many_parameters {
            record.warnings.push(self.thresholds.many_parameters_warning());
        }

        let edges = edges_for_method(owner_fqcn, &method.name, &sites);
        (record, edges)
    }
}

/// Package up to its first '.', the whole name without a dot
pub fn project_root(package: &str) -> &str {
    package.split('.').next().unwrap_or(package)
}

/// Imports judged to come from outside the JDK and the current project
///
/// `com.google.common.collect.Lists` -> `com.google.common.collect`
pub fn external_libraries<'i, I>(imports: I, package: &str) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'i String>,
{
    let root = project_root(package);
    imports
        .into_iter()
        .filter(|imp| !STANDARD_PREFIXES.iter().any(|p| imp.starts_with(p)))
        .filter(|imp| root.is_empty() || !imp.starts_with(root))
        .map(|imp| match imp.rfind('.') {
            Some(idx) if idx > 0 => imp[..idx].to_string(),
            _ => imp.clone(),
        })
        .collect()
}
