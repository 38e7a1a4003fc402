// ============================================================================
// 报告模型 - 类/方法/字段记录与项目报告
// ============================================================================
//
// Serialized field names follow the report format the downstream web UI
// already reads (`className`, `loc`, `methodName`, `graphEdges`, ...).

use std::collections::BTreeSet;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// 字段记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRecord {
    #[serde(rename = "fieldName")]
    pub name: String,
    #[serde(rename = "fieldType")]
    pub declared_type: String,
    pub modifiers: Vec<String>,
}

/// 方法记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodRecord {
    #[serde(rename = "methodName")]
    pub name: String,
    pub return_type: String,
    /// "type name" pairs in declaration order
    pub parameters: Vec<String>,
    pub modifiers: Vec<String>,
    #[serde(rename = "loc")]
    pub line_count: usize,
    pub cyclomatic_complexity: usize,
    #[serde(rename = "javadocSummary")]
    pub doc_summary: Option<String>,
    /// "receiver.method" targets, deduplicated
    #[serde(rename = "invokedMethods")]
    pub invoked_targets: BTreeSet<String>,
    pub control_statements: Vec<String>,
    pub warnings: Vec<String>,
}

/// 类/接口记录
///
/// `fields` and `methods` are private so the reported counts can only ever be
/// derived from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassRecord {
    pub package_name: String,
    pub fully_qualified_name: String,
    pub simple_name: String,
    pub is_interface: bool,
    pub modifiers: Vec<String>,
    pub imports: BTreeSet<String>,
    fields: Vec<FieldRecord>,
    methods: Vec<MethodRecord>,
    pub line_count: usize,
    pub extended_types: Vec<String>,
    pub implemented_types: Vec<String>,
    pub external_libraries: BTreeSet<String>,
    pub summary: String,
    pub warnings: Vec<String>,
}

impl ClassRecord {
    /// FQN is `package.Simple`, or just `Simple` in the default package
    pub fn new(package_name: &str, simple_name: &str, is_interface: bool) -> Self {
        let fully_qualified_name = if package_name.is_empty() {
            simple_name.to_string()
        } else {
            format!("{}.{}", package_name, simple_name)
        };
        Self {
            package_name: package_name.to_string(),
            fully_qualified_name,
            simple_name: simple_name.to_string(),
            is_interface,
            ..Default::default()
        }
    }

    pub fn add_field(&mut self, field: FieldRecord) {
        self.fields.push(field);
    }

    pub fn add_method(&mut self, method: MethodRecord) {
        self.methods.push(method);
    }

    pub fn fields(&self) -> &[FieldRecord] {
        &self.fields
    }

    pub fn methods(&self) -> &[MethodRecord] {
        &self.methods
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Serialize for ClassRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ClassRecord", 16)?;
        s.serialize_field("packageName", &self.package_name)?;
        s.serialize_field("className", &self.fully_qualified_name)?;
        s.serialize_field("simpleName", &self.simple_name)?;
        s.serialize_field("interface", &self.is_interface)?;
        s.serialize_field("modifiers", &self.modifiers)?;
        s.serialize_field("imports", &self.imports)?;
        s.serialize_field("fields", &self.fields)?;
        s.serialize_field("methods", &self.methods)?;
        s.serialize_field("loc", &self.line_count)?;
        s.serialize_field("fieldCount", &self.field_count())?;
        s.serialize_field("methodCount", &self.method_count())?;
        s.serialize_field("extendedTypes", &self.extended_types)?;
        s.serialize_field("implementedTypes", &self.implemented_types)?;
        s.serialize_field("usesExternalLibraries", &self.external_libraries)?;
        s.serialize_field("classSummary", &self.summary)?;
        s.serialize_field("warnings", &self.warnings)?;
        s.end()
    }
}

/// 调用边 (目标只是文本，不做解析)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CallEdge {
    /// "ownerFqcn.methodName"
    pub source: String,
    /// "receiverExpression.methodName"
    pub target: String,
}

impl CallEdge {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// 项目报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub classes: Vec<ClassRecord>,
    #[serde(rename = "graphEdges")]
    pub edges: Vec<CallEdge>,
    pub processing_errors: Vec<String>,
}

impl ProjectReport {
    /// Minimal report for a run that could not complete
    pub fn fatal(message: String) -> Self {
        Self {
            processing_errors: vec![message],
            ..Default::default()
        }
    }
}
