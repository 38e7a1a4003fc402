// ============================================================================
// AST 模型 - 与解析器无关的 Java 语法树
// ============================================================================
//
// The analysis passes only see these owned types. The tree-sitter provider in
// `scanner::tree_sitter_java` lowers its concrete syntax tree into them, and
// tests can build them by hand.

/// 1-based inclusive line range of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub start_line: usize,
    pub end_line: usize,
}

impl SourceSpan {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self { start_line, end_line }
    }

    /// `end - start + 1`, or 0 for an inverted span
    pub fn line_count(&self) -> usize {
        if self.end_line < self.start_line {
            return 0;
        }
        self.end_line - self.start_line + 1
    }
}

/// Line count of an optional span (0 when the provider had no position)
pub fn line_count(span: Option<SourceSpan>) -> usize {
    span.map(|s| s.line_count()).unwrap_or(0)
}

/// One parsed source file
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDeclaration>,
}

impl CompilationUnit {
    /// Package name, or "" for the default package
    pub fn package_name(&self) -> &str {
        self.package.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Dotted name without the trailing `.*`
    pub name: String,
    pub is_wildcard: bool,
}

impl ImportDecl {
    pub fn new(name: &str, is_wildcard: bool) -> Self {
        Self {
            name: name.to_string(),
            is_wildcard,
        }
    }

    /// Import as reported: wildcard imports carry a `.*` suffix
    pub fn display_name(&self) -> String {
        if self.is_wildcard {
            format!("{}.*", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Top-level type declaration, tagged by kind
#[derive(Debug, Clone)]
pub enum TypeDeclaration {
    Class(TypeBody),
    Interface(TypeBody),
}

impl TypeDeclaration {
    pub fn body(&self) -> &TypeBody {
        match self {
            TypeDeclaration::Class(body) | TypeDeclaration::Interface(body) => body,
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, TypeDeclaration::Interface(_))
    }
}

/// Structure shared by classes and interfaces
#[derive(Debug, Clone, Default)]
pub struct TypeBody {
    pub name: String,
    pub modifiers: Vec<String>,
    /// `extends` clause as written (for interfaces this may hold several names)
    pub extended_types: Vec<String>,
    /// `implements` clause as written
    pub implemented_types: Vec<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub span: Option<SourceSpan>,
}

/// One field declaration statement, possibly declaring several variables
#[derive(Debug, Clone, Default)]
pub struct FieldDecl {
    pub modifiers: Vec<String>,
    pub variables: Vec<VariableDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    pub name: String,
    pub declared_type: String,
}

impl VariableDecl {
    pub fn new(name: &str, declared_type: &str) -> Self {
        Self {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub declared_type: String,
    pub name: String,
}

impl Parameter {
    pub fn new(declared_type: &str, name: &str) -> Self {
        Self {
            declared_type: declared_type.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MethodDecl {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub modifiers: Vec<String>,
    /// Raw `/** ... */` text attached to the method
    pub doc_comment: Option<String>,
    /// None for abstract and interface signatures
    pub body: Option<Vec<BodyNode>>,
    pub span: Option<SourceSpan>,
}

// ============================================================================
// 方法体节点
// ============================================================================

/// Construct kinds the analysis passes care about. Everything else is
/// flattened away by the provider, keeping only its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    If,
    For,
    ForEach,
    While,
    DoWhile,
    Catch,
    /// Ternary `a ? b : c`
    Conditional,
    /// One `case`/`default` label group, labels as written
    SwitchGroup { labels: Vec<String> },
    /// Method invocation; `receiver` is None for unqualified calls
    Call { receiver: Option<String>, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyNode {
    pub kind: NodeKind,
    pub line: usize,
    pub children: Vec<BodyNode>,
}

impl BodyNode {
    pub fn new(kind: NodeKind, line: usize, children: Vec<BodyNode>) -> Self {
        Self { kind, line, children }
    }

    pub fn leaf(kind: NodeKind, line: usize) -> Self {
        Self::new(kind, line, Vec::new())
    }

    pub fn call(receiver: Option<&str>, name: &str, line: usize) -> Self {
        Self::leaf(
            NodeKind::Call {
                receiver: receiver.map(|r| r.to_string()),
                name: name.to_string(),
            },
            line,
        )
    }
}
