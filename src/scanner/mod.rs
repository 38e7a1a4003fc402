//! 源码解析层
//!
//! `AstProvider` is the seam between the analysis engine and whatever turns
//! source text into a [`CompilationUnit`]. The shipped implementation is
//! tree-sitter based.

pub mod javadoc;
pub mod tree_sitter_java;

use std::fmt;
use crate::ast::CompilationUnit;

/// Parser diagnostics for a file that could not be turned into an AST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub diagnostics: Vec<String>,
}

impl ParseFailure {
    pub fn new(diagnostics: Vec<String>) -> Self {
        Self { diagnostics }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostics.join("; "))
    }
}

impl std::error::Error for ParseFailure {}

/// Source text → compilation unit
pub trait AstProvider: Send + Sync {
    /// File extension handled by this provider
    fn supported_extension(&self) -> &str;

    fn parse(&self, code: &str) -> Result<CompilationUnit, ParseFailure>;
}
