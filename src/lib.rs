// ============================================================================
// Java Insight - Library Interface
// ============================================================================
//
// Structural and complexity analysis of Java sources. The binary (main.rs)
// is a thin CLI over `engine::ProjectAnalyzer`; integration tests drive the
// same entry point.

pub mod analysis;
pub mod ast;
pub mod cli;
pub mod config;
pub mod engine;
pub mod model;
pub mod scanner;
pub mod staging;

pub use analysis::{ReferenceStructure, StructuralMatcher, StructureCatalog};
pub use config::{AnalyzerConfig, Thresholds};
pub use engine::{FileError, FileOutcome, InMemorySource, ProjectAnalyzer, SourceHandle};
pub use model::{CallEdge, ClassRecord, FieldRecord, MethodRecord, ProjectReport};
