//! 分析层: 圈复杂度、调用边、结构提取、标准结构匹配

pub mod call_edges;
pub mod complexity;
pub mod extractor;
pub mod matcher;

pub use extractor::ClassExtractor;
pub use matcher::{ReferenceStructure, StructuralMatcher, StructureCatalog};
