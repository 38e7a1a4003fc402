// ============================================================================
// 批量分析引擎
// ============================================================================
//
// Each source is read, parsed and extracted on its own rayon worker and
// produces one FileOutcome. Outcomes are folded in input order, so the
// report does not depend on scheduling. A failing or panicking file adds one
// processing error and never stops the batch.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::Result;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use crate::analysis::{ClassExtractor, StructuralMatcher, StructureCatalog};
use crate::config::AnalyzerConfig;
use crate::model::{CallEdge, ClassRecord, ProjectReport};
use crate::scanner::tree_sitter_java::JavaTreeSitterParser;
use crate::scanner::{AstProvider, ParseFailure};

/// A readable source with a stable display path
pub trait SourceHandle: Sync {
    fn display_path(&self) -> String;
    fn read(&self) -> std::io::Result<String>;
}

impl SourceHandle for Path {
    fn display_path(&self) -> String {
        self.display().to_string()
    }

    /// Invalid UTF-8 (legacy Latin-1 sources) is decoded with replacement characters
    fn read(&self) -> std::io::Result<String> {
        let bytes = std::fs::read(self)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl SourceHandle for PathBuf {
    fn display_path(&self) -> String {
        self.as_path().display_path()
    }

    fn read(&self) -> std::io::Result<String> {
        self.as_path().read()
    }
}

impl<T: SourceHandle + ?Sized> SourceHandle for &T {
    fn display_path(&self) -> String {
        (**self).display_path()
    }

    fn read(&self) -> std::io::Result<String> {
        (**self).read()
    }
}

/// Source text held in memory (tests, editor buffers)
#[derive(Debug, Clone)]
pub struct InMemorySource {
    path: String,
    content: String,
}

impl InMemorySource {
    pub fn new(path: &str, content: &str) -> Self {
        Self {
            path: path.to_string(),
            content: content.to_string(),
        }
    }
}

impl SourceHandle for InMemorySource {
    fn display_path(&self) -> String {
        self.path.clone()
    }

    fn read(&self) -> std::io::Result<String> {
        Ok(self.content.clone())
    }
}

/// 单文件失败原因; Display 即报告中的 processingErrors 条目
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {failure}")]
    Parse { path: String, failure: ParseFailure },

    #[error("Unexpected error analyzing file {path}: {message}")]
    Fault { path: String, message: String },
}

/// Result of analyzing one source
#[derive(Debug, Default)]
pub struct FileOutcome {
    pub classes: Vec<ClassRecord>,
    pub edges: Vec<CallEdge>,
    pub error: Option<FileError>,
}

impl FileOutcome {
    fn failed(error: FileError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }
}

/// 项目分析器
pub struct ProjectAnalyzer<P: AstProvider = JavaTreeSitterParser> {
    provider: P,
    config: AnalyzerConfig,
    matcher: StructuralMatcher,
}

impl ProjectAnalyzer<JavaTreeSitterParser> {
    pub fn new(config: AnalyzerConfig, catalog: Arc<StructureCatalog>) -> Result<Self> {
        Ok(Self::with_provider(JavaTreeSitterParser::new()?, config, catalog))
    }
}

impl<P: AstProvider> ProjectAnalyzer<P> {
    pub fn with_provider(provider: P, config: AnalyzerConfig, catalog: Arc<StructureCatalog>) -> Self {
        Self {
            provider,
            config,
            matcher: StructuralMatcher::new(catalog),
        }
    }

    /// Extension of the files this analyzer understands
    pub fn extension(&self) -> &str {
        self.provider.supported_extension()
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze every source; never fails, problems land in `processing_errors`
    pub fn analyze<S: SourceHandle>(&self, sources: &[S]) -> ProjectReport {
        let outcomes = match self.config.jobs {
            Some(jobs) => match rayon::ThreadPoolBuilder::new().num_threads(jobs.max(1)).build() {
                Ok(pool) => pool.install(|| self.analyze_all(sources)),
                Err(e) => {
                    warn!("Failed to build a {jobs}-thread pool ({e}), using the global pool");
                    self.analyze_all(sources)
                }
            },
            None => self.analyze_all(sources),
        };

        let report = outcomes
            .into_iter()
            .fold(ProjectReport::default(), |mut report, outcome| {
                if let Some(error) = outcome.error {
                    warn!("{error}");
                    report.processing_errors.push(error.to_string());
                }
                report.classes.extend(outcome.classes);
                report.edges.extend(outcome.edges);
                report
            });

        info!(
            "Analyzed {} files: {} classes, {} call edges, {} errors",
            sources.len(),
            report.classes.len(),
            report.edges.len(),
            report.processing_errors.len()
        );
        report
    }

    fn analyze_all<S: SourceHandle>(&self, sources: &[S]) -> Vec<FileOutcome> {
        // collect() on an indexed parallel iterator keeps input order
        sources.par_iter().map(|source| self.analyze_source(source)).collect()
    }

    /// One source -> one outcome; panics are caught here
    pub fn analyze_source<S: SourceHandle + ?Sized>(&self, source: &S) -> FileOutcome {
        let path = source.display_path();
        debug!("Analyzing {path}");

        let code = match source.read() {
            Ok(code) => code,
            Err(err) => return FileOutcome::failed(FileError::Read { path, source: err }),
        };

        match panic::catch_unwind(AssertUnwindSafe(|| self.analyze_code(&path, &code))) {
            Ok(outcome) => outcome,
            Err(payload) => FileOutcome::failed(FileError::Fault {
                message: panic_message(payload.as_ref()),
                path,
            }),
        }
    }

    fn analyze_code(&self, path: &str, code: &str) -> FileOutcome {
        let unit = match self.provider.parse(code) {
            Ok(unit) => unit,
            Err(failure) => {
                return FileOutcome::failed(FileError::Parse {
                    path: path.to_string(),
                    failure,
                })
            }
        };

        let extractor = ClassExtractor::new(&self.config.thresholds, &self.matcher);
        let mut outcome = FileOutcome::default();
        for decl in &unit.types {
            let (class, edges) = extractor.extract_class(decl, unit.package_name(), &unit.imports);
            outcome.classes.push(class);
            outcome.edges.extend(edges);
        }
        debug!("{path}: {} types", outcome.classes.len());
        outcome
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
