//! CLI 模式处理器
//!
//! 默认输出人类可读的 Markdown 摘要，`--json` 或 `--output <FILE>` 输出完整 JSON 报告。

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::json;
use tracing::{error, info, warn};
use crate::analysis::StructureCatalog;
use crate::config::{AnalyzerConfig, Thresholds};
use crate::engine::ProjectAnalyzer;
use crate::model::ProjectReport;
use crate::staging;

/// Inputs could not be staged or the report could not be written
pub const EXIT_FATAL_IO: i32 = 2;
/// Any other unrecoverable error
pub const EXIT_FATAL: i32 = 3;

/// CLI Commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// 🔍 分析 Java 源码 (文件或目录)
    Analyze {
        /// 源文件或目录
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 报告输出: stdout 或文件路径
        #[arg(short, long, default_value = "stdout")]
        output: String,

        /// 参考结构目录 (JSON / YAML)，默认使用内置目录
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// 阈值配置文件 (YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// 并行线程数
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// 📚 列出参考结构
    Catalog {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// ℹ️ 引擎状态
    Status {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Where the report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "stdout" | "-" | "" => OutputTarget::Stdout,
            path => OutputTarget::File(PathBuf::from(path)),
        }
    }
}

/// 处理 CLI 命令，返回进程退出码
pub fn handle_command(cmd: Command, json_output: bool) -> Result<i32> {
    match cmd {
        Command::Analyze { paths, output, catalog, config, jobs } => {
            let target = OutputTarget::parse(&output);
            let analyzer = match build_analyzer(config.as_deref(), catalog.as_deref(), jobs) {
                Ok(analyzer) => analyzer,
                Err(e) => return Ok(emit_fatal(&e, &target)),
            };
            Ok(run_analyze(&analyzer, &paths, &target, json_output))
        }

        Command::Catalog { catalog } => {
            let catalog = load_catalog(catalog.as_deref());
            if json_output {
                println!("{}", serde_json::to_string_pretty(catalog.entries())?);
            } else {
                println!("{}", render_catalog(&catalog));
            }
            Ok(0)
        }

        Command::Status { config } => {
            let thresholds = load_thresholds(config.as_deref())?;
            let catalog = StructureCatalog::bundled();
            let version = env!("CARGO_PKG_VERSION");
            if json_output {
                let status = json!({
                    "version": version,
                    "engine": "tree-sitter-java",
                    "thresholds": thresholds,
                    "bundledStructures": catalog.len(),
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!(
                    "Java Insight v{version}\n\
                    Engine: Tree-sitter AST (Java)\n\
                    Bundled reference structures: {}\n\
                    Thresholds: class LOC > {}, methods > {}, method LOC > {}, CC > {}, params > {}",
                    catalog.len(),
                    thresholds.large_class_loc,
                    thresholds.many_methods,
                    thresholds.long_method_loc,
                    thresholds.high_complexity,
                    thresholds.many_parameters,
                );
            }
            Ok(0)
        }
    }
}

fn load_thresholds(path: Option<&Path>) -> Result<Thresholds> {
    match path {
        Some(path) => Thresholds::load(path),
        None => Ok(Thresholds::default()),
    }
}

fn build_analyzer(config: Option<&Path>, catalog: Option<&Path>, jobs: Option<usize>) -> Result<ProjectAnalyzer> {
    let thresholds = load_thresholds(config)?;
    ProjectAnalyzer::new(AnalyzerConfig { thresholds, jobs }, load_catalog(catalog))
}

fn load_catalog(path: Option<&Path>) -> Arc<StructureCatalog> {
    match path {
        Some(path) => Arc::new(StructureCatalog::load_or_empty(path)),
        None => StructureCatalog::bundled(),
    }
}

/// Stage, analyze, write; returns the exit code
pub fn run_analyze(
    analyzer: &ProjectAnalyzer,
    paths: &[PathBuf],
    target: &OutputTarget,
    json_output: bool,
) -> i32 {
    let files = match staging::collect_source_files(paths, analyzer.extension()) {
        Ok(files) => files,
        Err(e) => return emit_fatal_io(&e, target),
    };
    info!("Analyzing {} source files", files.len());

    let mut report = analyzer.analyze(&files);
    if files.is_empty() {
        let inputs: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        let message = format!("No .{} files found in {}", analyzer.extension(), inputs.join(", "));
        warn!("{message}");
        report.processing_errors.push(message);
    }

    let written = match target {
        OutputTarget::File(path) => write_report_file(&report, path)
            .map(|_| info!("Report written to {}", path.display())),
        OutputTarget::Stdout if json_output => write_report_stdout(&report),
        OutputTarget::Stdout => {
            print!("{}", render_markdown(&report));
            Ok(())
        }
    };

    match written {
        Ok(()) => 0,
        Err(e) => emit_fatal_io(&e, &OutputTarget::Stdout),
    }
}

fn write_report_file(report: &ProjectReport, path: &Path) -> Result<()> {
    staging::ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write report: {}", path.display()))
}

fn write_report_stdout(report: &ProjectReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Staging or report writing failed
fn emit_fatal_io(err: &anyhow::Error, target: &OutputTarget) -> i32 {
    emit_fatal_report(format!("Fatal I/O error during analysis: {err:#}"), target);
    EXIT_FATAL_IO
}

/// Setup failed before any file was analyzed (config, parser)
fn emit_fatal(err: &anyhow::Error, target: &OutputTarget) -> i32 {
    emit_fatal_report(format!("Fatal error during analysis: {err:#}"), target);
    EXIT_FATAL
}

/// Best-effort minimal report for a run that could not complete
fn emit_fatal_report(message: String, target: &OutputTarget) {
    error!("{message}");

    let report = ProjectReport::fatal(message);
    let written = match target {
        OutputTarget::File(path) => write_report_file(&report, path).is_ok(),
        OutputTarget::Stdout => false,
    };
    if !written {
        // 文件不可写时退回 stdout
        let _ = write_report_stdout(&report);
    }
}

// ============================================================================
// Markdown 渲染
// ============================================================================

/// Human-readable summary of a report
pub fn render_markdown(report: &ProjectReport) -> String {
    let method_total: usize = report.classes.iter().map(|c| c.method_count()).sum();
    let mut out = format!(
        "## ☕ Java 结构分析\n\n**Classes**: {} | **Methods**: {} | **Call edges**: {} | **Errors**: {}\n",
        report.classes.len(),
        method_total,
        report.edges.len(),
        report.processing_errors.len()
    );

    for class in &report.classes {
        let kind = if class.is_interface { "interface" } else { "class" };
        let _ = write!(
            out,
            "\n### {} ({}, {} LOC, {} fields)\n\n> {}\n",
            class.fully_qualified_name,
            kind,
            class.line_count,
            class.field_count(),
            class.summary
        );
        for warning in &class.warnings {
            let _ = writeln!(out, "- ⚠️ {warning}");
        }
        if !class.external_libraries.is_empty() {
            let libs: Vec<&str> = class.external_libraries.iter().map(String::as_str).collect();
            let _ = writeln!(out, "- 📦 External: {}", libs.join(", "));
        }

        if class.method_count() > 0 {
            out.push_str("\n| Method | LOC | CC | Warnings |\n|---|---|---|---|\n");
            for method in class.methods() {
                let warnings = if method.warnings.is_empty() {
                    "-".to_string()
                } else {
                    method.warnings.join("; ")
                };
                let _ = writeln!(
                    out,
                    "| `{}` | {} | {} | {} |",
                    method.name, method.line_count, method.cyclomatic_complexity, warnings
                );
            }
        }
    }

    if !report.processing_errors.is_empty() {
        out.push_str("\n### ❌ Processing errors\n\n");
        for err in &report.processing_errors {
            let _ = writeln!(out, "- {err}");
        }
    }
    out
}

fn render_catalog(catalog: &StructureCatalog) -> String {
    if catalog.is_empty() {
        return "No reference structures loaded.".to_string();
    }
    let mut out = format!("## 📚 Reference structures ({})\n\n| Class | Kind | Extends | Description |\n|---|---|---|---|\n", catalog.len());
    for entry in catalog.entries() {
        let _ = writeln!(
            out,
            "| `{}` | {} | {} | {} |",
            entry.class_name,
            entry.kind.as_deref().unwrap_or("-"),
            entry.extends_name.as_deref().unwrap_or("-"),
            entry.description
        );
    }
    out
}
