//! 输入收集: 文件/目录 -> 排序去重后的源文件列表

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use tracing::debug;
use walkdir::WalkDir;

/// Every `*.java` file under the given files and directories
pub fn collect_java_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    collect_source_files(inputs, "java")
}

/// Files with `extension` under the inputs, sorted and deduplicated
///
/// A path that does not exist is an error; unreadable directory entries are
/// skipped.
pub fn collect_source_files(inputs: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for input in inputs {
        if !input.exists() {
            bail!("Path not found: {}", input.display());
        }

        if input.is_file() {
            if has_extension(input, extension) {
                files.insert(input.clone());
            } else {
                debug!("Skipping non-.{extension} input {}", input.display());
            }
            continue;
        }

        for entry in WalkDir::new(input).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                files.insert(entry.into_path());
            }
        }
    }

    debug!("Staged {} .{extension} files", files.len());
    Ok(files.into_iter().collect())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

/// Create the parent directories of an output file
pub fn ensure_parent_dir(file: &Path) -> Result<()> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display())),
        _ => Ok(()),
    }
}
