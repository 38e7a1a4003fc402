//! Javadoc 摘要提取
//!
//! Only the description block matters here: everything before the first
//! block tag (`@param`, `@return`, ...). Inline tags such as `{@code x}` are
//! kept verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading `*` decoration of a comment line, plus one optional space
static LINE_DECORATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\*( )?").unwrap()
});

/// Block tag starting a line, e.g. `@param name`
static BLOCK_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*@[A-Za-z]").unwrap()
});

/// Whether a comment is a doc comment (`/** ... */`, not `/**/`)
pub fn is_doc_comment(comment: &str) -> bool {
    let trimmed = comment.trim_start();
    trimmed.starts_with("/**") && !trimmed.starts_with("/**/")
}

/// Description lines of a doc comment, decoration stripped
pub fn description_lines(comment: &str) -> Vec<String> {
    let inner = comment
        .trim()
        .trim_start_matches("/**")
        .trim_end_matches("*/");

    let mut lines = Vec::new();
    for raw in inner.lines() {
        let line = LINE_DECORATION_REGEX.replace(raw, "");
        if BLOCK_TAG_REGEX.is_match(&line) {
            break;
        }
        lines.push(line.trim_end().to_string());
    }
    lines
}

/// First non-empty description line, trimmed
pub fn summary(comment: &str) -> Option<String> {
    if !is_doc_comment(comment) {
        return None;
    }
    description_lines(comment)
        .into_iter()
        .map(|line| line.trim().to_string())
        .find(|line| !line.is_empty())
}
