// ============================================================================
// 标准结构匹配 - 与常见 JDK 类型做启发式比对
// ============================================================================
//
// Scoring per catalog entry:
//   +3  simple name equal (case-insensitive)
//   +1  interface-ness agrees with the entry's kind tag
//   +2  some extended type ends with the entry's superclass simple name
//   +N  N implemented interfaces of the entry found (by suffix) on the class
//
// Best strictly-greater score wins, so ties keep the first entry. A best
// score of 3 or more counts as a match.

use std::path::Path;
use std::sync::Arc;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::model::ClassRecord;

pub const NOT_AVAILABLE: &str = "Standard structure data not available.";
pub const NO_MATCH: &str = "No strong structural match found with common JDK classes.";

/// Minimum score reported as a match
pub const MATCH_THRESHOLD: i64 = 3;

/// Bundled catalog shipped with the binary
const BUNDLED_CATALOG: &str = include_str!("../../resources/standard-structures.json");

static BUNDLED: Lazy<Arc<StructureCatalog>> = Lazy::new(|| {
    let catalog = StructureCatalog::from_json(BUNDLED_CATALOG).unwrap_or_else(|e| {
        warn!("Bundled standard-structures.json is invalid: {e:#}. Standard mapping disabled.");
        StructureCatalog::default()
    });
    Arc::new(catalog)
});

/// 参考结构 (目录中的一条记录)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceStructure {
    pub class_name: String,
    #[serde(default)]
    pub extends_name: Option<String>,
    #[serde(default)]
    pub implements_list: Vec<String>,
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ReferenceStructure {
    pub fn simple_name(&self) -> &str {
        simple_name(&self.class_name)
    }

    pub fn is_interface(&self) -> bool {
        self.kind
            .as_deref()
            .map(|k| k.to_lowercase().contains("interface"))
            .unwrap_or(false)
    }
}

/// Segment after the last '.'
fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// 不可变的参考结构目录
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureCatalog {
    entries: Vec<ReferenceStructure>,
}

impl StructureCatalog {
    pub fn new(entries: Vec<ReferenceStructure>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ReferenceStructure] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let entries: Vec<ReferenceStructure> =
            serde_json::from_str(text).context("Invalid reference structure catalog (JSON)")?;
        Ok(Self::new(entries))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let entries: Vec<ReferenceStructure> =
            serde_yaml::from_str(text).context("Invalid reference structure catalog (YAML)")?;
        Ok(Self::new(entries))
    }

    /// Load a catalog file; `.yml`/`.yaml` are read as YAML, anything else as JSON
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Self::from_yaml(&text),
            _ => Self::from_json(&text),
        }
    }

    /// Load a catalog file, degrading to an empty catalog on any failure
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("{e:#}. Standard mapping will be limited.");
            Self::default()
        })
    }

    /// Catalog bundled with the binary, parsed once per process
    pub fn bundled() -> Arc<Self> {
        Arc::clone(&BUNDLED)
    }
}

/// Best catalog entry for a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureMatch<'a> {
    pub entry: &'a ReferenceStructure,
    pub score: i64,
}

/// 结构匹配器
#[derive(Debug, Clone)]
pub struct StructuralMatcher {
    catalog: Arc<StructureCatalog>,
}

impl StructuralMatcher {
    pub fn new(catalog: Arc<StructureCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &StructureCatalog {
        &self.catalog
    }

    /// Similarity of one class to one catalog entry
    pub fn score(class: &ClassRecord, entry: &ReferenceStructure) -> i64 {
        let mut score = 0;

        if class.simple_name.to_lowercase() == entry.simple_name().to_lowercase() {
            score += 3;
        }

        if class.is_interface == entry.is_interface() {
            score += 1;
        }

        if let Some(extends) = entry.extends_name.as_deref() {
            let extends_simple = simple_name(extends);
            if class.extended_types.iter().any(|ext| ext.ends_with(extends_simple)) {
                score += 2;
            }
        }

        let implemented = entry
            .implements_list
            .iter()
            .map(|name| simple_name(name))
            .filter(|wanted| class.implemented_types.iter().any(|imp| imp.ends_with(wanted)))
            .count();
        score + implemented as i64
    }

    /// Highest-scoring entry; the first one wins ties
    pub fn best_match(&self, class: &ClassRecord) -> Option<StructureMatch<'_>> {
        let mut best: Option<StructureMatch<'_>> = None;
        for entry in self.catalog.entries() {
            let score = Self::score(class, entry);
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(StructureMatch { entry, score });
            }
        }
        best
    }

    /// Human-readable summary; never fails
    pub fn summarize(&self, class: &ClassRecord) -> String {
        if self.catalog.is_empty() {
            return NOT_AVAILABLE.to_string();
        }
        match self.best_match(class) {
            Some(m) if m.score >= MATCH_THRESHOLD => {
                format!("Resembles JDK's {}. {}", m.entry.class_name, m.entry.description)
            }
            _ => NO_MATCH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use proptest::prelude::*;

    fn entry(class_name: &str, kind: &str, description: &str) -> ReferenceStructure {
        ReferenceStructure {
            class_name: class_name.to_string(),
            extends_name: None,
            implements_list: Vec::new(),
            description: description.to_string(),
            kind: Some(kind.to_string()),
        }
    }

    fn matcher(entries: Vec<ReferenceStructure>) -> StructuralMatcher {
        StructuralMatcher::new(Arc::new(StructureCatalog::new(entries)))
    }

    #[test]
    fn test_empty_catalog_not_available() {
        let m = matcher(Vec::new());
        let class = ClassRecord::new("", "Anything", false);
        assert_eq!(m.summarize(&class), NOT_AVAILABLE);
        assert!(m.best_match(&class).is_none());
    }

    #[test]
    fn test_name_match_resembles() {
        let m = matcher(vec![entry("java.util.ArrayList", "class", "resizable array")]);
        let class = ClassRecord::new("com.example", "ArrayList", false);

        assert!(m.best_match(&class).unwrap().score >= MATCH_THRESHOLD);
        assert_snapshot!(m.summarize(&class), @"Resembles JDK's java.util.ArrayList. resizable array");
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let class = ClassRecord::new("", "arraylist", false);
        let score = StructuralMatcher::score(&class, &entry("java.util.ArrayList", "class", "x"));
        assert_eq!(score, 4);
    }

    #[test]
    fn test_name_match_folds_non_ascii_case() {
        let class = ClassRecord::new("de.shop", "ÄnderungsDienst", false);
        let score = StructuralMatcher::score(&class, &entry("de.ref.änderungsdienst", "class", "x"));
        assert_eq!(score, 4);

        let other = ClassRecord::new("", "ÄnderungsDienste", false);
        assert_eq!(StructuralMatcher::score(&other, &entry("de.ref.ÄnderungsDienst", "class", "x")), 1);
    }

    #[test]
    fn test_kind_agreement() {
        let iface = ClassRecord::new("", "Repo", true);
        assert_eq!(StructuralMatcher::score(&iface, &entry("java.util.List", "Interface", "")), 1);
        assert_eq!(StructuralMatcher::score(&iface, &entry("java.util.List", "class", "")), 0);

        let mut no_kind = entry("java.util.List", "", "");
        no_kind.kind = None;
        assert_eq!(StructuralMatcher::score(&ClassRecord::new("", "X", false), &no_kind), 1);
    }

    #[test]
    fn test_extends_suffix_match() {
        let mut reference = entry("java.util.ArrayList", "class", "");
        reference.extends_name = Some("java.util.AbstractList".to_string());

        let mut class = ClassRecord::new("", "MyList", false);
        class.extended_types = vec!["java.util.AbstractList".to_string()];
        assert_eq!(StructuralMatcher::score(&class, &reference), 3);

        class.extended_types = vec!["MyAbstractList".to_string()];
        assert_eq!(StructuralMatcher::score(&class, &reference), 3);

        class.extended_types = vec!["AbstractMap".to_string()];
        assert_eq!(StructuralMatcher::score(&class, &reference), 1);
    }

    #[test]
    fn test_implements_adds_per_entry() {
        let mut reference = entry("java.util.ArrayList", "class", "resizable array");
        reference.implements_list = vec![
            "java.util.List".to_string(),
            "java.util.RandomAccess".to_string(),
            "java.lang.Cloneable".to_string(),
        ];

        let mut class = ClassRecord::new("", "Buffer", false);
        class.implemented_types = vec!["List".to_string(), "RandomAccess".to_string()];

        // kind + two interfaces
        assert_eq!(StructuralMatcher::score(&class, &reference), 3);
        assert_eq!(
            matcher(vec![reference]).summarize(&class),
            "Resembles JDK's java.util.ArrayList. resizable array"
        );
    }

    #[test]
    fn test_weak_match_reports_no_match() {
        let m = matcher(vec![entry("java.util.HashMap", "class", "hash table")]);
        let class = ClassRecord::new("", "OrderService", false);
        assert_eq!(m.summarize(&class), NO_MATCH);
    }

    #[test]
    fn test_tie_keeps_first_entry() {
        let first = entry("java.util.ArrayList", "class", "first");
        let second = entry("java.util.ArrayList", "class", "second");
        let m = matcher(vec![first, second]);
        let class = ClassRecord::new("", "ArrayList", false);

        let best = m.best_match(&class).unwrap();
        assert_eq!(best.entry.description, "first");
        assert_eq!(m.summarize(&class), "Resembles JDK's java.util.ArrayList. first");
    }

    #[test]
    fn test_higher_score_replaces() {
        let weak = entry("java.util.AbstractList", "class", "weak");
        let strong = entry("java.util.LinkedList", "class", "strong");
        let m = matcher(vec![weak, strong]);
        let class = ClassRecord::new("", "LinkedList", false);
        assert_eq!(m.best_match(&class).unwrap().entry.description, "strong");
    }

    #[test]
    fn test_catalog_tolerates_unknown_fields() {
        let json = r#"[
            {"className": "java.util.ArrayList", "type": "class", "description": "resizable array",
             "since": "1.2", "implementsList": ["java.util.List"]},
            {"className": "java.lang.Runnable", "description": "task"}
        ]"#;
        let catalog = StructureCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].implements_list, vec!["java.util.List"]);
        assert!(catalog.entries()[1].kind.is_none());
        assert!(catalog.entries()[1].extends_name.is_none());
    }

    #[test]
    fn test_catalog_yaml() {
        let yaml = "- className: java.util.Deque\n  type: interface\n  description: double-ended queue\n";
        let catalog = StructureCatalog::from_yaml(yaml).unwrap();
        assert!(catalog.entries()[0].is_interface());
    }

    #[test]
    fn test_missing_catalog_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = StructureCatalog::load_or_empty(&dir.path().join("missing.json"));
        assert!(catalog.is_empty());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(StructureCatalog::load_or_empty(&bad).is_empty());
    }

    #[test]
    fn test_bundled_catalog_loads_once() {
        let a = StructureCatalog::bundled();
        let b = StructureCatalog::bundled();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!a.is_empty());
        assert!(a.entries().iter().any(|e| e.class_name == "java.util.ArrayList"));
    }

    proptest! {
        /// Summaries are always one of the three message shapes, whatever the record holds
        #[test]
        fn prop_summarize_is_total(
            name in "[A-Za-z]{0,12}",
            is_interface in any::<bool>(),
            extended in prop::collection::vec("[A-Za-z.]{0,16}", 0..3),
            implemented in prop::collection::vec("[A-Za-z.]{0,16}", 0..3),
            use_bundled in any::<bool>(),
        ) {
            let mut class = ClassRecord::new("", &name, is_interface);
            class.extended_types = extended;
            class.implemented_types = implemented;

            let catalog = if use_bundled { StructureCatalog::bundled() } else { Arc::new(StructureCatalog::default()) };
            let summary = StructuralMatcher::new(catalog).summarize(&class);
            prop_assert!(
                summary == NOT_AVAILABLE || summary == NO_MATCH || summary.starts_with("Resembles JDK's "),
                "unexpected summary: {}", summary
            );
        }
    }
}
