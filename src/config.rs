//! 分析配置
//!
//! Warning thresholds for classes and methods. Defaults match the report
//! format consumers expect; a YAML file may override any subset:
//!
//! ```yaml
//! longMethodLoc: 60
//! highComplexity: 10
//! ```

use std::path::Path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 警告阈值 (严格大于才触发)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thresholds {
    pub large_class_loc: usize,
    pub many_methods: usize,
    pub long_method_loc: usize,
    pub high_complexity: usize,
    pub many_parameters: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            large_class_loc: 500,
            many_methods: 25,
            long_method_loc: 40,
            high_complexity: 7,
            many_parameters: 5,
        }
    }
}

impl Thresholds {
    /// Parse thresholds from YAML text; absent keys keep their defaults
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("Invalid thresholds configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&text)
    }

    pub fn large_class_warning(&self) -> String {
        format!("Large class (LOC > {})", self.large_class_loc)
    }

    pub fn many_methods_warning(&self) -> String {
        format!("Class with many methods (>{})", self.many_methods)
    }

    pub fn long_method_warning(&self) -> String {
        format!("Long method (LOC > {})", self.long_method_loc)
    }

    pub fn high_complexity_warning(&self) -> String {
        format!("High complexity (CC > {})", self.high_complexity)
    }

    pub fn many_parameters_warning(&self) -> String {
        format!("Method with many parameters (>{})", self.many_parameters)
    }
}

/// Engine-wide settings
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    pub thresholds: Thresholds,
    /// Worker threads; None uses rayon's global pool
    pub jobs: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_messages() {
        let t = Thresholds::default();
        assert_eq!(t.large_class_warning(), "Large class (LOC > 500)");
        assert_eq!(t.many_methods_warning(), "Class with many methods (>25)");
        assert_eq!(t.long_method_warning(), "Long method (LOC > 40)");
        assert_eq!(t.high_complexity_warning(), "High complexity (CC > 7)");
        assert_eq!(t.many_parameters_warning(), "Method with many parameters (>5)");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let t = Thresholds::from_yaml("longMethodLoc: 60\nhighComplexity: 10\n").unwrap();
        assert_eq!(t.long_method_loc, 60);
        assert_eq!(t.high_complexity, 10);
        assert_eq!(t.large_class_loc, 500);
        assert_eq!(t.many_parameters, 5);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Thresholds::from_yaml("").unwrap(), Thresholds::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(Thresholds::from_yaml("manyMethods: [1, 2]").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thresholds.yml");
        std::fs::write(&path, "manyMethods: 10\n").unwrap();

        let t = Thresholds::load(&path).unwrap();
        assert_eq!(t.many_methods, 10);
        assert!(Thresholds::load(&dir.path().join("missing.yml")).is_err());
    }
}
