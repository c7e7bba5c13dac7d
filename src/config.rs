//! Analyzer configuration.
//!
//! Configuration is optional: with no config file every knob takes its
//! default. A present-but-invalid file is a fatal run error, not a
//! silent fallback.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level analyzer configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub version: String,
    /// Glob patterns for paths to exclude from analysis
    /// (e.g., "**/generated/**", "**/migrations/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Whether to analyze test files as well (default: false).
    #[serde(default)]
    pub include_test_files: Option<bool>,
}

impl AnalyzerConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: AnalyzerConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Returns whether to include test files (defaults to false).
    pub fn should_include_test_files(&self) -> bool {
        self.include_test_files.unwrap_or(false)
    }

    /// Check if a path matches one of the configured exclude globs.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();
        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                if glob.compile_matcher().is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r#"
version: "1"
excluded_paths:
  - "**/generated/**"
include_test_files: true
"#;
        let config: AnalyzerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.version, "1");
        assert_eq!(config.excluded_paths.len(), 1);
        assert!(config.should_include_test_files());
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: AnalyzerConfig = serde_yaml::from_str("{}").unwrap();
        assert!(!config.should_include_test_files());
        assert!(config.excluded_paths.is_empty());
    }

    #[test]
    fn test_excluded_path_globs() {
        let config = AnalyzerConfig {
            excluded_paths: vec!["**/legacy/**".to_string(), "scripts/*.ts".to_string()],
            ..Default::default()
        };
        assert!(config.is_path_excluded(&PathBuf::from("src/legacy/old.ts")));
        assert!(config.is_path_excluded(&PathBuf::from("scripts/tool.ts")));
        assert!(!config.is_path_excluded(&PathBuf::from("src/app.ts")));
    }

    #[test]
    fn test_parse_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anycheck.yaml");
        std::fs::write(&path, "excluded_paths: [\"**/fixtures/**\"]\n").unwrap();

        let config = AnalyzerConfig::parse_file(&path).unwrap();
        assert_eq!(config.excluded_paths, vec!["**/fixtures/**"]);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anycheck.yaml");
        std::fs::write(&path, "excluded_paths: {not: [valid").unwrap();
        assert!(AnalyzerConfig::parse_file(&path).is_err());
    }
}
