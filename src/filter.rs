//! Unit filtering: decide which discovered units are eligible.
//!
//! Applied once at the driver level, before the engine runs. Excluded
//! units are not counted in the totals and produce no findings.

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::AnalyzerConfig;

/// Directory names that indicate third-party or generated artifacts.
pub const DEPENDENCY_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    "bower_components",
    "dist",
    "build",
    "out",
    "coverage",
];

/// Directory names that hold test suites.
const TEST_DIRS: &[&str] = &["__tests__", "__mocks__"];

lazy_static! {
    static ref TEST_FILE: Regex = Regex::new(r"\.(test|spec)\.(ts|tsx|mts|cts)$").unwrap();
}

/// Whether a path points into a dependency or build artifact tree.
pub fn is_dependency_artifact(path: &Path) -> bool {
    path.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        DEPENDENCY_DIRS.contains(&name.as_ref())
    })
}

/// Whether a path is a test unit of the analyzed codebase itself.
///
/// Excluded by default to avoid self-referential noise: test code
/// asserts on loose values on purpose.
pub fn is_test_unit(path: &Path) -> bool {
    if path.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        TEST_DIRS.contains(&name.as_ref())
    }) {
        return true;
    }
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| TEST_FILE.is_match(n))
        .unwrap_or(false)
}

/// Full eligibility decision for one discovered unit.
pub fn is_excluded(path: &Path, config: &AnalyzerConfig) -> bool {
    if is_dependency_artifact(path) {
        return true;
    }
    if !config.should_include_test_files() && is_test_unit(path) {
        return true;
    }
    config.is_path_excluded(path)
}
