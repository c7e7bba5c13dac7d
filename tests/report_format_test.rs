//! Tests for report file formats and mode exclusivity.
//!
//! The JSON report shape is a compatibility surface for downstream
//! tooling; these tests pin its key names and nesting.

use std::fs;
use std::path::Path;

use anycheck::cli::{self, Cli};

fn cli_for(root: &Path, out: &Path, ci: bool) -> Cli {
    Cli {
        path: root.to_path_buf(),
        ci,
        config: None,
        output: out.join("type-safety-report.json"),
        narrative: out.join("docs/TYPE_SAFETY_REPORT.md"),
    }
}

fn write_corpus(root: &Path) {
    fs::write(
        root.join("app.ts"),
        r#"
export function load(raw: string): number {
    const parsed = Number(raw);
    return parsed;
}
"#,
    )
    .unwrap();
    fs::write(
        root.join("view.ts"),
        "export const title = state.title!;\n",
    )
    .unwrap();
}

fn read_json(out: &Path) -> serde_json::Value {
    let content = fs::read_to_string(out.join("type-safety-report.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_structured_report_shape() {
    let corpus = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_corpus(corpus.path());

    cli::run(&cli_for(corpus.path(), out.path(), false)).unwrap();
    let report = read_json(out.path());

    let obj = report.as_object().unwrap();
    for key in [
        "timestamp",
        "totalFiles",
        "filesWithIssues",
        "issues",
        "summary",
        "fileStats",
    ] {
        assert!(obj.contains_key(key), "missing top-level key {}", key);
    }

    assert_eq!(report["totalFiles"], 2);
    assert_eq!(report["filesWithIssues"], 2);

    for issue in report["issues"].as_array().unwrap() {
        for key in ["filePath", "line", "column", "message", "severity", "code"] {
            assert!(issue.get(key).is_some(), "missing issue key {}", key);
        }
    }

    let summary = report["summary"].as_object().unwrap();
    for key in ["errors", "warnings", "info"] {
        assert!(summary.contains_key(key), "missing summary key {}", key);
    }
    assert_eq!(report["summary"]["errors"], 1);
    assert_eq!(report["summary"]["warnings"], 1);

    let file_stats = report["fileStats"].as_object().unwrap();
    assert!(file_stats.contains_key("app.ts"));
    assert!(file_stats.contains_key("view.ts"));
    assert_eq!(report["fileStats"]["app.ts"]["errors"], 1);
}

#[test]
fn test_timestamp_is_iso8601() {
    let corpus = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_corpus(corpus.path());

    cli::run(&cli_for(corpus.path(), out.path(), true)).unwrap();
    let report = read_json(out.path());

    let timestamp = report["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[test]
fn test_narrative_written_only_outside_ci_mode() {
    let corpus = tempfile::tempdir().unwrap();
    write_corpus(corpus.path());

    // CI mode: structured report only.
    let out_ci = tempfile::tempdir().unwrap();
    cli::run(&cli_for(corpus.path(), out_ci.path(), true)).unwrap();
    assert!(out_ci.path().join("type-safety-report.json").exists());
    assert!(!out_ci.path().join("docs/TYPE_SAFETY_REPORT.md").exists());

    // Default mode: both reports.
    let out_full = tempfile::tempdir().unwrap();
    cli::run(&cli_for(corpus.path(), out_full.path(), false)).unwrap();
    assert!(out_full.path().join("type-safety-report.json").exists());
    assert!(out_full.path().join("docs/TYPE_SAFETY_REPORT.md").exists());
}

#[test]
fn test_narrative_contents() {
    let corpus = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_corpus(corpus.path());

    cli::run(&cli_for(corpus.path(), out.path(), false)).unwrap();
    let doc = fs::read_to_string(out.path().join("docs/TYPE_SAFETY_REPORT.md")).unwrap();

    assert!(doc.contains("# Type Safety Report"));
    assert!(doc.contains("## Critical Issues"));
    assert!(doc.contains("UNSAFE-COERCION"));
    assert!(doc.contains("## Recommendations"));
    assert!(doc.contains("app.ts"));
}

#[test]
fn test_empty_corpus_still_reports() {
    let corpus = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::write(corpus.path().join("clean.ts"), "export const n: number = 1;\n").unwrap();

    cli::run(&cli_for(corpus.path(), out.path(), false)).unwrap();
    let report = read_json(out.path());

    assert_eq!(report["totalFiles"], 1);
    assert_eq!(report["filesWithIssues"], 0);
    assert_eq!(report["issues"].as_array().unwrap().len(), 0);
    assert_eq!(report["summary"]["errors"], 0);

    let doc = fs::read_to_string(out.path().join("docs/TYPE_SAFETY_REPORT.md")).unwrap();
    assert!(doc.contains("No critical issues found."));
}
