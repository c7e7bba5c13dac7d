//! Output formatting for analysis results.
//!
//! Three surfaces:
//! - Structured JSON report, always written: the machine contract other
//!   tooling consumes. Field names and nesting never change shape.
//! - Narrative markdown report, written outside CI mode only.
//! - Short stdout summary, printed on every run.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use colored::*;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::detect::{Finding, Severity};
use crate::stats::{Run, SeverityCounts};

// =============================================================================
// JSON report
// =============================================================================

/// Structured report. The key names are a compatibility surface for
/// downstream tooling.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub timestamp: String,
    #[serde(rename = "totalFiles")]
    pub total_files: usize,
    #[serde(rename = "filesWithIssues")]
    pub files_with_issues: usize,
    pub issues: Vec<JsonIssue>,
    pub summary: SeverityCounts,
    #[serde(rename = "fileStats")]
    pub file_stats: FileStats,
}

/// One issue in the structured report.
#[derive(Serialize, Deserialize)]
pub struct JsonIssue {
    #[serde(rename = "filePath")]
    pub file_path: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub severity: String,
    pub code: String,
}

/// Per-file severity counts, serialized as a JSON object keyed by path.
///
/// Kept as an ordered vector so the report is byte-identical for the
/// same run input: worst-offending files first.
pub struct FileStats(pub Vec<(String, SeverityCounts)>);

impl Serialize for FileStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (path, counts) in &self.0 {
            map.serialize_entry(path, counts)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FileStats {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FileStatsVisitor;

        impl<'de> Visitor<'de> for FileStatsVisitor {
            type Value = FileStats;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of file path to severity counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((path, counts)) = access.next_entry::<String, SeverityCounts>()? {
                    entries.push((path, counts));
                }
                Ok(FileStats(entries))
            }
        }

        deserializer.deserialize_map(FileStatsVisitor)
    }
}

fn finding_to_json(f: &Finding) -> JsonIssue {
    JsonIssue {
        file_path: f.path.clone(),
        line: f.line,
        column: f.column,
        message: f.message.clone(),
        severity: f.severity.to_string(),
        code: f.code.as_str().to_string(),
    }
}

/// Build the structured report from an assembled run.
pub fn build_json_report(run: &Run) -> JsonReport {
    JsonReport {
        timestamp: run.timestamp.clone(),
        total_files: run.statistics.total_units,
        files_with_issues: run.statistics.units_with_issues,
        issues: run.findings.iter().map(finding_to_json).collect(),
        summary: run.statistics.counts_by_severity,
        file_stats: FileStats(run.statistics.per_unit_counts.clone()),
    }
}

/// Write the structured report. A failure here is fatal for the run: a
/// missing report is indistinguishable from "never ran" downstream.
pub fn write_json<P: AsRef<Path>>(path: P, run: &Run) -> anyhow::Result<()> {
    let report = build_json_report(run);
    let json = serde_json::to_string_pretty(&report)?;
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path.as_ref(), json)?;
    Ok(())
}

// =============================================================================
// Narrative report
// =============================================================================

/// Fixed remediation recommendations, rendered at the end of the
/// narrative report.
const RECOMMENDATIONS: &[&str] = &[
    "Enable `\"strict\": true` (including `noImplicitAny`) in the compiler configuration.",
    "Replace `as` assertions with type guards or schema validation at data boundaries.",
    "Model optionality in the types instead of asserting non-null with `!`.",
    "Parse and validate external input explicitly rather than coercing it with `Number()`/`String()`/`Boolean()`.",
    "Enable `\"noUncheckedIndexedAccess\"` and handle `undefined` on indexed reads.",
];

/// Render the narrative markdown document.
pub fn render_narrative(run: &Run) -> String {
    let stats = &run.statistics;
    let mut doc = String::new();

    let _ = writeln!(doc, "# Type Safety Report");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "Generated: {}", run.timestamp);
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## Overview");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "- **Files analyzed:** {}", stats.total_units);
    let _ = writeln!(doc, "- **Files with issues:** {}", stats.units_with_issues);
    let _ = writeln!(doc, "- **Total issues:** {}", run.findings.len());
    let _ = writeln!(
        doc,
        "- **Errors:** {} | **Warnings:** {} | **Info:** {}",
        stats.counts_by_severity.errors,
        stats.counts_by_severity.warnings,
        stats.counts_by_severity.info
    );
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## Critical Issues");
    let _ = writeln!(doc);
    let errors: Vec<&Finding> = run
        .findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .collect();
    if errors.is_empty() {
        let _ = writeln!(doc, "No critical issues found.");
    } else {
        let _ = writeln!(doc, "| File | Line | Issue | Suggested Fix |");
        let _ = writeln!(doc, "|------|------|-------|---------------|");
        for f in errors {
            let _ = writeln!(
                doc,
                "| {} | {} | {} | {} |",
                f.path,
                f.line,
                f.message,
                f.suggested_fix.as_deref().unwrap_or("-")
            );
        }
    }
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## Common Issue Patterns");
    let _ = writeln!(doc);
    if stats.top_codes.is_empty() {
        let _ = writeln!(doc, "No issues found.");
    } else {
        let _ = writeln!(doc, "| Code | Occurrences |");
        let _ = writeln!(doc, "|------|-------------|");
        for (code, count) in &stats.top_codes {
            let _ = writeln!(doc, "| {} | {} |", code, count);
        }
    }
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## Files with Most Issues");
    let _ = writeln!(doc);
    if stats.per_unit_counts.is_empty() {
        let _ = writeln!(doc, "No files with issues.");
    } else {
        let _ = writeln!(doc, "| File | Errors | Warnings | Info | Total |");
        let _ = writeln!(doc, "|------|--------|----------|------|-------|");
        for (path, counts) in stats.per_unit_counts.iter().take(10) {
            let _ = writeln!(
                doc,
                "| {} | {} | {} | {} | {} |",
                path,
                counts.errors,
                counts.warnings,
                counts.info,
                counts.total()
            );
        }
    }
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## Recommendations");
    let _ = writeln!(doc);
    for (i, rec) in RECOMMENDATIONS.iter().enumerate() {
        let _ = writeln!(doc, "{}. {}", i + 1, rec);
    }

    doc
}

/// Write the narrative report (non-CI mode only; the caller decides).
pub fn write_narrative<P: AsRef<Path>>(path: P, run: &Run) -> anyhow::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path.as_ref(), render_narrative(run))?;
    Ok(())
}

// =============================================================================
// Stdout summary
// =============================================================================

/// Print the short human-readable block shown on every run.
pub fn print_summary(run: &Run) {
    let stats = &run.statistics;

    println!();
    print!("  ");
    print!("{}", "anycheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("  {}{}", "Files analyzed:    ".dimmed(), stats.total_units);
    println!(
        "  {}{}",
        "Files with issues: ".dimmed(),
        stats.units_with_issues
    );
    println!("  {}{}", "Total issues:      ".dimmed(), run.findings.len());
    println!();

    print!(
        "  {} {}",
        "errors:".red(),
        stats.counts_by_severity.errors
    );
    print!(
        "   {} {}",
        "warnings:".yellow(),
        stats.counts_by_severity.warnings
    );
    println!("   {} {}", "info:".blue(), stats.counts_by_severity.info);
    println!();

    if run.passed {
        println!("  {}", "✓ PASS".green());
    } else {
        println!(
            "  {} ({} error{})",
            "✗ FAIL".red(),
            stats.counts_by_severity.errors,
            if stats.counts_by_severity.errors == 1 {
                ""
            } else {
                "s"
            }
        );
    }
    println!();
}
