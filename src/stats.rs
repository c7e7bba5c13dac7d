//! Run aggregation: fold per-unit results into whole-run statistics.
//!
//! Aggregation is a pure function of its input sequence. Given the same
//! ordered list of unit results it produces identical statistics every
//! time; the only wall-clock field, the run timestamp, lives on `Run`
//! and is supplied by the driver.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::detect::{Finding, Severity, UnitFindings};

/// How many entries `top_codes` keeps.
pub const TOP_CODES_LIMIT: usize = 10;

/// Finding counts split by severity. Always carries all three, even at
/// zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => self.info += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.info
    }
}

/// Aggregate statistics over all units in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStatistics {
    /// Units considered, post-filter.
    pub total_units: usize,
    /// Units with a non-empty finding list.
    pub units_with_issues: usize,
    pub counts_by_severity: SeverityCounts,
    /// `(code, count)` descending by count, ties broken by code string,
    /// truncated to `TOP_CODES_LIMIT`.
    pub top_codes: Vec<(String, usize)>,
    /// Per-unit severity counts for units with at least one finding,
    /// descending by total, stable on ties.
    pub per_unit_counts: Vec<(String, SeverityCounts)>,
}

/// Fold an ordered sequence of unit results into run statistics.
pub fn aggregate(results: &[UnitFindings]) -> RunStatistics {
    let mut counts_by_severity = SeverityCounts::default();
    let mut code_counts: HashMap<&'static str, usize> = HashMap::new();
    let mut per_unit_counts: Vec<(String, SeverityCounts)> = Vec::new();
    let mut units_with_issues = 0;

    for unit in results {
        if !unit.has_findings() {
            continue;
        }
        units_with_issues += 1;

        let mut unit_counts = SeverityCounts::default();
        for finding in &unit.findings {
            counts_by_severity.record(finding.severity);
            unit_counts.record(finding.severity);
            *code_counts.entry(finding.code.as_str()).or_insert(0) += 1;
        }
        per_unit_counts.push((unit.path.clone(), unit_counts));
    }

    let mut top_codes: Vec<(String, usize)> = code_counts
        .into_iter()
        .map(|(code, count)| (code.to_string(), count))
        .collect();
    top_codes.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_codes.truncate(TOP_CODES_LIMIT);

    // Stable sort keeps original unit order on equal totals.
    per_unit_counts.sort_by(|a, b| b.1.total().cmp(&a.1.total()));

    RunStatistics {
        total_units: results.len(),
        units_with_issues,
        counts_by_severity,
        top_codes,
        per_unit_counts,
    }
}

/// The top-level result of one execution. Write-once: assembled after
/// all units are folded, then only serialized.
#[derive(Debug, Clone)]
pub struct Run {
    /// ISO-8601 run timestamp, supplied by the driver.
    pub timestamp: String,
    pub statistics: RunStatistics,
    /// Flat finding list, in unit processing order.
    pub findings: Vec<Finding>,
    /// Gate verdict: no error-severity findings.
    pub passed: bool,
}

impl Run {
    /// Assemble a run from completed unit results.
    pub fn assemble(timestamp: String, results: &[UnitFindings]) -> Self {
        let statistics = aggregate(results);
        let findings: Vec<Finding> = results
            .iter()
            .flat_map(|u| u.findings.iter().cloned())
            .collect();
        let passed = statistics.counts_by_severity.errors == 0;

        Self {
            timestamp,
            statistics,
            findings,
            passed,
        }
    }
}
