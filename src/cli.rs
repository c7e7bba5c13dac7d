//! Command-line interface for anycheck.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::*;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::AnalyzerConfig;
use crate::detect::UnitFindings;
use crate::engine::{AnalysisCause, Engine, UnitAnalysisError};
use crate::filter;
use crate::report;
use crate::stats::Run;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Default config file names to search for.
const DEFAULT_CONFIG_NAMES: &[&str] = &["anycheck.yaml", ".anycheck.yaml"];

/// Type safety gate for gradually-typed codebases.
///
/// Anycheck walks the syntax tree of a TypeScript codebase and flags
/// patterns that weaken type safety: implicit `any` bindings, type and
/// non-null assertions, unsafe primitive coercions, missing annotations,
/// and unchecked indexed access. It writes a machine-readable report,
/// an optional narrative report, and can gate CI on error findings.
#[derive(Parser)]
#[command(name = "anycheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to analyze (file or directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// CI mode: skip the narrative report and exit non-zero on errors
    #[arg(long)]
    pub ci: bool,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write the structured JSON report
    #[arg(short, long, default_value = "type-safety-report.json")]
    pub output: PathBuf,

    /// Where to write the narrative markdown report (non-CI mode)
    #[arg(long, default_value = "docs/TYPE_SAFETY_REPORT.md")]
    pub narrative: PathBuf,
}

/// A discovered source unit: absolute path plus the relative form used
/// as its stable identifier in findings and reports.
struct SourceUnit {
    abs: PathBuf,
    rel: String,
}

/// Discover a config file in the current directory, if any.
fn discover_config() -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Load the config: explicit path, discovered file, or defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<AnalyzerConfig> {
    match explicit {
        Some(path) => AnalyzerConfig::parse_file(path),
        None => match discover_config() {
            Some(path) => AnalyzerConfig::parse_file(path),
            None => Ok(AnalyzerConfig::default()),
        },
    }
}

fn relative_unit_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Collect eligible source units under a root, in a stable discovery
/// order (walkdir sorts by file name).
fn collect_units(root: &Path, config: &AnalyzerConfig) -> anyhow::Result<Vec<SourceUnit>> {
    let mut units = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // The walk root is always kept, whatever it is named.
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if e.file_type().is_dir() && name.starts_with('.') {
                return false;
            }
            if e.file_type().is_dir() && filter::DEPENDENCY_DIRS.contains(&name.as_ref()) {
                return false;
            }
            true
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if crate::syntax::language_for_path(path).is_none() {
            continue;
        }

        let rel = relative_unit_path(path, root);
        if filter::is_excluded(Path::new(&rel), config) {
            continue;
        }

        units.push(SourceUnit {
            abs: path.to_path_buf(),
            rel,
        });
    }

    Ok(units)
}

/// Read and analyze one unit.
fn analyze_unit(engine: &Engine, unit: &SourceUnit) -> Result<UnitFindings, UnitAnalysisError> {
    let source = fs::read(&unit.abs)
        .map_err(|e| UnitAnalysisError::new(&unit.rel, AnalysisCause::Io(e)))?;
    engine.analyze_source(&unit.rel, &source)
}

/// Run the analysis end to end.
///
/// Returns the process exit code; fatal faults surface as errors and are
/// handled once in `main`.
pub fn run(args: &Cli) -> anyhow::Result<i32> {
    let config = load_config(args.config.as_deref())?;

    let abs_path = args
        .path
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("cannot access path {:?}: {}", args.path, e))?;
    let metadata = fs::metadata(&abs_path)?;

    let units = if metadata.is_dir() {
        collect_units(&abs_path, &config)?
    } else {
        // An explicitly named file bypasses the eligibility filter.
        vec![SourceUnit {
            rel: relative_unit_path(&abs_path, &std::env::current_dir()?),
            abs: abs_path.clone(),
        }]
    };

    let engine = Engine::new();

    // Units are independent, so analysis fans out across workers; the
    // ordered collect hands results to the aggregator in discovery
    // order, keeping reports reproducible.
    let outcomes: Vec<Result<UnitFindings, UnitAnalysisError>> = units
        .par_iter()
        .map(|unit| analyze_unit(&engine, unit))
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(unit_findings) => results.push(unit_findings),
            // One bad unit never loses the rest of the batch.
            Err(e) => eprintln!("{} {}", "Warning:".yellow(), e),
        }
    }

    let timestamp = chrono::Utc::now().to_rfc3339();
    let run = Run::assemble(timestamp, &results);

    report::write_json(&args.output, &run)?;
    if !args.ci {
        report::write_narrative(&args.narrative, &run)?;
    }
    report::print_summary(&run);

    if args.ci && !run.passed {
        return Ok(EXIT_FAILURE);
    }
    Ok(EXIT_SUCCESS)
}
