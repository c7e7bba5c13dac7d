//! Anycheck - type safety gate for gradually-typed codebases.
//!
//! Anycheck walks the parsed syntax tree of a TypeScript codebase and
//! flags patterns that weaken type safety: implicit `any` bindings, type
//! and non-null assertions, unsafe primitive coercions, missing
//! parameter/return annotations, and unchecked indexed access. It writes
//! machine-readable and narrative reports and can gate a CI pipeline on
//! error-severity findings.
//!
//! # Architecture
//!
//! - `syntax`: tree-sitter provider - parsed units, spans, traversal
//! - `oracle`: narrow type-inference capability the detectors query
//! - `detect`: detector rules and the finding taxonomy
//! - `engine`: one traversal per unit, full rule set per node
//! - `stats`: run aggregation and the gate verdict
//! - `filter`: unit eligibility (dependency artifacts, test files)
//! - `config`: optional YAML configuration
//! - `report`: JSON report, narrative report, stdout summary
//! - `cli`: driver - discovery, parallel analysis, report writing
//!
//! # Adding a New Rule
//!
//! Implement a `fn(&NodeCtx) -> Option<Finding>` in `src/detect/` and
//! add it to `DETECTORS`; the traversal never changes.

pub mod cli;
pub mod config;
pub mod detect;
pub mod engine;
pub mod filter;
pub mod oracle;
pub mod report;
pub mod stats;
pub mod syntax;

pub use config::AnalyzerConfig;
pub use detect::{Finding, IssueCode, Severity, UnitFindings};
pub use engine::{Engine, UnitAnalysisError};
pub use oracle::{AnnotationOracle, TypeOracle};
pub use stats::{aggregate, Run, RunStatistics, SeverityCounts};
pub use syntax::{ParsedUnit, Span};
