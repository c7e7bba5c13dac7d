//! Core types for type-safety findings.

use serde::{Deserialize, Serialize};

/// Severity levels for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Whether this severity fails the CI gate.
    pub fn gates(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Stable taxonomy identifiers for the detector rules.
///
/// The string forms are a compatibility surface: they appear in reports
/// and are used as grouping keys, so they never change across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCode {
    #[serde(rename = "IMPLICIT-DYNAMIC")]
    ImplicitDynamic,
    #[serde(rename = "TYPE-ASSERTION")]
    TypeAssertion,
    #[serde(rename = "NON-NULL-ASSERTION")]
    NonNullAssertion,
    #[serde(rename = "UNSAFE-COERCION")]
    UnsafeCoercion,
    #[serde(rename = "MISSING-PARAM-TYPE")]
    MissingParamType,
    #[serde(rename = "MISSING-RETURN-TYPE")]
    MissingReturnType,
    #[serde(rename = "UNCHECKED-INDEX-ACCESS")]
    UncheckedIndexAccess,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::ImplicitDynamic => "IMPLICIT-DYNAMIC",
            IssueCode::TypeAssertion => "TYPE-ASSERTION",
            IssueCode::NonNullAssertion => "NON-NULL-ASSERTION",
            IssueCode::UnsafeCoercion => "UNSAFE-COERCION",
            IssueCode::MissingParamType => "MISSING-PARAM-TYPE",
            IssueCode::MissingReturnType => "MISSING-RETURN-TYPE",
            IssueCode::UncheckedIndexAccess => "UNCHECKED-INDEX-ACCESS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IMPLICIT-DYNAMIC" => Some(IssueCode::ImplicitDynamic),
            "TYPE-ASSERTION" => Some(IssueCode::TypeAssertion),
            "NON-NULL-ASSERTION" => Some(IssueCode::NonNullAssertion),
            "UNSAFE-COERCION" => Some(IssueCode::UnsafeCoercion),
            "MISSING-PARAM-TYPE" => Some(IssueCode::MissingParamType),
            "MISSING-RETURN-TYPE" => Some(IssueCode::MissingReturnType),
            "UNCHECKED-INDEX-ACCESS" => Some(IssueCode::UncheckedIndexAccess),
            _ => None,
        }
    }

    /// Fixed severity for this rule. Severities are per-rule constants,
    /// never computed from context.
    pub fn severity(&self) -> Severity {
        match self {
            IssueCode::UnsafeCoercion => Severity::Error,
            IssueCode::ImplicitDynamic
            | IssueCode::NonNullAssertion
            | IssueCode::MissingParamType
            | IssueCode::MissingReturnType => Severity::Warning,
            IssueCode::TypeAssertion | IssueCode::UncheckedIndexAccess => Severity::Info,
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected issue at a specific location.
///
/// Immutable once created. `(path, line, column, code)` is not unique:
/// the same rule can fire more than once on a line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Unit path, stable across runs, used as the grouping key.
    pub path: String,
    /// 1-based line of the offending node's start.
    pub line: usize,
    /// 1-based column of the offending node's start.
    pub column: usize,
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    /// Advisory remediation hint. Never executed, only rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
}

/// Ordered findings for one source unit. Produced once per unit per run,
/// never mutated after creation.
#[derive(Debug, Clone)]
pub struct UnitFindings {
    pub path: String,
    pub findings: Vec<Finding>,
}

impl UnitFindings {
    pub fn empty(path: &str) -> Self {
        Self {
            path: path.to_string(),
            findings: Vec::new(),
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}
