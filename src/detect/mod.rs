//! Detector rules for patterns that weaken type safety.
//!
//! Every rule is a pure function over one syntax node: it either yields a
//! single finding or nothing. Rules never fail a unit - a node a rule
//! cannot classify is simply not flagged. The engine dispatches the full
//! rule set at every node of a single traversal, so adding a rule here
//! never touches the traversal code.

mod assertions;
mod coercions;
mod dynamics;
mod indexing;
mod types;

pub use assertions::{detect_non_null_assertion, detect_type_assertion};
pub use coercions::detect_unsafe_coercion;
pub use dynamics::{detect_implicit_dynamic, detect_missing_param_type, detect_missing_return_type};
pub use indexing::detect_unchecked_index_access;
pub use types::{Finding, IssueCode, Severity, UnitFindings};

use tree_sitter::Node;

use crate::oracle::TypeOracle;
use crate::syntax::{ParsedUnit, Span};

/// Everything a rule may look at for one node.
pub struct NodeCtx<'a> {
    pub unit: &'a ParsedUnit,
    pub node: Node<'a>,
    pub oracle: &'a dyn TypeOracle,
}

impl<'a> NodeCtx<'a> {
    /// Text of the current node.
    pub fn text(&self) -> &str {
        self.unit.node_text(self.node)
    }

    /// Build a finding for the current node with the rule's fixed
    /// severity and position taken from the node's start.
    pub fn finding(&self, code: IssueCode, message: String, fix: &str) -> Finding {
        let span = Span::from_node(self.node);
        Finding {
            path: self.unit.path.clone(),
            line: span.line,
            column: span.column,
            severity: code.severity(),
            code,
            message,
            suggested_fix: Some(fix.to_string()),
        }
    }
}

/// A detector rule: one node in, zero or one finding out.
pub type DetectorFn = fn(&NodeCtx<'_>) -> Option<Finding>;

/// The full, fixed rule set, dispatched at every node.
pub const DETECTORS: &[DetectorFn] = &[
    detect_implicit_dynamic,
    detect_type_assertion,
    detect_non_null_assertion,
    detect_unsafe_coercion,
    detect_missing_param_type,
    detect_missing_return_type,
    detect_unchecked_index_access,
];

/// Shorten node text for use inside a message.
pub(crate) fn snippet(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > 40 {
        let head: String = flat.chars().take(40).collect();
        format!("{}...", head)
    } else {
        flat
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use crate::engine::Engine;

    /// Analyze a TypeScript snippet with the default engine and return
    /// the findings for one in-memory unit.
    pub fn findings_for(source: &str) -> Vec<Finding> {
        Engine::new()
            .analyze_source("unit.ts", source.as_bytes())
            .expect("fixture should parse")
            .findings
    }

    /// Findings filtered to one code.
    pub fn findings_with_code(source: &str, code: IssueCode) -> Vec<Finding> {
        findings_for(source)
            .into_iter()
            .filter(|f| f.code == code)
            .collect()
    }
}
