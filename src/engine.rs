//! Analysis engine: one traversal per unit, full rule set per node.
//!
//! The engine is an explicit value constructed once by the driver and
//! passed by reference into per-unit calls. It holds no mutable state,
//! so units can be analyzed on independent workers with no locking.

use thiserror::Error;
use tree_sitter::Node;

use crate::detect::{NodeCtx, UnitFindings, DETECTORS};
use crate::oracle::{AnnotationOracle, TypeOracle};
use crate::syntax::{self, ParsedUnit};

/// Why a unit could not be analyzed at all.
#[derive(Debug, Error)]
pub enum AnalysisCause {
    #[error("cannot read source: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Unparseable(String),
}

/// A unit whose tree could not be obtained or traversed.
///
/// Recoverable at the batch level: the driver logs it and keeps going,
/// so one bad unit never loses the results of the rest.
#[derive(Debug, Error)]
#[error("cannot analyze {path}: {cause}")]
pub struct UnitAnalysisError {
    pub path: String,
    #[source]
    pub cause: AnalysisCause,
}

impl UnitAnalysisError {
    pub fn new(path: &str, cause: AnalysisCause) -> Self {
        Self {
            path: path.to_string(),
            cause,
        }
    }
}

/// The analysis engine: the fixed rule set behind a type oracle.
pub struct Engine {
    oracle: Box<dyn TypeOracle>,
}

impl Engine {
    /// Engine with the production annotation-based oracle.
    pub fn new() -> Self {
        Self::with_oracle(Box::new(AnnotationOracle))
    }

    /// Engine with a caller-supplied oracle (tests use a stub).
    pub fn with_oracle(oracle: Box<dyn TypeOracle>) -> Self {
        Self { oracle }
    }

    /// Parse and analyze one source unit.
    ///
    /// `path` is the unit's stable identifier and selects the grammar by
    /// extension; `source` is the raw file content.
    pub fn analyze_source(
        &self,
        path: &str,
        source: &[u8],
    ) -> Result<UnitFindings, UnitAnalysisError> {
        let unit = syntax::parse_unit(path, source).map_err(|e| {
            UnitAnalysisError::new(path, AnalysisCause::Unparseable(e.to_string()))
        })?;
        Ok(self.analyze_unit(&unit))
    }

    /// Run every detector at every node of an already-parsed unit.
    ///
    /// Read-only with respect to the tree; a rule that cannot evaluate a
    /// node contributes nothing. Cost is O(nodes x rules) per unit.
    pub fn analyze_unit(&self, unit: &ParsedUnit) -> UnitFindings {
        let mut findings = Vec::new();

        for node in unit.descendants() {
            self.dispatch(unit, node, &mut findings);
        }

        UnitFindings {
            path: unit.path.clone(),
            findings,
        }
    }

    fn dispatch(&self, unit: &ParsedUnit, node: Node<'_>, out: &mut Vec<crate::detect::Finding>) {
        let ctx = NodeCtx {
            unit,
            node,
            oracle: self.oracle.as_ref(),
        };
        for detector in DETECTORS {
            if let Some(finding) = detector(&ctx) {
                out.push(finding);
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
