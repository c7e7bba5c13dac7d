//! Detection of unchecked indexed access.
//!
//! `obj[key]` with a computed key can produce `undefined` (or an
//! out-of-range element) that the type system pretends is there. The
//! rule only looks for a guard in the same expression: a `&&`/`in`
//! conjunction, a ternary, or optional chaining. Guards in surrounding
//! statements are out of reach for a single-node rule.

use tree_sitter::Node;

use super::{snippet, Finding, IssueCode, NodeCtx};

/// Index node kinds that are static, not computed.
fn is_static_index(kind: &str) -> bool {
    matches!(kind, "string" | "number")
}

/// Whether an enclosing expression (up to the statement boundary)
/// already checks existence or bounds.
fn guarded_in_expression(node: Node<'_>) -> bool {
    let mut current = node;
    while let Some(parent) = current.parent() {
        let kind = parent.kind();
        if kind.ends_with("statement") || kind == "statement_block" || kind == "program" {
            return false;
        }
        match kind {
            "ternary_expression" => return true,
            "binary_expression" => {
                if let Some(op) = parent.child_by_field_name("operator") {
                    if matches!(op.kind(), "&&" | "in") {
                        return true;
                    }
                }
            }
            _ => {}
        }
        current = parent;
    }
    false
}

/// Flag computed index access with no existence or bounds check in the
/// same expression.
pub fn detect_unchecked_index_access(ctx: &NodeCtx<'_>) -> Option<Finding> {
    let node = ctx.node;
    if node.kind() != "subscript_expression" {
        return None;
    }

    let index = node.child_by_field_name("index")?;
    if is_static_index(index.kind()) {
        return None;
    }

    if node.child_by_field_name("optional_chain").is_some() {
        return None;
    }

    if guarded_in_expression(node) {
        return None;
    }

    Some(ctx.finding(
        IssueCode::UncheckedIndexAccess,
        format!(
            "'{}' is read without an existence or bounds check",
            snippet(ctx.text())
        ),
        "guard with 'in', a length check, or optional chaining before indexing",
    ))
}

#[cfg(test)]
mod tests {
    use super::super::testutil::findings_with_code;
    use super::super::{IssueCode, Severity};

    #[test]
    fn test_computed_key_flagged() {
        let found = findings_with_code(
            "const v = lookup[key];",
            IssueCode::UncheckedIndexAccess,
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Info);
    }

    #[test]
    fn test_literal_keys_not_flagged() {
        for src in ["const v = obj[\"name\"];", "const v = arr[0];"] {
            let found = findings_with_code(src, IssueCode::UncheckedIndexAccess);
            assert!(found.is_empty(), "should not flag {}", src);
        }
    }

    #[test]
    fn test_in_guard_suppresses() {
        let found = findings_with_code(
            "const v = key in lookup && lookup[key];",
            IssueCode::UncheckedIndexAccess,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_length_guard_suppresses() {
        let found = findings_with_code(
            "const v = i < arr.length && arr[i];",
            IssueCode::UncheckedIndexAccess,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_ternary_guard_suppresses() {
        let found = findings_with_code(
            "const v = key in lookup ? lookup[key] : fallback;",
            IssueCode::UncheckedIndexAccess,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_optional_chain_suppresses() {
        let found = findings_with_code(
            "const v = lookup?.[key];",
            IssueCode::UncheckedIndexAccess,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_guard_in_previous_statement_is_out_of_reach() {
        // The rule only sees the current expression; a statement-level
        // guard does not suppress it.
        let src = r#"
if (key in lookup) {
    const v = lookup[key];
}
"#;
        let found = findings_with_code(src, IssueCode::UncheckedIndexAccess);
        assert_eq!(found.len(), 1);
    }
}
