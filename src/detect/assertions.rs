//! Detection of type assertions and non-null assertions.
//!
//! Both constructs tell the checker to trust the author instead of the
//! program: `expr as T` (or the legacy `<T>expr`) replaces the inferred
//! type, and `expr!` discards nullability with no runtime check.

use super::{snippet, Finding, IssueCode, NodeCtx};

/// Flag `expr as T` and `<T>expr` force-casts.
///
/// `as const` is not flagged: it narrows to a literal type rather than
/// casting to another one.
pub fn detect_type_assertion(ctx: &NodeCtx<'_>) -> Option<Finding> {
    let node = ctx.node;

    let target = match node.kind() {
        "as_expression" => {
            // `as const` has only the expression as a named child; the
            // `const` keyword is an anonymous token.
            if node.named_child_count() < 2 {
                return None;
            }
            node.named_child(1)?
        }
        "type_assertion" => node.named_child(0)?,
        _ => return None,
    };

    let target_text = snippet(ctx.unit.node_text(target).trim_start_matches('<').trim_end_matches('>'));
    Some(ctx.finding(
        IssueCode::TypeAssertion,
        format!("type assertion to '{}' bypasses the checker", target_text),
        "prefer a type guard or schema validation over an assertion",
    ))
}

/// Flag `expr!` non-null assertions.
pub fn detect_non_null_assertion(ctx: &NodeCtx<'_>) -> Option<Finding> {
    let node = ctx.node;
    if node.kind() != "non_null_expression" {
        return None;
    }

    let inner = node.named_child(0)?;
    Some(ctx.finding(
        IssueCode::NonNullAssertion,
        format!(
            "non-null assertion on '{}' asserts away nullability without a runtime check",
            snippet(ctx.unit.node_text(inner))
        ),
        "handle the null/undefined case explicitly or use optional chaining",
    ))
}
