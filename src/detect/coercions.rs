//! Detection of unsafe primitive coercions.
//!
//! `Number(x)`, `String(x)` and `Boolean(x)` normalize invalid input
//! instead of rejecting it: `Number("abc")` is `NaN`, `String(null)` is
//! `"null"`, `Boolean(" ")` is `true`. Each call site is flagged once.

use super::{snippet, Finding, IssueCode, NodeCtx};

/// Primitive-wrapper conversion functions.
const COERCION_FUNCTIONS: &[&str] = &["Number", "String", "Boolean"];

/// Flag calls through a primitive-wrapper conversion function.
pub fn detect_unsafe_coercion(ctx: &NodeCtx<'_>) -> Option<Finding> {
    let node = ctx.node;
    if node.kind() != "call_expression" {
        return None;
    }

    let callee = node.child_by_field_name("function")?;
    if callee.kind() != "identifier" {
        return None;
    }

    let name = ctx.unit.node_text(callee);
    if !COERCION_FUNCTIONS.contains(&name) {
        return None;
    }

    // A bare `Number()` produces a constant, not a coercion of input.
    let arguments = node.child_by_field_name("arguments")?;
    if arguments.named_child_count() == 0 {
        return None;
    }

    let arg = arguments.named_child(0)?;
    Some(ctx.finding(
        IssueCode::UnsafeCoercion,
        format!(
            "'{}({})' silently normalizes invalid input instead of rejecting it",
            name,
            snippet(ctx.unit.node_text(arg))
        ),
        "validate and parse the value explicitly before converting it",
    ))
}

#[cfg(test)]
mod tests {
    use super::super::testutil::findings_with_code;
    use super::super::{IssueCode, Severity};

    #[test]
    fn test_number_coercion_is_exactly_one_error() {
        let found = findings_with_code(
            "const n = Number(input.value);",
            IssueCode::UnsafeCoercion,
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Error);
        assert!(found[0].message.contains("Number"));
    }

    #[test]
    fn test_all_wrapper_functions_flagged() {
        for call in ["Number(x)", "String(x)", "Boolean(x)"] {
            let src = format!("const v = {};", call);
            let found = findings_with_code(&src, IssueCode::UnsafeCoercion);
            assert_eq!(found.len(), 1, "expected one finding for {}", call);
        }
    }

    #[test]
    fn test_surrounding_code_does_not_change_the_verdict() {
        let src = r#"
function handler(raw: string): number {
    if (raw.length > 0) {
        return Number(raw);
    }
    return 0;
}
"#;
        let found = findings_with_code(src, IssueCode::UnsafeCoercion);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Error);
    }

    #[test]
    fn test_argumentless_call_not_flagged() {
        let found = findings_with_code("const z = Number();", IssueCode::UnsafeCoercion);
        assert!(found.is_empty());
    }

    #[test]
    fn test_user_function_not_flagged() {
        let found = findings_with_code(
            "const n = toNumber(input.value);",
            IssueCode::UnsafeCoercion,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_method_call_not_flagged() {
        let found = findings_with_code(
            "const n = converters.Number(input);",
            IssueCode::UnsafeCoercion,
        );
        assert!(found.is_empty());
    }
}
