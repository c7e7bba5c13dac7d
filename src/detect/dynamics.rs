//! Detection of implicit-dynamic bindings and missing annotations.
//!
//! Three rules share this module because they inspect the same
//! declaration shapes: parameters, class fields, property signatures and
//! function heads. An explicitly written `any` is a visible, auditable
//! decision and is not flagged; only silent dynamism is.

use tree_sitter::Node;

use super::{snippet, Finding, IssueCode, NodeCtx};

/// Declaration kinds that can carry a binding type annotation.
fn is_typed_binding(kind: &str) -> bool {
    matches!(
        kind,
        "required_parameter" | "optional_parameter" | "public_field_definition" | "property_signature"
    )
}

/// The name a binding declares, best-effort.
fn binding_name(ctx: &NodeCtx<'_>, node: Node<'_>) -> String {
    let name_node = node
        .child_by_field_name("pattern")
        .or_else(|| node.child_by_field_name("name"));
    match name_node {
        Some(n) => snippet(ctx.unit.node_text(n)),
        None => "<binding>".to_string(),
    }
}

/// Flag bindings whose inferred type is fully dynamic and whose
/// annotation was not explicitly written as the dynamic type.
pub fn detect_implicit_dynamic(ctx: &NodeCtx<'_>) -> Option<Finding> {
    let node = ctx.node;
    if !is_typed_binding(node.kind()) {
        return None;
    }

    // An annotation of any kind means nothing was silently inferred -
    // including a deliberate, visible `any`.
    if node.child_by_field_name("type").is_some() {
        return None;
    }

    if !ctx.oracle.is_inferred_dynamic(ctx.unit, node) {
        return None;
    }

    Some(ctx.finding(
        IssueCode::ImplicitDynamic,
        format!(
            "'{}' silently becomes 'any'; type checking is lost here",
            binding_name(ctx, node)
        ),
        "add an explicit type annotation, or 'unknown' if the type is truly open",
    ))
}

/// Flag function/method parameters with no explicit type annotation.
pub fn detect_missing_param_type(ctx: &NodeCtx<'_>) -> Option<Finding> {
    let node = ctx.node;
    if !matches!(node.kind(), "required_parameter" | "optional_parameter") {
        return None;
    }

    if node.child_by_field_name("type").is_some() {
        return None;
    }

    // `this` parameters take their type from the enclosing class.
    let pattern = node.child_by_field_name("pattern")?;
    if pattern.kind() == "this" {
        return None;
    }

    Some(ctx.finding(
        IssueCode::MissingParamType,
        format!(
            "parameter '{}' has no type annotation",
            binding_name(ctx, node)
        ),
        "annotate the parameter type",
    ))
}

/// Function-like node kinds that can declare a return type.
fn declares_return_type(kind: &str) -> bool {
    matches!(
        kind,
        "function_declaration"
            | "generator_function_declaration"
            | "function_expression"
            | "generator_function"
            | "arrow_function"
            | "method_definition"
    )
}

/// Flag functions and methods with no explicit return type annotation.
pub fn detect_missing_return_type(ctx: &NodeCtx<'_>) -> Option<Finding> {
    let node = ctx.node;
    if !declares_return_type(node.kind()) {
        return None;
    }

    if node.child_by_field_name("return_type").is_some() {
        return None;
    }

    let name = node
        .child_by_field_name("name")
        .map(|n| ctx.unit.node_text(n).to_string());

    if node.kind() == "method_definition" {
        // Constructors and set-accessors cannot carry a return type.
        if name.as_deref() == Some("constructor") {
            return None;
        }
        let mut cursor = node.walk();
        if node.children(&mut cursor).any(|c| c.kind() == "set") {
            return None;
        }
    }

    let message = match &name {
        Some(name) => format!("'{}' has no explicit return type", name),
        None => "function has no explicit return type".to_string(),
    };
    Some(ctx.finding(
        IssueCode::MissingReturnType,
        message,
        "declare the return type so refactors cannot silently widen it",
    ))
}
