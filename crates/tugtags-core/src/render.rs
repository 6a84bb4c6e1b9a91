//! Type-expression rendering.
//!
//! Produces the canonical text form of a [`TypeExpr`]. Rendering is a pure
//! function of the tree. With `preserve_indirection` pointer markers are kept
//! (`*Foo`); without it they are dropped (`Foo`), which is the form used to
//! compare owner types.
//!
//! Shapes without a text form (anonymous structs, unsupported nodes) render
//! as the empty string instead of failing.

use tracing::trace;

use crate::syntax::{Field, Signature, TypeExpr};

/// Render a type expression.
pub fn render_type(expr: &TypeExpr, preserve_indirection: bool) -> String {
    match expr {
        TypeExpr::Named(name) => name.clone(),
        TypeExpr::Pointer(inner) => {
            if preserve_indirection {
                format!("*{}", render_type(inner, preserve_indirection))
            } else {
                render_type(inner, preserve_indirection)
            }
        }
        TypeExpr::Qualified { package, name } => {
            format!("{}.{}", render_type(package, preserve_indirection), name)
        }
        TypeExpr::Array {
            len: Some(len),
            elem,
        } => format!("[{}]{}", len, render_type(elem, preserve_indirection)),
        TypeExpr::Array { len: None, elem } => {
            format!("[]{}", render_type(elem, preserve_indirection))
        }
        TypeExpr::Map { key, value } => {
            format!("map[{}]{}", render_type(key, true), render_type(value, true))
        }
        TypeExpr::Chan(value) => format!("chan {}", render_type(value, preserve_indirection)),
        TypeExpr::Func(signature) => render_func_type(signature),
        TypeExpr::Ellipsis(elem) => format!("...{}", render_type(elem, preserve_indirection)),
        TypeExpr::Interface(_) => "interface{}".to_string(),
        TypeExpr::Generic { base, args } => {
            let args: Vec<String> = args
                .iter()
                .map(|arg| render_type(arg, preserve_indirection))
                .collect();
            format!(
                "{}[{}]",
                render_type(base, preserve_indirection),
                args.join(", ")
            )
        }
        TypeExpr::Union(types) => {
            let parts: Vec<String> = types
                .iter()
                .map(|ty| render_type(ty, preserve_indirection))
                .collect();
            // A union with an unrenderable term has no faithful text form.
            if parts.iter().any(String::is_empty) {
                return String::new();
            }
            parts.join(" | ")
        }
        TypeExpr::Approx(inner) => {
            let inner = render_type(inner, preserve_indirection);
            if inner.is_empty() {
                return String::new();
            }
            format!("~{}", inner)
        }
        TypeExpr::Paren(inner) => render_type(inner, preserve_indirection),
        TypeExpr::Struct(_) => {
            trace!("anonymous struct type renders empty");
            String::new()
        }
        TypeExpr::Unsupported(kind) => {
            trace!(kind = %kind, "no rendering for type expression");
            String::new()
        }
    }
}

/// Render a parameter list without the surrounding parentheses.
///
/// Names sharing a type are grouped: `a, b int, c *string`.
pub fn render_params(params: &[Field]) -> String {
    params
        .iter()
        .map(|param| {
            let ty = render_type(&param.ty, true);
            if param.names.is_empty() {
                ty
            } else {
                let names: Vec<&str> = param.names.iter().map(|n| n.name.as_str()).collect();
                format!("{} {}", names.join(", "), ty)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a result list as comma-joined types, one entry per declared name.
pub fn render_results(results: &[Field]) -> String {
    let mut types = Vec::new();
    for result in results {
        let ty = render_type(&result.ty, true);
        if result.names.is_empty() {
            types.push(ty);
        } else {
            types.extend(result.names.iter().map(|_| ty.clone()));
        }
    }
    types.join(", ")
}

fn render_func_type(signature: &Signature) -> String {
    let params = render_params(&signature.params);
    let results = render_results(&signature.results);
    if results.is_empty() {
        format!("func({})", params)
    } else {
        format!("func({}) {}", params, results)
    }
}
