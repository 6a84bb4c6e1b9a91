//! Declaration classification.
//!
//! Each function here inspects one piece of a [`SourceFile`] and returns the
//! tags it produces. Classification decides the kind, the name, the owning
//! type (`ctype` for structs and receivers, `ntype` for interfaces) and the
//! attributes; it never looks at other declarations.
//!
//! # Constructors
//!
//! A free function is treated as a constructor when its name is `New`
//! followed by exactly the name of its first result type, with pointer
//! markers dropped: `NewFoo() *Foo` and `NewFoo() (Foo, error)` both qualify.
//! The match is purely lexical.

use tracing::debug;

use crate::context::FileContext;
use crate::render::{render_params, render_results, render_type};
use crate::syntax::{
    Decl, Field, FuncDecl, InterfaceMember, Signature, SourceFile, TypeExpr, TypeSpec, ValueKind,
    ValueSpec,
};
use crate::tag::{Tag, TagField, TagKind};

/// Identifier Go uses to discard a value.
const BLANK_IDENTIFIER: &str = "_";

/// Name prefix of constructor functions.
const CONSTRUCTOR_PREFIX: &str = "New";

// ============================================================================
// Helpers
// ============================================================================

/// `public` when the last `.`-separated segment starts uppercase.
///
/// Leading pointer markers are ignored so `*Foo` and `Foo` agree.
pub fn access_of(name: &str) -> &'static str {
    let segment = name.rsplit('.').next().unwrap_or(name);
    let segment = segment.trim_start_matches('*');
    match segment.chars().next() {
        Some(c) if c.is_uppercase() => "public",
        _ => "private",
    }
}

/// The type a function constructs, if its name marks it as a constructor.
///
/// Generic results are matched on their base type, as receivers are:
/// `NewStack[T any]() *Stack[T]` constructs `Stack`.
pub fn constructed_type(name: &str, results: &[Field]) -> Option<String> {
    let suffix = name.strip_prefix(CONSTRUCTOR_PREFIX)?;
    let first = results.first()?;
    let ty = render_type(type_owner(&first.ty), false);
    (!ty.is_empty() && ty == suffix).then_some(ty)
}

/// The declared type a receiver or constructor result belongs to:
/// `*Stack[T]` belongs to `Stack`.
fn type_owner(ty: &TypeExpr) -> &TypeExpr {
    match ty {
        TypeExpr::Pointer(inner) | TypeExpr::Paren(inner) => type_owner(inner),
        TypeExpr::Generic { base, .. } => type_owner(base),
        other => other,
    }
}

/// Set an attribute unless the rendered value is empty.
fn set_rendered(tag: &mut Tag, field: TagField, value: String) {
    if !value.is_empty() {
        tag.set(field, value);
    }
}

/// Set `signature` and `type` from a function signature.
fn set_signature(tag: &mut Tag, signature: &Signature) {
    tag.set(
        TagField::Signature,
        format!("({})", render_params(&signature.params)),
    );
    set_rendered(tag, TagField::Type, render_results(&signature.results));
}

// ============================================================================
// Package and Imports
// ============================================================================

/// The package clause tag.
pub fn classify_package(file: &SourceFile, ctx: &FileContext) -> Tag {
    ctx.tag(&file.package.name, file.package.span, TagKind::Package)
}

/// One tag per import spec, named by the unquoted path.
pub fn classify_imports(file: &SourceFile, ctx: &FileContext) -> Vec<Tag> {
    file.imports
        .iter()
        .filter_map(|import| {
            let path = import.path.trim_matches(|c| c == '"' || c == '`');
            if path.is_empty() {
                return None;
            }
            Some(ctx.tag(path, import.span, TagKind::Import))
        })
        .collect()
}

// ============================================================================
// Declarations
// ============================================================================

/// Tags for one top-level declaration.
pub fn classify_decl(decl: &Decl, ctx: &FileContext) -> Vec<Tag> {
    match decl {
        Decl::Func(func) => classify_function(func, ctx),
        Decl::Type(spec) => classify_type(spec, ctx),
        Decl::Value(spec) => classify_values(spec, ctx),
    }
}

/// A function, method, or constructor, plus receiver references when enabled.
pub fn classify_function(func: &FuncDecl, ctx: &FileContext) -> Vec<Tag> {
    let mut tag = ctx.tag(&func.name.name, func.span, TagKind::Function);
    tag.set(TagField::Access, access_of(&func.name.name));
    set_signature(&mut tag, &func.signature);

    let Some(receiver) = &func.receiver else {
        if let Some(ty) = constructed_type(&func.name.name, &func.signature.results) {
            tag.kind = TagKind::Constructor;
            tag.set(TagField::Ctype, ty);
        }
        return vec![tag];
    };

    tag.kind = TagKind::Method;
    let ctype = render_type(type_owner(&receiver.ty), false);
    set_rendered(&mut tag, TagField::Ctype, ctype.clone());

    let receiver_name = receiver
        .name
        .as_ref()
        .map(|ident| ident.name.as_str())
        .filter(|name| *name != BLANK_IDENTIFIER);
    let (true, Some(receiver_name)) = (ctx.options.extra.receivers, receiver_name) else {
        return vec![tag];
    };

    tag.set(TagField::Receiver, receiver_name);
    let mut tags = vec![tag];
    for ident in func
        .body_identifiers
        .iter()
        .filter(|ident| ident.name == receiver_name)
    {
        let mut reference = ctx.tag(&ident.name, ident.span, TagKind::Reference);
        set_rendered(&mut reference, TagField::Ctype, ctype.clone());
        tags.push(reference);
    }
    tags
}

/// A type tag followed by its field or member tags.
pub fn classify_type(spec: &TypeSpec, ctx: &FileContext) -> Vec<Tag> {
    let name = &spec.name.name;
    let mut tag = ctx.tag(name, spec.name.span, TagKind::Type);
    tag.set(TagField::Access, access_of(name));

    match &spec.ty {
        TypeExpr::Struct(fields) if !spec.alias => {
            tag.kind = TagKind::Struct;
            tag.set(TagField::Type, "struct");
            let mut tags = vec![tag];
            tags.extend(classify_fields(name, fields, ctx));
            tags
        }
        TypeExpr::Interface(members) if !spec.alias => {
            tag.kind = TagKind::Interface;
            tag.set(TagField::Type, "interface");
            let mut tags = vec![tag];
            tags.extend(classify_interface_members(name, members, ctx));
            tags
        }
        other => {
            set_rendered(&mut tag, TagField::Type, render_type(other, true));
            vec![tag]
        }
    }
}

/// Struct fields: one tag per name, or one embedded tag per unnamed field.
pub fn classify_fields(owner: &str, fields: &[Field], ctx: &FileContext) -> Vec<Tag> {
    let mut tags = Vec::new();
    for field in fields {
        let ty = render_type(&field.ty, true);

        if field.names.is_empty() {
            if ty.is_empty() {
                debug!(owner, "skipping embedded field with unrenderable type");
                continue;
            }
            let mut tag = ctx.tag(&ty, field.span, TagKind::Embedded);
            tag.set(TagField::Access, access_of(&ty));
            tag.set(TagField::Ctype, owner);
            tag.set(TagField::Type, ty);
            tags.push(tag);
            continue;
        }

        for name in &field.names {
            let mut tag = ctx.tag(&name.name, name.span, TagKind::Field);
            tag.set(TagField::Access, access_of(&name.name));
            tag.set(TagField::Ctype, owner);
            set_rendered(&mut tag, TagField::Type, ty.clone());
            tags.push(tag);
        }
    }
    tags
}

/// Interface members: methods and embedded interfaces.
pub fn classify_interface_members(
    owner: &str,
    members: &[InterfaceMember],
    ctx: &FileContext,
) -> Vec<Tag> {
    let mut tags = Vec::new();
    for member in members {
        match member {
            InterfaceMember::Method { name, signature } => {
                let mut tag = ctx.tag(&name.name, name.span, TagKind::InterfaceMethod);
                tag.set(TagField::Access, access_of(&name.name));
                tag.set(TagField::Ntype, owner);
                set_signature(&mut tag, signature);
                tags.push(tag);
            }
            InterfaceMember::Embedded { ty, span } => {
                let name = render_type(ty, true);
                if name.is_empty() {
                    debug!(owner, "skipping embedded interface with unrenderable type");
                    continue;
                }
                let mut tag = ctx.tag(&name, *span, TagKind::Embedded);
                tag.set(TagField::Access, access_of(&name));
                tag.set(TagField::Ntype, owner);
                tags.push(tag);
            }
        }
    }
    tags
}

/// Variables or constants: one tag per non-blank name.
pub fn classify_values(spec: &ValueSpec, ctx: &FileContext) -> Vec<Tag> {
    let kind = match spec.kind {
        ValueKind::Var => TagKind::Variable,
        ValueKind::Const => TagKind::Constant,
    };
    let ty = spec.ty.as_ref().map(|ty| render_type(ty, true));

    spec.names
        .iter()
        .filter(|name| name.name != BLANK_IDENTIFIER)
        .map(|name| {
            let mut tag = ctx.tag(&name.name, name.span, kind);
            tag.set(TagField::Access, access_of(&name.name));
            if let Some(ty) = &ty {
                set_rendered(&mut tag, TagField::Type, ty.clone());
            }
            tag
        })
        .collect()
}
