//! Syntax model produced by front-ends, and the [`FrontEnd`] trait.
//!
//! The model carries only what tag synthesis needs: the package clause,
//! import paths, and top-level declarations with their type expressions.
//! Every entity records a byte [`Span`]; the walker resolves spans to lines
//! and columns through the file's [`crate::text::LineIndex`].
//!
//! # Architecture
//!
//! Front-ends own parsing. They return a [`SourceFile`] or a [`ParseError`];
//! the engine never sees the concrete syntax tree, so a front-end may be built
//! on any parser as long as it lowers into these types.
//!
//! # Ordering
//!
//! `imports` and `decls` **must preserve source order**. The walker emits
//! tags in the order it visits them.

use std::fmt;

use crate::error::ParseError;
use crate::text::Span;

// ============================================================================
// Front-End Trait
// ============================================================================

/// Languages with a front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Go,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Go => write!(f, "Go"),
        }
    }
}

/// A parser that lowers file content into the syntax model.
pub trait FrontEnd {
    /// Language this front-end parses.
    fn language(&self) -> Language;

    /// Whether this front-end handles files at `path` (by extension).
    fn can_handle(&self, path: &str) -> bool;

    /// Parse one file. `path` is used only for error reporting.
    fn parse(&self, path: &str, source: &str) -> Result<SourceFile, ParseError>;
}

// ============================================================================
// File and Declarations
// ============================================================================

/// An identifier with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }
}

/// One parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Package clause identifier.
    pub package: Ident,
    /// Import specs in source order.
    pub imports: Vec<ImportSpec>,
    /// Top-level declarations in source order.
    pub decls: Vec<Decl>,
}

/// One import spec. `path` is the raw literal, quotes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub path: String,
    pub span: Span,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Func(FuncDecl),
    Type(TypeSpec),
    Value(ValueSpec),
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: Ident,
    /// Span of the whole declaration (starts at the `func` keyword).
    pub span: Span,
    /// Method receiver; `None` for free functions.
    pub receiver: Option<Receiver>,
    pub signature: Signature,
    /// Every plain identifier inside the body, in source order.
    pub body_identifiers: Vec<Ident>,
}

/// A method receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    /// Receiver variable, absent for `func (T) M()`.
    pub name: Option<Ident>,
    pub ty: TypeExpr,
}

/// Parameter and result lists of a function, method, or function type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

/// A parameter, result, or struct field: zero or more names sharing a type.
///
/// An empty `names` list is an unnamed parameter/result or an embedded
/// struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub names: Vec<Ident>,
    pub ty: TypeExpr,
    pub span: Span,
}

impl Field {
    /// A field with no names.
    pub fn unnamed(ty: TypeExpr, span: Span) -> Self {
        Field {
            names: Vec::new(),
            ty,
            span,
        }
    }
}

/// A type declaration, `type Name T` or `type Name = T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: Ident,
    pub ty: TypeExpr,
    /// `type Name = T` form.
    pub alias: bool,
}

/// Whether a value spec declares variables or constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Var,
    Const,
}

/// A `var` or `const` spec: names sharing one optional declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    pub kind: ValueKind,
    pub names: Vec<Ident>,
    /// Explicit type; `None` when inferred from initializers.
    pub ty: Option<TypeExpr>,
}

/// A member of an interface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceMember {
    /// A named method.
    Method { name: Ident, signature: Signature },
    /// An embedded interface or type-set element.
    Embedded { ty: TypeExpr, span: Span },
}

// ============================================================================
// Type Expressions
// ============================================================================

/// A type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A simple named type: `int`, `Foo`.
    Named(String),
    /// `*T`.
    Pointer(Box<TypeExpr>),
    /// `pkg.Name`.
    Qualified { package: Box<TypeExpr>, name: String },
    /// `[N]T`, or `[]T` when `len` is `None` (slices and non-literal lengths).
    Array {
        len: Option<String>,
        elem: Box<TypeExpr>,
    },
    /// `map[K]V`.
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// `chan T`, `<-chan T`, `chan<- T`.
    Chan(Box<TypeExpr>),
    /// `func(...) ...`.
    Func(Signature),
    /// `...T` in a variadic parameter.
    Ellipsis(Box<TypeExpr>),
    /// `interface { ... }`.
    Interface(Vec<InterfaceMember>),
    /// `struct { ... }`.
    Struct(Vec<Field>),
    /// `Base[A, B]`.
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    /// `A | B` in a type-set element.
    Union(Vec<TypeExpr>),
    /// `~T`, the underlying-type approximation in a type-set element.
    Approx(Box<TypeExpr>),
    /// `(T)`.
    Paren(Box<TypeExpr>),
    /// A node the front-end could not lower; carries the node kind.
    Unsupported(String),
}

impl TypeExpr {
    /// Shorthand for [`TypeExpr::Named`].
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    /// Shorthand for [`TypeExpr::Pointer`].
    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }

    /// Shorthand for a `pkg.Name` qualified type.
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            package: Box::new(TypeExpr::Named(package.into())),
            name: name.into(),
        }
    }
}
