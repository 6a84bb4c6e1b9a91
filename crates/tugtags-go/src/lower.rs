//! Lowering from the tree-sitter Go grammar into the tag syntax model.
//!
//! The walk is shallow: only top-level declarations and the type expressions
//! they mention are lowered. Function bodies are scanned for plain identifiers
//! and nothing else.
//!
//! ## Positions
//!
//! - Functions and methods: the `func` keyword
//! - Types, values, struct fields, interface methods: the declared name
//! - Embedded struct fields and interface elements: the start of the element
//! - Imports: the path literal

use tracing::trace;
use tree_sitter::Node;

use tugtags_core::syntax::{
    Decl, Field, FuncDecl, Ident, ImportSpec, InterfaceMember, Receiver, Signature, SourceFile,
    TypeExpr, TypeSpec, ValueKind, ValueSpec,
};
use tugtags_core::text::Span;

fn span(node: Node<'_>) -> Span {
    Span::new(node.start_byte() as u64, node.end_byte() as u64)
}

/// First named child that is not a comment.
fn first_named<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    found
}

/// Named children that are not comments.
fn named_children<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

/// Lowers one parsed file. Borrows the source the tree was parsed from.
pub(crate) struct Lowerer<'src> {
    source: &'src str,
}

impl<'src> Lowerer<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Lowerer { source }
    }

    fn text(&self, node: Node<'_>) -> &'src str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    fn ident(&self, node: Node<'_>) -> Ident {
        Ident::new(self.text(node), span(node))
    }

    /// Identifiers stored under `field`, skipping separators.
    fn idents(&self, node: Node<'_>, field: &str) -> Vec<Ident> {
        let mut cursor = node.walk();
        let idents = node
            .children_by_field_name(field, &mut cursor)
            .filter(|child| child.is_named())
            .map(|child| self.ident(child))
            .collect();
        idents
    }

    // ========================================================================
    // File
    // ========================================================================

    /// Lower a `source_file` root. `None` when there is no package clause.
    pub(crate) fn source_file(&self, root: Node<'_>) -> Option<SourceFile> {
        let mut package = None;
        let mut imports = Vec::new();
        let mut decls = Vec::new();

        for child in named_children(root) {
            match child.kind() {
                "package_clause" => {
                    if package.is_none() {
                        package = first_named(child).map(|name| self.ident(name));
                    }
                }
                "import_declaration" => self.imports(child, &mut imports),
                "function_declaration" | "method_declaration" => {
                    if let Some(func) = self.func(child) {
                        decls.push(Decl::Func(func));
                    }
                }
                "type_declaration" => self.type_specs(child, &mut decls),
                "var_declaration" => self.value_specs(child, ValueKind::Var, &mut decls),
                "const_declaration" => self.value_specs(child, ValueKind::Const, &mut decls),
                _ => {}
            }
        }

        Some(SourceFile {
            package: package?,
            imports,
            decls,
        })
    }

    fn imports(&self, node: Node<'_>, out: &mut Vec<ImportSpec>) {
        for child in named_children(node) {
            match child.kind() {
                "import_spec" => {
                    if let Some(path) = child.child_by_field_name("path") {
                        out.push(ImportSpec {
                            path: self.text(path).to_string(),
                            span: span(path),
                        });
                    }
                }
                "import_spec_list" => self.imports(child, out),
                _ => {}
            }
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn func(&self, node: Node<'_>) -> Option<FuncDecl> {
        let name = node.child_by_field_name("name")?;
        let receiver = node
            .child_by_field_name("receiver")
            .and_then(|list| self.receiver(list));
        let body_identifiers = node
            .child_by_field_name("body")
            .map(|body| self.identifiers(body))
            .unwrap_or_default();

        Some(FuncDecl {
            name: self.ident(name),
            span: span(node),
            receiver,
            signature: self.signature(node),
            body_identifiers,
        })
    }

    fn receiver(&self, list: Node<'_>) -> Option<Receiver> {
        let param = named_children(list)
            .into_iter()
            .find(|child| child.kind() == "parameter_declaration")?;
        let ty = param.child_by_field_name("type")?;
        Some(Receiver {
            name: self.idents(param, "name").into_iter().next(),
            ty: self.type_expr(ty),
        })
    }

    /// Every `identifier` under `body`, in source order.
    fn identifiers(&self, body: Node<'_>) -> Vec<Ident> {
        let mut found = Vec::new();
        let mut stack = vec![body];
        while let Some(node) = stack.pop() {
            if node.kind() == "identifier" {
                found.push(self.ident(node));
                continue;
            }
            stack.extend(named_children(node));
        }
        found.sort_by_key(|ident| ident.span.start);
        found
    }

    fn type_specs(&self, node: Node<'_>, out: &mut Vec<Decl>) {
        for child in named_children(node) {
            let alias = match child.kind() {
                "type_spec" => false,
                "type_alias" => true,
                _ => continue,
            };
            let (Some(name), Some(ty)) = (
                child.child_by_field_name("name"),
                child.child_by_field_name("type"),
            ) else {
                continue;
            };
            out.push(Decl::Type(TypeSpec {
                name: self.ident(name),
                ty: self.type_expr(ty),
                alias,
            }));
        }
    }

    fn value_specs(&self, node: Node<'_>, kind: ValueKind, out: &mut Vec<Decl>) {
        for child in named_children(node) {
            match child.kind() {
                "var_spec" | "const_spec" => out.push(Decl::Value(ValueSpec {
                    kind,
                    names: self.idents(child, "name"),
                    ty: child
                        .child_by_field_name("type")
                        .map(|ty| self.type_expr(ty)),
                })),
                "var_spec_list" => self.value_specs(child, kind, out),
                _ => {}
            }
        }
    }

    // ========================================================================
    // Signatures and Fields
    // ========================================================================

    /// Parameters and results of a function, method, method element, or
    /// function type.
    fn signature(&self, node: Node<'_>) -> Signature {
        let params = node
            .child_by_field_name("parameters")
            .map(|list| self.parameters(list))
            .unwrap_or_default();
        let results = match node.child_by_field_name("result") {
            None => Vec::new(),
            Some(list) if list.kind() == "parameter_list" => self.parameters(list),
            Some(ty) => vec![Field::unnamed(self.type_expr(ty), span(ty))],
        };
        Signature { params, results }
    }

    fn parameters(&self, list: Node<'_>) -> Vec<Field> {
        named_children(list)
            .into_iter()
            .filter_map(|child| match child.kind() {
                "parameter_declaration" => Some(self.field(child)),
                "variadic_parameter_declaration" => {
                    let mut field = self.field(child);
                    field.ty = TypeExpr::Ellipsis(Box::new(field.ty));
                    Some(field)
                }
                _ => None,
            })
            .collect()
    }

    fn field(&self, node: Node<'_>) -> Field {
        let ty = match node.child_by_field_name("type") {
            Some(ty) => self.type_expr(ty),
            None => TypeExpr::Unsupported(node.kind().to_string()),
        };
        Field {
            names: self.idents(node, "name"),
            ty,
            span: span(node),
        }
    }

    fn struct_fields(&self, node: Node<'_>) -> Vec<Field> {
        let Some(list) = named_children(node)
            .into_iter()
            .find(|child| child.kind() == "field_declaration_list")
        else {
            return Vec::new();
        };
        named_children(list)
            .into_iter()
            .filter(|child| child.kind() == "field_declaration")
            .map(|child| self.struct_field(child))
            .collect()
    }

    /// A struct field. An embedded `*T` keeps its `*` as an anonymous token
    /// next to the type, so it is restored here.
    fn struct_field(&self, node: Node<'_>) -> Field {
        let mut field = self.field(node);
        if field.names.is_empty() {
            let mut cursor = node.walk();
            let starred = node.children(&mut cursor).any(|child| child.kind() == "*");
            if starred {
                field.ty = TypeExpr::pointer(field.ty);
            }
        }
        field
    }

    fn interface_members(&self, node: Node<'_>) -> Vec<InterfaceMember> {
        named_children(node)
            .into_iter()
            .filter_map(|child| match child.kind() {
                "method_elem" | "method_spec" => {
                    let name = child.child_by_field_name("name")?;
                    Some(InterfaceMember::Method {
                        name: self.ident(name),
                        signature: self.signature(child),
                    })
                }
                "comment" => None,
                _ => Some(InterfaceMember::Embedded {
                    ty: self.type_elem(child),
                    span: span(child),
                }),
            })
            .collect()
    }

    // ========================================================================
    // Type Expressions
    // ========================================================================

    /// A type-set element: one type, or a union of several.
    fn type_elem(&self, node: Node<'_>) -> TypeExpr {
        match node.kind() {
            "type_elem" | "constraint_elem" | "interface_type_name" => {
                let mut types: Vec<TypeExpr> = named_children(node)
                    .into_iter()
                    .map(|child| self.type_expr(child))
                    .collect();
                match types.len() {
                    0 => TypeExpr::Unsupported(node.kind().to_string()),
                    1 => types.remove(0),
                    _ => TypeExpr::Union(types),
                }
            }
            _ => self.type_expr(node),
        }
    }

    fn type_expr(&self, node: Node<'_>) -> TypeExpr {
        let child = |field: &str| match node.child_by_field_name(field) {
            Some(child) => self.type_expr(child),
            None => TypeExpr::Unsupported(format!("{}.{}", node.kind(), field)),
        };
        let inner = || match first_named(node) {
            Some(child) => self.type_expr(child),
            None => TypeExpr::Unsupported(node.kind().to_string()),
        };

        match node.kind() {
            "type_identifier" | "identifier" | "package_identifier" | "field_identifier" => {
                TypeExpr::named(self.text(node))
            }
            "pointer_type" => TypeExpr::Pointer(Box::new(inner())),
            "qualified_type" => match (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                (Some(package), Some(name)) => {
                    TypeExpr::qualified(self.text(package), self.text(name))
                }
                _ => TypeExpr::Unsupported(node.kind().to_string()),
            },
            "array_type" => TypeExpr::Array {
                len: node
                    .child_by_field_name("length")
                    .filter(|len| len.kind() == "int_literal")
                    .map(|len| self.text(len).to_string()),
                elem: Box::new(child("element")),
            },
            "implicit_length_array_type" | "slice_type" => TypeExpr::Array {
                len: None,
                elem: Box::new(child("element")),
            },
            "map_type" => TypeExpr::Map {
                key: Box::new(child("key")),
                value: Box::new(child("value")),
            },
            "channel_type" => TypeExpr::Chan(Box::new(child("value"))),
            "function_type" => TypeExpr::Func(self.signature(node)),
            "interface_type" => TypeExpr::Interface(self.interface_members(node)),
            "struct_type" => TypeExpr::Struct(self.struct_fields(node)),
            "generic_type" => {
                let args = node
                    .child_by_field_name("type_arguments")
                    .map(|list| {
                        named_children(list)
                            .into_iter()
                            .map(|arg| self.type_elem(arg))
                            .collect()
                    })
                    .unwrap_or_default();
                TypeExpr::Generic {
                    base: Box::new(child("type")),
                    args,
                }
            }
            "type_elem" | "constraint_elem" => self.type_elem(node),
            "parenthesized_type" => TypeExpr::Paren(Box::new(inner())),
            "negated_type" => TypeExpr::Approx(Box::new(inner())),
            other => {
                trace!(kind = other, "unsupported type node");
                TypeExpr::Unsupported(other.to_string())
            }
        }
    }
}
