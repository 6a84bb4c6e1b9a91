//! File walking and qualified-name expansion.
//!
//! [`walk_file`] visits a parsed file's package clause, imports and
//! declarations in source order and concatenates the classifier's tags.
//! When the `q` extra is enabled each declaration tag is followed by its
//! qualified-name duplicates (see [`qualified_names`]).
//!
//! [`Tagger`] ties a [`FrontEnd`] to the walker for whole files, and
//! [`TagBundle`] collects the results of many files, keeping parse failures
//! apart from tags so one bad file never stops a run.

use tracing::debug;

use crate::classify::{classify_decl, classify_imports, classify_package};
use crate::context::FileContext;
use crate::error::ParseError;
use crate::options::TagOptions;
use crate::syntax::{FrontEnd, SourceFile};
use crate::tag::{Tag, TagField, TagKind};

// ============================================================================
// Walking
// ============================================================================

/// All tags for one parsed file, in source order.
pub fn walk_file(file: &SourceFile, ctx: &FileContext) -> Vec<Tag> {
    let mut tags = vec![classify_package(file, ctx)];
    tags.extend(classify_imports(file, ctx));

    for decl in &file.decls {
        for tag in classify_decl(decl, ctx) {
            let extra = if ctx.options.extra.qualified {
                qualified_names(&tag, &ctx.package)
            } else {
                Vec::new()
            };
            tags.push(tag);
            tags.extend(extra);
        }
    }
    tags
}

/// Qualified-name duplicates of one tag.
///
/// Every declaration tag gets `<package>.<name>`. Members of a type (methods,
/// fields, embedded members, interface methods) also get `<owner>.<name>`
/// and `<package>.<owner>.<name>`, where the owner is `ctype` or `ntype`.
/// Package, import and reference tags have no duplicates.
pub fn qualified_names(tag: &Tag, package: &str) -> Vec<Tag> {
    if matches!(
        tag.kind,
        TagKind::Package | TagKind::Import | TagKind::Reference
    ) {
        return Vec::new();
    }

    let mut names = vec![format!("{}.{}", package, tag.name)];
    if tag.kind.is_member() {
        let owner = tag.get(TagField::Ctype).or_else(|| tag.get(TagField::Ntype));
        if let Some(owner) = owner {
            names.push(format!("{}.{}", owner, tag.name));
            names.push(format!("{}.{}.{}", package, owner, tag.name));
        }
    }
    names.into_iter().map(|name| tag.renamed(name)).collect()
}

// ============================================================================
// Tagger
// ============================================================================

/// Runs a front-end and the walker over whole files.
#[derive(Debug, Clone)]
pub struct Tagger<F> {
    front_end: F,
    options: TagOptions,
}

impl<F: FrontEnd> Tagger<F> {
    pub fn new(front_end: F, options: TagOptions) -> Self {
        Tagger { front_end, options }
    }

    pub fn front_end(&self) -> &F {
        &self.front_end
    }

    /// Tag one file's content.
    ///
    /// `path` identifies the file in errors; `display_path` is written into
    /// each tag's `file` column (it differs from `path` when tags are made
    /// relative to a base directory).
    pub fn tag_source(
        &self,
        path: &str,
        display_path: &str,
        source: &str,
    ) -> Result<Vec<Tag>, ParseError> {
        let file = self.front_end.parse(path, source)?;
        let ctx = FileContext::new(
            display_path,
            file.package.name.clone(),
            source,
            self.front_end.language(),
            self.options,
        );
        let tags = walk_file(&file, &ctx);
        debug!(path, tags = tags.len(), "tagged file");
        Ok(tags)
    }
}

// ============================================================================
// Bundle
// ============================================================================

/// Tags and failures accumulated across files.
#[derive(Debug, Clone, Default)]
pub struct TagBundle {
    pub tags: Vec<Tag>,
    /// Files skipped because they failed to parse, in input order.
    pub failed_files: Vec<ParseError>,
}

impl TagBundle {
    /// Record one file's outcome.
    pub fn add(&mut self, result: Result<Vec<Tag>, ParseError>) {
        match result {
            Ok(tags) => self.tags.extend(tags),
            Err(err) => {
                debug!(file = %err.file, "skipping file: {}", err.message);
                self.failed_files.push(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{
        Decl, Field, FuncDecl, Ident, ImportSpec, Language, Receiver, Signature, TypeExpr,
        TypeSpec, ValueKind, ValueSpec,
    };
    use crate::tag::Position;
    use crate::text::Span;

    const SOURCE: &str = "package P\nimport \"x\"\nconst C string = \"v\"\nfunc F() string {}\n";

    fn span_of(needle: &str) -> Span {
        let start = SOURCE.find(needle).unwrap() as u64;
        Span::new(start, start + needle.len() as u64)
    }

    fn example_file() -> SourceFile {
        SourceFile {
            package: Ident::new("P", span_of("P")),
            imports: vec![ImportSpec {
                path: "\"x\"".to_string(),
                span: span_of("\"x\""),
            }],
            decls: vec![
                Decl::Value(ValueSpec {
                    kind: ValueKind::Const,
                    names: vec![Ident::new("C", span_of("C string"))],
                    ty: Some(TypeExpr::named("string")),
                }),
                Decl::Func(FuncDecl {
                    name: Ident::new("F", span_of("F()")),
                    span: span_of("func F"),
                    receiver: None,
                    signature: Signature {
                        params: Vec::new(),
                        results: vec![Field::unnamed(
                            TypeExpr::named("string"),
                            span_of("string {"),
                        )],
                    },
                    body_identifiers: Vec::new(),
                }),
            ],
        }
    }

    fn ctx(options: TagOptions) -> FileContext {
        FileContext::new("example.go", "P", SOURCE, Language::Go, options)
    }

    #[test]
    fn example_file_in_source_order() {
        let tags = walk_file(&example_file(), &ctx(TagOptions::default()));
        let lines: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "P\texample.go\t1;\"\tp\tline:1",
                "x\texample.go\t2;\"\ti\tline:2",
                "C\texample.go\t3;\"\tc\taccess:public\tline:3\ttype:string",
                "F\texample.go\t4;\"\tf\taccess:public\tline:4\tsignature:()\ttype:string",
            ]
        );
    }

    #[test]
    fn expansion_adds_package_prefix_to_declarations() {
        let tags = walk_file(&example_file(), &ctx(TagOptions::with_extra_symbols()));
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["P", "x", "C", "P.C", "F", "P.F"]);
    }

    #[test]
    fn disabling_expansion_reproduces_base_set() {
        let base = walk_file(&example_file(), &ctx(TagOptions::default()));
        let expanded = walk_file(&example_file(), &ctx(TagOptions::with_extra_symbols()));
        let unexpanded: Vec<Tag> = expanded
            .into_iter()
            .filter(|t| !t.name.contains('.'))
            .collect();
        assert_eq!(unexpanded, base);
    }

    #[test]
    fn member_tags_get_owner_chain() {
        let method = Tag::new("F1", "a.go", Position::line(13), TagKind::Method)
            .with(TagField::Ctype, "Struct")
            .with(TagField::Signature, "()");
        let names: Vec<String> = qualified_names(&method, "Test")
            .into_iter()
            .map(|t| {
                assert_eq!(t.attributes(), method.attributes());
                assert_eq!(t.position, method.position);
                assert_eq!(t.kind, method.kind);
                t.name
            })
            .collect();
        assert_eq!(names, vec!["Test.F1", "Struct.F1", "Test.Struct.F1"]);
    }

    #[test]
    fn interface_members_use_ntype() {
        let tag = Tag::new("Read", "a.go", Position::line(4), TagKind::InterfaceMethod)
            .with(TagField::Ntype, "Reader");
        let names: Vec<String> = qualified_names(&tag, "io")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["io.Read", "Reader.Read", "io.Reader.Read"]);
    }

    #[test]
    fn constructors_only_get_package_prefix() {
        let tag = Tag::new("NewStruct", "a.go", Position::line(9), TagKind::Constructor)
            .with(TagField::Ctype, "Struct");
        let names: Vec<String> = qualified_names(&tag, "Test")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Test.NewStruct"]);
    }

    #[test]
    fn package_import_and_reference_tags_are_not_expanded() {
        for kind in [TagKind::Package, TagKind::Import, TagKind::Reference] {
            let tag = Tag::new("x", "a.go", Position::line(1), kind);
            assert!(qualified_names(&tag, "p").is_empty());
        }
    }

    #[test]
    fn struct_members_expand_in_walk() {
        let source = "package Test\ntype S struct {\n\tA int\n}\nfunc (s *S) M() {}\n";
        let find = |needle: &str| {
            let start = source.find(needle).unwrap() as u64;
            Span::new(start, start + needle.len() as u64)
        };
        let file = SourceFile {
            package: Ident::new("Test", find("Test")),
            imports: Vec::new(),
            decls: vec![
                Decl::Type(TypeSpec {
                    name: Ident::new("S", find("S struct")),
                    ty: TypeExpr::Struct(vec![Field {
                        names: vec![Ident::new("A", find("A int"))],
                        ty: TypeExpr::named("int"),
                        span: find("A int"),
                    }]),
                    alias: false,
                }),
                Decl::Func(FuncDecl {
                    name: Ident::new("M", find("M()")),
                    span: find("func (s"),
                    receiver: Some(Receiver {
                        name: Some(Ident::new("s", find("s *S"))),
                        ty: TypeExpr::pointer(TypeExpr::named("S")),
                    }),
                    signature: Signature::default(),
                    body_identifiers: Vec::new(),
                }),
            ],
        };
        let ctx = FileContext::new(
            "s.go",
            "Test",
            source,
            Language::Go,
            TagOptions::with_extra_symbols(),
        );
        let names: Vec<String> = walk_file(&file, &ctx).into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "Test", "S", "Test.S", "A", "Test.A", "S.A", "Test.S.A", "M", "Test.M", "S.M",
                "Test.S.M",
            ]
        );
    }

    #[test]
    fn bundle_keeps_failures_apart() {
        let mut bundle = TagBundle::default();
        bundle.add(Ok(vec![Tag::new(
            "p",
            "a.go",
            Position::line(1),
            TagKind::Package,
        )]));
        bundle.add(Err(ParseError::new("b.go", "1:1: expected package clause")));
        bundle.add(Ok(Vec::new()));

        assert_eq!(bundle.tags.len(), 1);
        assert_eq!(bundle.failed_files.len(), 1);
        assert_eq!(bundle.failed_files[0].file, "b.go");
    }
}
