//! Per-file tagging context.
//!
//! A [`FileContext`] is created by the walker for one file and dropped when
//! that file is done. It owns the file's line index and resolves spans to
//! tag positions; nothing in it is shared across files.

use crate::options::TagOptions;
use crate::syntax::Language;
use crate::tag::{Position, Tag, TagField, TagKind};
use crate::text::{LineIndex, Span};

/// Everything the classifier needs to know about the file being tagged.
#[derive(Debug, Clone)]
pub struct FileContext {
    /// Path written into each tag's `file` column.
    pub path: String,
    /// Package name from the file's package clause.
    pub package: String,
    pub language: Language,
    pub options: TagOptions,
    lines: LineIndex,
}

impl FileContext {
    pub fn new(
        path: impl Into<String>,
        package: impl Into<String>,
        source: &str,
        language: Language,
        options: TagOptions,
    ) -> Self {
        FileContext {
            path: path.into(),
            package: package.into(),
            language,
            options,
            lines: LineIndex::new(source),
        }
    }

    /// Resolve a span's start to a tag position.
    pub fn position(&self, span: Span) -> Position {
        let (line, column) = self.lines.position(span.start);
        Position {
            line,
            column: Some(column),
        }
    }

    /// Create a tag at `span` with the file-wide extension fields applied.
    pub fn tag(&self, name: impl Into<String>, span: Span, kind: TagKind) -> Tag {
        let position = self.position(span);
        let mut tag = Tag::new(name, self.path.clone(), position, kind);
        if self.options.fields.language {
            tag.set(TagField::Language, self.language.to_string());
        }
        if self.options.fields.column {
            if let Some(column) = position.column {
                tag.set(TagField::Column, column.to_string());
            }
        }
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FieldSet;

    const SOURCE: &str = "package p\n\nfunc F() {}\n";

    #[test]
    fn tag_resolves_line() {
        let ctx = FileContext::new("a.go", "p", SOURCE, Language::Go, TagOptions::default());
        let tag = ctx.tag("F", Span::new(11, 22), TagKind::Function);
        assert_eq!(tag.position.line, 3);
        assert_eq!(tag.get(TagField::Line), Some("3"));
        assert_eq!(tag.get(TagField::Column), None);
        assert_eq!(tag.file, "a.go");
    }

    #[test]
    fn fields_add_language_and_column() {
        let options = TagOptions {
            fields: FieldSet {
                language: true,
                column: true,
            },
            ..TagOptions::default()
        };
        let ctx = FileContext::new("a.go", "p", SOURCE, Language::Go, options);
        let tag = ctx.tag("p", Span::new(8, 9), TagKind::Package);
        assert_eq!(tag.get(TagField::Language), Some("Go"));
        assert_eq!(tag.get(TagField::Column), Some("9"));
    }
}
