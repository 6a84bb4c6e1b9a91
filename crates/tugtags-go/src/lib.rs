//! Go front-end for tugtags.
//!
//! [`GoFrontEnd`] parses Go source with `tree-sitter-go` and lowers the
//! concrete syntax tree into the [`tugtags_core::syntax`] model. A tree that
//! contains any `ERROR` or `MISSING` node is rejected with a [`ParseError`]
//! pointing at the first one, so a file is either tagged completely or not
//! at all.

mod lower;

use std::path::Path;

use tracing::debug;
use tree_sitter::{Node, Parser};

use tugtags_core::{FrontEnd, Language, ParseError, SourceFile};

use crate::lower::Lowerer;

/// Tree-sitter based Go parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoFrontEnd;

impl GoFrontEnd {
    pub fn new() -> Self {
        GoFrontEnd
    }
}

impl FrontEnd for GoFrontEnd {
    fn language(&self) -> Language {
        Language::Go
    }

    fn can_handle(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .is_some_and(|ext| ext == "go")
    }

    fn parse(&self, path: &str, source: &str) -> Result<SourceFile, ParseError> {
        let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|err| ParseError::new(path, format!("cannot load Go grammar: {}", err)))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::new(path, "parser returned no tree"))?;

        let root = tree.root_node();
        if let Some(node) = first_error(root) {
            let point = node.start_position();
            let what = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                "syntax error".to_string()
            };
            debug!(path, row = point.row, "rejecting file with syntax errors");
            return Err(ParseError::new(
                path,
                format!("{}:{}: {}", point.row + 1, point.column + 1, what),
            ));
        }

        Lowerer::new(source)
            .source_file(root)
            .ok_or_else(|| ParseError::new(path, "1:1: expected package clause"))
    }
}

/// First `ERROR` or `MISSING` node in document order.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node
            .children(&mut cursor)
            .filter(|child| child.has_error() || child.is_missing())
            .collect();
        stack.extend(children.into_iter().rev());
    }
    Some(root)
}
