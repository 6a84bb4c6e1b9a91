//! Core tag synthesis for tugtags.
//!
//! This crate turns a parsed source file into ctags records:
//! - Syntax model and the front-end trait a language parser implements
//! - Type-expression rendering
//! - Declaration classification (kinds, owners, attributes)
//! - Per-file walking, qualified-name expansion, receiver tracking
//! - Tag model and ctags/JSON-lines output
//! - Error types and exit codes
//!
//! Parsing itself lives in front-end crates (`tugtags-go`).

pub mod classify;
pub mod context;
pub mod error;
pub mod options;
pub mod output;
pub mod render;
pub mod syntax;
pub mod tag;
pub mod text;
pub mod walker;

pub use error::{ParseError, TagsError};
pub use options::{ExtraSet, FieldSet, TagOptions};
pub use output::{OutputFormat, OutputOptions, ProgramInfo};
pub use syntax::{FrontEnd, Language, SourceFile};
pub use tag::{Position, Tag, TagField, TagKind};
pub use walker::{TagBundle, Tagger};
