//! Tag records and their ctags serialization.
//!
//! A [`Tag`] is one symbol occurrence. Its ctags line is
//!
//! ```text
//! name<TAB>file<TAB>line;"<TAB>kind<TAB>key:value<TAB>key:value...
//! ```
//!
//! with extension attributes sorted by key, so a tag always serializes to the
//! same bytes whatever order its attributes were set in.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

// ============================================================================
// Tag Kind
// ============================================================================

/// Closed vocabulary of tag kinds.
///
/// Codes follow the ones Go tag consumers already understand. `Method` and
/// `InterfaceMethod` share `m`, and `Struct` and `Type` share `t`; they are
/// told apart by their `ctype`/`ntype` and `type` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagKind {
    Package,
    Import,
    Function,
    Method,
    Interface,
    Struct,
    Type,
    Variable,
    Constant,
    Field,
    Embedded,
    InterfaceMethod,
    Constructor,
    /// A usage of a method's receiver variable.
    Reference,
}

impl TagKind {
    /// Single-letter ctags kind code.
    pub fn code(self) -> &'static str {
        match self {
            TagKind::Package => "p",
            TagKind::Import => "i",
            TagKind::Function => "f",
            TagKind::Method => "m",
            TagKind::Interface => "n",
            TagKind::Struct => "t",
            TagKind::Type => "t",
            TagKind::Variable => "v",
            TagKind::Constant => "c",
            TagKind::Field => "w",
            TagKind::Embedded => "e",
            TagKind::InterfaceMethod => "m",
            TagKind::Constructor => "r",
            TagKind::Reference => "x",
        }
    }

    /// Long kind name, used in JSON output.
    pub fn name(self) -> &'static str {
        match self {
            TagKind::Package => "package",
            TagKind::Import => "import",
            TagKind::Function => "function",
            TagKind::Method => "method",
            TagKind::Interface => "interface",
            TagKind::Struct => "struct",
            TagKind::Type => "type",
            TagKind::Variable => "variable",
            TagKind::Constant => "constant",
            TagKind::Field => "field",
            TagKind::Embedded => "embedded",
            TagKind::InterfaceMethod => "interfaceMethod",
            TagKind::Constructor => "constructor",
            TagKind::Reference => "reference",
        }
    }

    /// Kinds that belong to an owning type through `ctype` or `ntype`.
    pub fn is_member(self) -> bool {
        matches!(
            self,
            TagKind::Method | TagKind::Field | TagKind::Embedded | TagKind::InterfaceMethod
        )
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TagKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ============================================================================
// Tag Field
// ============================================================================

/// Extension attribute keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagField {
    Access,
    Column,
    /// Owning concrete type.
    Ctype,
    Language,
    Line,
    /// Owning interface type.
    Ntype,
    /// Method receiver variable name.
    Receiver,
    Signature,
    Type,
}

impl TagField {
    /// Key as written in the tag line.
    pub fn as_str(self) -> &'static str {
        match self {
            TagField::Access => "access",
            TagField::Column => "column",
            TagField::Ctype => "ctype",
            TagField::Language => "language",
            TagField::Line => "line",
            TagField::Ntype => "ntype",
            TagField::Receiver => "receiver",
            TagField::Signature => "signature",
            TagField::Type => "type",
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tag
// ============================================================================

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub column: Option<u32>,
}

impl Position {
    /// A position with only a line.
    pub fn line(line: u32) -> Self {
        Position { line, column: None }
    }
}

/// One emitted symbol record.
///
/// The `line` attribute is derived from `position` at construction and cannot
/// be set independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub file: String,
    pub position: Position,
    pub kind: TagKind,
    attributes: BTreeMap<TagField, String>,
}

impl Tag {
    /// Create a tag with only the `line` attribute.
    pub fn new(
        name: impl Into<String>,
        file: impl Into<String>,
        position: Position,
        kind: TagKind,
    ) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(TagField::Line, position.line.to_string());
        Tag {
            name: name.into(),
            file: file.into(),
            position,
            kind,
            attributes,
        }
    }

    /// Set an attribute. Setting `line` is ignored.
    pub fn set(&mut self, field: TagField, value: impl Into<String>) {
        if field == TagField::Line {
            return;
        }
        self.attributes.insert(field, value.into());
    }

    /// Builder form of [`Tag::set`].
    pub fn with(mut self, field: TagField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Look up an attribute.
    pub fn get(&self, field: TagField) -> Option<&str> {
        self.attributes.get(&field).map(String::as_str)
    }

    /// Attributes sorted by key name.
    pub fn attributes(&self) -> Vec<(TagField, &str)> {
        let mut attributes: Vec<(TagField, &str)> = self
            .attributes
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
            .collect();
        attributes.sort_by_key(|(field, _)| field.as_str());
        attributes
    }

    /// A copy of this tag under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{};\"\t{}",
            self.name,
            self.file,
            self.position.line,
            self.kind.code()
        )?;
        for (field, value) in self.attributes() {
            write!(f, "\t{}:{}", field, value)?;
        }
        Ok(())
    }
}

/// JSON shape of a tag.
#[derive(Serialize)]
struct TagRecord<'a> {
    name: &'a str,
    file: &'a str,
    line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<u32>,
    kind: TagKind,
    code: &'static str,
    attributes: BTreeMap<&'static str, &'a str>,
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TagRecord {
            name: &self.name,
            file: &self.file,
            line: self.position.line,
            column: self.position.column,
            kind: self.kind,
            code: self.kind.code(),
            attributes: self
                .attributes
                .iter()
                .map(|(field, value)| (field.as_str(), value.as_str()))
                .collect(),
        }
        .serialize(serializer)
    }
}
