//! Tag generation options.
//!
//! Field and extra sets are written the ctags way: a run of flag letters,
//! each optionally preceded by `+` (enable) or `-` (disable). A sign applies
//! to every letter that follows it until the next sign; letters before any
//! sign are enabled.
//!
//! | Option | Letter | Effect |
//! |--------|--------|--------|
//! | fields | `l` | add `language:Go` to every tag |
//! | fields | `c` | add `column:<n>` when the front-end reports columns |
//! | extra | `q` | qualified-name duplicates (`pkg.Name`, `Type.Method`, ...) |
//! | extra | `r` | receiver attribute and receiver usage references |

use std::str::FromStr;

use crate::error::OptionsError;

/// Apply a `+x-y` flag string, calling `set(letter, enabled)` per letter.
fn apply_flags(
    s: &str,
    option: &'static str,
    mut set: impl FnMut(char, bool) -> bool,
) -> Result<(), OptionsError> {
    let mut enabled = true;
    for flag in s.chars() {
        match flag {
            '+' => enabled = true,
            '-' => enabled = false,
            c if c.is_whitespace() => {}
            c => {
                if !set(c, enabled) {
                    return Err(OptionsError::UnknownFlag { option, flag: c });
                }
            }
        }
    }
    Ok(())
}

/// Optional extension fields added to every tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSet {
    /// Emit `language:<name>`.
    pub language: bool,
    /// Emit `column:<n>`.
    pub column: bool,
}

impl FromStr for FieldSet {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = FieldSet::default();
        apply_flags(s, "fields", |flag, enabled| {
            match flag {
                'l' => fields.language = enabled,
                'c' => fields.column = enabled,
                _ => return false,
            }
            true
        })?;
        Ok(fields)
    }
}

/// Optional extra tag entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtraSet {
    /// Emit qualified-name duplicates.
    pub qualified: bool,
    /// Emit receiver names and receiver usage references in method bodies.
    pub receivers: bool,
}

impl FromStr for ExtraSet {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut extra = ExtraSet::default();
        apply_flags(s, "extra", |flag, enabled| {
            match flag {
                'q' => extra.qualified = enabled,
                'r' => extra.receivers = enabled,
                _ => return false,
            }
            true
        })?;
        Ok(extra)
    }
}

/// Options controlling which tags and attributes the walker emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagOptions {
    pub fields: FieldSet,
    pub extra: ExtraSet,
}

impl TagOptions {
    /// Options with qualified-name expansion enabled.
    pub fn with_extra_symbols() -> Self {
        TagOptions {
            extra: ExtraSet {
                qualified: true,
                ..ExtraSet::default()
            },
            ..TagOptions::default()
        }
    }
}
