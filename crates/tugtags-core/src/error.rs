//! Error types and exit codes for tugtags.
//!
//! ## Error Kinds
//!
//! - [`ParseError`]: one input file is not syntactically valid. Recoverable at
//!   file granularity: the file is skipped and the run continues.
//! - [`OptionsError`]: a `--fields`/`--extra` flag string is malformed.
//! - [`TagsError`]: the unified error for the CLI, mapped to an exit code via
//!   [`OutputErrorCode`].
//!
//! Unrecognized type-expression shapes are not errors; the renderer yields an
//! empty string for them (see [`crate::render`]).
//!
//! ## Exit Codes
//!
//! - `2`: Invalid arguments (bad input from caller)
//! - `3`: Resolution errors (input list or directory cannot be read)
//! - `10`: Internal errors (bugs, unexpected state)

use std::fmt;
use std::io;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Process exit codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad flags, no input files).
    InvalidArguments = 2,
    /// Resolution errors (file list or directory not readable).
    ResolutionError = 3,
    /// Internal errors (bugs, unexpected state, output sink failures).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Parse Error
// ============================================================================

/// A source file could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}: {message}")]
pub struct ParseError {
    /// Path of the file as given to the front-end.
    pub file: String,
    /// Human-readable reason, usually with a `line:col` location.
    pub message: String,
}

impl ParseError {
    /// Create a parse error for `file`.
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        ParseError {
            file: file.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Options Error
// ============================================================================

/// A field or extra flag string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// A flag letter that the option does not know.
    #[error("unknown {option} flag '{flag}'")]
    UnknownFlag { option: &'static str, flag: char },
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
#[derive(Debug, Error)]
pub enum TagsError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// An input path does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// An input list or directory could not be read.
    #[error("cannot read {path}: {message}")]
    Unreadable { path: String, message: String },

    /// An exclusion pattern is not a valid glob.
    #[error("invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Malformed field/extra flags.
    #[error("invalid arguments: {0}")]
    Options(#[from] OptionsError),

    /// IO failure while assembling the file list or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl TagsError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        TagsError::InvalidArguments {
            message: message.into(),
        }
    }
}

impl From<&TagsError> for OutputErrorCode {
    fn from(err: &TagsError) -> Self {
        match err {
            TagsError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            TagsError::InvalidPattern { .. } => OutputErrorCode::InvalidArguments,
            TagsError::Options(_) => OutputErrorCode::InvalidArguments,
            TagsError::FileNotFound { .. } => OutputErrorCode::ResolutionError,
            TagsError::Unreadable { .. } => OutputErrorCode::ResolutionError,
            TagsError::Io(_) => OutputErrorCode::InternalError,
        }
    }
}

impl From<TagsError> for OutputErrorCode {
    fn from(err: TagsError) -> Self {
        OutputErrorCode::from(&err)
    }
}
