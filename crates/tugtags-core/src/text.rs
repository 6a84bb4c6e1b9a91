//! Byte spans and line/column resolution.
//!
//! Front-ends report positions as byte [`Span`]s into the file content. The
//! walker resolves them through a per-file [`LineIndex`].
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - Columns count bytes, not characters
//! - Byte offsets are **0-indexed**
//! - Offsets past the end of the content resolve to the end of the content

// ============================================================================
// Span
// ============================================================================

/// A byte range in a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u64,
    /// End byte offset (exclusive).
    pub end: u64,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: u64, end: u64) -> Self {
        assert!(
            start <= end,
            "Span start ({}) must be <= end ({})",
            start,
            end
        );
        Span { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// ============================================================================
// Line Index
// ============================================================================

/// Line-start table for one file's content.
///
/// Built once per file and owned by that file's context; lookups are a binary
/// search over line starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<u64>,
    len: u64,
}

impl LineIndex {
    /// Build the index for `content`.
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in content.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i as u64 + 1);
            }
        }
        LineIndex {
            line_starts,
            len: content.len() as u64,
        }
    }

    /// Convert a byte offset to a 1-indexed `(line, col)` pair.
    pub fn position(&self, offset: u64) -> (u32, u32) {
        let offset = offset.min(self.len);
        let idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[idx] + 1;
        (idx as u32 + 1, col as u32)
    }
}
