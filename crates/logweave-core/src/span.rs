//! Byte-offset spans over a source file.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[offset, offset + len)` in a source file.
///
/// Spans are how tree nodes locate themselves in the original text: the
/// engine never sees the text itself, only these offsets supplied by the
/// external parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first character.
    pub offset: usize,
    /// Length of the span in bytes.
    pub len: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Byte offset one past the last character.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Returns true if `pos` lies within `[offset, end)`.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.offset <= pos && pos < self.end()
    }

    /// Returns true if `pos` lies strictly between the span's endpoints.
    ///
    /// Both endpoints are excluded, so a position on a statement boundary
    /// is not "inside" either neighbour.
    #[must_use]
    pub fn strictly_contains(&self, pos: usize) -> bool {
        self.offset < pos && pos < self.end()
    }

    /// Returns true if `other` lies entirely within this span.
    ///
    /// The comparison is endpoint-inclusive: a zero-length `other` sitting
    /// exactly on this span's end still counts as contained.
    #[must_use]
    pub fn contains_span(&self, other: Span) -> bool {
        self.offset <= other.offset && other.end() <= self.end()
    }

    /// Returns true if the two spans share at least one position.
    #[must_use]
    pub fn overlaps(&self, other: Span) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.offset, self.end())
    }
}
