//! Source location tracking for the lexer.
//!
//! A [`Span`] records both the byte range of a token in the original buffer
//! and the human-facing line/column where it starts. The byte range is what
//! the mock emitter uses to cut parameter text back out of the source.

use std::fmt;
use std::ops::Range;

/// A span of source code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the first byte.
    pub offset: u32,
    /// Length in bytes.
    pub len: u32,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub fn new(offset: u32, len: u32, line: u32, col: u32) -> Self {
        Self {
            offset,
            len,
            line,
            col,
        }
    }

    /// Create a zero-length span at a position.
    #[inline]
    pub fn point(offset: u32, line: u32, col: u32) -> Self {
        Self::new(offset, 0, line, col)
    }

    /// Whether this span is empty (zero length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The length of this span in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Byte offset one past the last byte.
    #[inline]
    pub fn end(&self) -> u32 {
        self.offset + self.len
    }

    /// The byte range covered by this span.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset as usize..self.end() as usize
    }

    /// Extend this span so it also covers `other`.
    ///
    /// The start position (line/column) is taken from whichever span begins
    /// first in the buffer.
    #[inline]
    pub fn to(self, other: Span) -> Span {
        let (first, _) = if other.offset < self.offset {
            (other, self)
        } else {
            (self, other)
        };
        let end = self.end().max(other.end());
        Span {
            offset: first.offset,
            len: end - first.offset,
            line: first.line,
            col: first.col,
        }
    }

    /// Slice the text covered by this span out of `source`.
    ///
    /// Returns an empty string when the span does not fit the buffer.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.range()).unwrap_or("")
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}(@{}+{})", self.line, self.col, self.offset, self.len)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
