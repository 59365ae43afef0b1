//! Byte ranges into a source document.

use std::ops::Range;

/// A half-open byte range `start..end` into the parsed source.
///
/// Spans are attached to diagnostic labels so the CLI can underline the
/// offending text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span from a byte range. A reversed range collapses to `start..start`.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the smallest span covering both spans
    pub fn union(&self, other: Span) -> Span {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Shifts the span right by `offset` bytes
    pub fn offset_by(&self, offset: usize) -> Span {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Locates the first occurrence of `needle` in `source`.
    ///
    /// Document formats deserialized through serde lose positions, so
    /// validation diagnostics find their value in the source text instead.
    pub fn locate(source: &str, needle: &str) -> Option<Span> {
        if needle.is_empty() {
            return None;
        }
        source
            .find(needle)
            .map(|start| Span::new(start..start + needle.len()))
    }

    /// Converts a 1-based line and column into a zero-width span.
    pub fn from_line_column(source: &str, line: usize, column: usize) -> Span {
        let line_start: usize = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        let offset = (line_start + column.saturating_sub(1)).min(source.len());
        Span::new(offset..offset)
    }
}
