//! Byte-offset spans and refactor selections.
//!
//! All offsets are zero-based byte offsets into the current file text.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[pos, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRange {
    pub pos: u32,
    pub end: u32,
}

impl TextRange {
    #[inline]
    pub const fn new(pos: u32, end: u32) -> Self {
        TextRange { pos, end }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.pos)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.pos
    }

    /// True if `other` lies entirely within this range.
    #[inline]
    pub const fn contains_range(&self, other: TextRange) -> bool {
        self.pos <= other.pos && other.end <= self.end
    }
}

/// The span of a single text change: `start` plus `length` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: u32,
    pub length: u32,
}

impl TextSpan {
    #[inline]
    pub const fn new(start: u32, length: u32) -> Self {
        TextSpan { start, length }
    }

    /// Zero-length span at `start` (an insertion point).
    #[inline]
    pub const fn at(start: u32) -> Self {
        TextSpan { start, length: 0 }
    }

    #[inline]
    pub const fn from_bounds(start: u32, end: u32) -> Self {
        TextSpan {
            start,
            length: end.saturating_sub(start),
        }
    }

    #[inline]
    pub const fn end(&self) -> u32 {
        self.start + self.length
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// True if the two spans share at least one byte.
    pub const fn overlaps(&self, other: &TextSpan) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

impl From<TextRange> for TextSpan {
    fn from(range: TextRange) -> Self {
        TextSpan::from_bounds(range.pos, range.end)
    }
}

/// A refactor location: either a caret offset or a selected range.
///
/// Deserializes from either a bare number or `{ "pos": .., "end": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionOrRange {
    Position(u32),
    Range(TextRange),
}

impl PositionOrRange {
    /// The offset used to resolve the node under the caret.
    #[inline]
    pub const fn start(&self) -> u32 {
        match self {
            PositionOrRange::Position(pos) => *pos,
            PositionOrRange::Range(range) => range.pos,
        }
    }

    #[inline]
    pub const fn is_range(&self) -> bool {
        matches!(self, PositionOrRange::Range(_))
    }

    /// The selected range, if this is a range selection.
    #[inline]
    pub const fn range(&self) -> Option<TextRange> {
        match self {
            PositionOrRange::Position(_) => None,
            PositionOrRange::Range(range) => Some(*range),
        }
    }

    /// Normalise into a span; a bare position becomes a zero-length span.
    pub const fn to_span(&self) -> TextSpan {
        match self {
            PositionOrRange::Position(pos) => TextSpan::at(*pos),
            PositionOrRange::Range(range) => TextSpan::from_bounds(range.pos, range.end),
        }
    }
}

impl From<u32> for PositionOrRange {
    fn from(pos: u32) -> Self {
        PositionOrRange::Position(pos)
    }
}

impl From<TextRange> for PositionOrRange {
    fn from(range: TextRange) -> Self {
        PositionOrRange::Range(range)
    }
}

#[cfg(test)]
mod span_tests {
    use super::*;

    #[test]
    fn position_normalises_to_empty_span() {
        let por = PositionOrRange::Position(12);
        assert_eq!(por.to_span(), TextSpan::new(12, 0));
        assert!(por.to_span().is_empty());
        assert_eq!(por.start(), 12);
        assert!(por.range().is_none());
    }

    #[test]
    fn range_normalises_to_length() {
        let por = PositionOrRange::Range(TextRange::new(4, 9));
        assert_eq!(por.to_span(), TextSpan::new(4, 5));
        assert_eq!(por.start(), 4);
        assert!(por.is_range());
    }

    #[test]
    fn deserializes_from_number_or_object() {
        let pos: PositionOrRange = serde_json::from_str("10").unwrap();
        assert_eq!(pos, PositionOrRange::Position(10));

        let range: PositionOrRange = serde_json::from_str(r#"{"pos":4,"end":9}"#).unwrap();
        assert_eq!(range, PositionOrRange::Range(TextRange::new(4, 9)));
    }

    #[test]
    fn overlapping_spans() {
        let a = TextSpan::new(0, 5);
        let b = TextSpan::new(4, 2);
        let c = TextSpan::new(5, 2);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!TextSpan::at(3).overlaps(&TextSpan::at(3)));
    }

    #[test]
    fn contains_range_is_inclusive_of_bounds() {
        let outer = TextRange::new(2, 10);
        assert!(outer.contains_range(TextRange::new(2, 10)));
        assert!(outer.contains_range(TextRange::new(3, 4)));
        assert!(!outer.contains_range(TextRange::new(1, 4)));
    }
}
