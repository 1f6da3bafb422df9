//! Line/character positions for host-facing selections.
//!
//! The engine works on byte offsets; hosts that speak line/character
//! (the `tsd-server` protocol accepts both) convert through `LineMap`.

use serde::{Deserialize, Serialize};

/// A zero-based line and character (UTF-16 code units) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }
}

/// Starting offset of every line in a text.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];
        for idx in memchr::memchr2_iter(b'\n', b'\r', bytes) {
            // "\r\n" counts once, at the '\n'
            if bytes[idx] == b'\r' && bytes.get(idx + 1) == Some(&b'\n') {
                continue;
            }
            line_starts.push((idx + 1) as u32);
        }
        LineMap { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.line_starts.get(line).copied()
    }

    /// Convert a byte offset to a line/character position.
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let character = source
            .get(line_start.min(end)..end)
            .unwrap_or("")
            .chars()
            .map(|ch| ch.len_utf16() as u32)
            .sum();
        Position::new(line as u32, character)
    }

    /// Convert a line/character position back to a byte offset.
    pub fn position_to_offset(&self, position: Position, source: &str) -> Option<u32> {
        let line = position.line as usize;
        let start = *self.line_starts.get(line)?;
        let limit = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(source.len() as u32);
        let text = source.get(start as usize..limit as usize).unwrap_or("");

        let mut units = 0u32;
        let mut bytes = 0u32;
        for ch in text.chars() {
            if ch == '\n' || ch == '\r' || units >= position.character {
                break;
            }
            units += ch.len_utf16() as u32;
            bytes += ch.len_utf8() as u32;
        }
        Some(start + bytes)
    }

    pub fn range_of(&self, start: u32, end: u32, source: &str) -> Range {
        Range::new(
            self.offset_to_position(start, source),
            self.offset_to_position(end, source),
        )
    }
}

/// Offset of the first byte of the line containing `pos`.
pub fn line_start_of(text: &str, pos: u32) -> u32 {
    let end = (pos as usize).min(text.len());
    memchr::memrchr2(b'\n', b'\r', &text.as_bytes()[..end]).map_or(0, |idx| idx as u32 + 1)
}
