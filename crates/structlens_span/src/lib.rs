//! Line/column positions inside a source document.
//!
//! Lines and columns are zero-based. Columns count Unicode scalar values, so a
//! position stays meaningful when the line contains non-ASCII identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span covering `width` columns of a single line.
    pub const fn on_line(line: usize, column: usize, width: usize) -> Self {
        Self {
            start: Position::new(line, column),
            end: Position::new(line, column + width),
        }
    }

    /// Inclusive on both ends, so a cursor placed right after a name still
    /// counts as being on it.
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Converts a byte index inside `line` into a char column.
pub fn column_of(line: &str, byte_index: usize) -> usize {
    line.get(..byte_index)
        .map_or_else(|| line.chars().count(), |prefix| prefix.chars().count())
}
