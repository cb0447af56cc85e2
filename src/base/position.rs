//! Source locations attached to property references.
//!
//! Positions are 0-indexed so they can be handed to LSP clients unchanged.
use smol_str::SmolStr;
use std::fmt;

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A span representing a range in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position <= self.end
    }
}

/// Where a property was referenced: the source file plus the span of the
/// `->prop` / `::$prop` expression inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeLocation {
    /// Path of the source unit, used as the grouping key for collected locations
    pub file_path: SmolStr,
    pub span: Span,
}

impl CodeLocation {
    pub fn new(file_path: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            file_path: file_path.into(),
            span,
        }
    }

    /// Location of a single-line reference starting at `line:column`.
    pub fn at(file_path: impl Into<SmolStr>, line: usize, column: usize, len: usize) -> Self {
        Self::new(file_path, Span::from_coords(line, column, line, column + len))
    }
}

impl fmt::Display for CodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_path,
            self.span.start.line + 1,
            self.span.start.column + 1
        )
    }
}
