//! Position tracking for declarations
//!
//! Stores the source location (line/column) recorded by the compiler in a
//! file's source-code-info, for error reporting and doc generation.

/// A span representing a range in source code (0-indexed, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Span {
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

    /// Decode the compact span encoding of a source-code-info location.
    ///
    /// Three elements mean `[start_line, start_col, end_col]` on a single
    /// line, four mean `[start_line, start_col, end_line, end_col]`. Any other
    /// length (or a negative coordinate) yields `None`.
    pub fn from_proto(span: &[i32]) -> Option<Self> {
        let coords: Vec<usize> = span
            .iter()
            .map(|&c| usize::try_from(c).ok())
            .collect::<Option<_>>()?;
        match coords.as_slice() {
            &[line, start_col, end_col] => Some(Self::from_coords(line, start_col, line, end_col)),
            &[start_line, start_col, end_line, end_col] => {
                Some(Self::from_coords(start_line, start_col, end_line, end_col))
            }
            _ => None,
        }
    }

    /// Whether `position` lies in `[start, end)`.
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}
