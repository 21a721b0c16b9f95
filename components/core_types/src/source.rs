//! Source position type for diagnostics.

use std::fmt;

/// Represents a position in source code.
///
/// Used for error reporting to indicate where an issue occurred.
///
/// # Examples
///
/// ```
/// use core_types::SourcePosition;
///
/// let pos = SourcePosition {
///     line: 10,
///     column: 5,
///     offset: 150,
/// };
///
/// assert_eq!(pos.line, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePosition {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed)
    pub column: u32,
    /// Character offset from the start of the source buffer
    pub offset: usize,
}

impl SourcePosition {
    /// Position that only knows its line.
    pub fn at_line(line: u32) -> Self {
        Self {
            line,
            column: 0,
            offset: 0,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.column == 0 {
            write!(f, "line {}", self.line)
        } else {
            write!(f, "line {}, column {}", self.line, self.column)
        }
    }
}
