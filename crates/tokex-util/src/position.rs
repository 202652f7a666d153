//! Source positions.
//!
//! A [`Position`] records where something starts in the source text. Both
//! coordinates are 1-based, matching the convention of most editors.

use std::fmt;

/// A line/column location in source text.
///
/// # Example
///
/// ```
/// use tokex_util::Position;
///
/// let pos = Position::new(3, 14);
/// assert_eq!(pos.line, 3);
/// assert_eq!(pos.column, 14);
/// assert_eq!(pos.to_string(), "3:14");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-based).
    pub line: u32,

    /// Column number (1-based, in characters).
    pub column: u32,
}

impl Position {
    /// The position of the first character of any source text.
    pub const START: Position = Position { line: 1, column: 1 };

    /// Creates a position from line and column numbers.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_one_based() {
        assert_eq!(Position::START, Position::new(1, 1));
        assert_eq!(Position::default(), Position::START);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(12, 7).to_string(), "12:7");
    }
}
