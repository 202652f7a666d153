//! Pushback scanner for traversing source text.
//!
//! This module provides the [`PushbackScanner`] struct which feeds characters
//! to the tokenizer state machine. Unlike a plain cursor it supports
//! unlimited pushback: any number of characters (or whole strings) can be
//! returned to the front of the stream and re-read later, which is what
//! allows state handlers to look arbitrarily far ahead and then change
//! their mind.

use tokex_util::Position;

/// A character scanner with unlimited pushback and line/column tracking.
///
/// The scanner owns a copy of the source text and a cursor position plus an
/// explicit pushback stack. Reading past the end of input yields `None` and
/// keeps yielding `None` on every subsequent read.
///
/// Pushbacks stack LIFO in front of the stream: the last character pushed
/// back is the first one read. [`PushbackScanner::pushback_str`] inserts a
/// whole string ahead of any previously pushed-back characters while
/// preserving its internal left-to-right order.
///
/// # Example
///
/// ```
/// use tokex_lex::PushbackScanner;
///
/// let mut scanner = PushbackScanner::new("ab");
/// assert_eq!(scanner.read(), Some('a'));
/// scanner.pushback('a');
/// assert_eq!(scanner.peek(), Some('a'));
/// assert_eq!(scanner.read(), Some('a'));
/// assert_eq!(scanner.read(), Some('b'));
/// assert_eq!(scanner.read(), None);
/// assert_eq!(scanner.read(), None);
/// ```
pub struct PushbackScanner {
    /// The source text as individual characters.
    chars: Vec<char>,

    /// Index of the next unread character in `chars`.
    cursor: usize,

    /// Pushed-back characters; the last element is read first.
    pushback: Vec<char>,

    /// Line number of the next character to be read (1-based).
    line: u32,

    /// Column number of the next character to be read (1-based).
    column: u32,
}

impl PushbackScanner {
    /// Creates a scanner over the given source text.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            cursor: 0,
            pushback: Vec::new(),
            line: 1,
            column: 1,
        }
    }

    /// Reads the next character, or `None` at end of input.
    ///
    /// Pushed-back characters are drained before the underlying stream.
    pub fn read(&mut self) -> Option<char> {
        let next = match self.pushback.pop() {
            Some(c) => Some(c),
            None => {
                let c = self.chars.get(self.cursor).copied();
                if c.is_some() {
                    self.cursor += 1;
                }
                c
            },
        };
        if let Some(c) = next {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        next
    }

    /// Returns the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.pushback
            .last()
            .copied()
            .or_else(|| self.chars.get(self.cursor).copied())
    }

    /// Returns a character to the front of the stream.
    ///
    /// Multiple pushbacks stack so that a subsequent [`read`](Self::read)
    /// returns them in reverse order of pushback.
    ///
    /// Column information is approximate when a line terminator is pushed
    /// back: the previous line's width cannot be recovered. The tokenizer
    /// captures token positions at token start, where pushback arithmetic
    /// has always balanced out, so token positions stay exact.
    pub fn pushback(&mut self, symbol: char) {
        self.pushback.push(symbol);
        if symbol == '\n' {
            self.line = self.line.saturating_sub(1).max(1);
            self.column = 1;
        } else if self.column > 1 {
            self.column -= 1;
        }
    }

    /// Inserts a whole string ahead of the stream.
    ///
    /// The string is read back left to right, before any previously
    /// pushed-back characters.
    ///
    /// # Example
    ///
    /// ```
    /// use tokex_lex::PushbackScanner;
    ///
    /// let mut scanner = PushbackScanner::new("z");
    /// scanner.pushback('y');
    /// scanner.pushback_str("ab");
    /// assert_eq!(scanner.read(), Some('a'));
    /// assert_eq!(scanner.read(), Some('b'));
    /// assert_eq!(scanner.read(), Some('y'));
    /// assert_eq!(scanner.read(), Some('z'));
    /// ```
    pub fn pushback_str(&mut self, text: &str) {
        for c in text.chars().rev() {
            self.pushback(c);
        }
    }

    /// Returns the position of the next character to be read.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns true if no characters remain.
    pub fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_read_to_end() {
        let mut scanner = PushbackScanner::new("ab");
        assert_eq!(scanner.read(), Some('a'));
        assert_eq!(scanner.read(), Some('b'));
        assert_eq!(scanner.read(), None);
        assert_eq!(scanner.read(), None);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut scanner = PushbackScanner::new("x");
        assert_eq!(scanner.peek(), Some('x'));
        assert_eq!(scanner.peek(), Some('x'));
        assert_eq!(scanner.read(), Some('x'));
        assert_eq!(scanner.peek(), None);
    }

    #[test]
    fn test_pushback_is_lifo() {
        let mut scanner = PushbackScanner::new("");
        scanner.pushback('a');
        scanner.pushback('b');
        assert_eq!(scanner.read(), Some('b'));
        assert_eq!(scanner.read(), Some('a'));
        assert_eq!(scanner.read(), None);
    }

    #[test]
    fn test_pushback_str_preserves_order() {
        let mut scanner = PushbackScanner::new("c");
        scanner.pushback_str("ab");
        assert_eq!(scanner.read(), Some('a'));
        assert_eq!(scanner.read(), Some('b'));
        assert_eq!(scanner.read(), Some('c'));
    }

    #[test]
    fn test_empty_source() {
        let mut scanner = PushbackScanner::new("");
        assert!(scanner.is_at_end());
        assert_eq!(scanner.peek(), None);
        assert_eq!(scanner.read(), None);
    }

    #[test]
    fn test_line_column_tracking() {
        let mut scanner = PushbackScanner::new("ab\ncd");
        assert_eq!(scanner.position(), tokex_util::Position::new(1, 1));
        scanner.read();
        scanner.read();
        assert_eq!(scanner.position(), tokex_util::Position::new(1, 3));
        scanner.read(); // '\n'
        assert_eq!(scanner.position(), tokex_util::Position::new(2, 1));
        scanner.read();
        assert_eq!(scanner.position(), tokex_util::Position::new(2, 2));
    }

    #[test]
    fn test_pushback_restores_column() {
        let mut scanner = PushbackScanner::new("abc");
        scanner.read();
        let before = scanner.position();
        let c = scanner.read().unwrap();
        scanner.pushback(c);
        assert_eq!(scanner.position(), before);
        assert_eq!(scanner.read(), Some('b'));
    }

    #[test]
    fn test_utf8_characters() {
        let mut scanner = PushbackScanner::new("αβ");
        assert_eq!(scanner.read(), Some('α'));
        scanner.pushback('α');
        assert_eq!(scanner.read(), Some('α'));
        assert_eq!(scanner.read(), Some('β'));
        assert_eq!(scanner.read(), None);
    }

    proptest! {
        /// Reading a character and pushing it straight back is observationally
        /// a no-op for the character stream.
        #[test]
        fn prop_pushback_idempotence(source in ".{1,40}", skip in 0usize..10) {
            let mut scanner = PushbackScanner::new(&source);
            for _ in 0..skip {
                scanner.read();
            }
            let peeked = scanner.peek();
            if let Some(c) = scanner.read() {
                scanner.pushback(c);
                prop_assert_eq!(scanner.peek(), peeked);
                prop_assert_eq!(scanner.read(), Some(c));
            }
        }

        /// The scanner yields exactly the characters of the source, in order.
        #[test]
        fn prop_reads_all_characters(source in ".{0,40}") {
            let mut scanner = PushbackScanner::new(&source);
            let mut collected = String::new();
            while let Some(c) = scanner.read() {
                collected.push(c);
            }
            prop_assert_eq!(collected, source);
        }
    }
}
