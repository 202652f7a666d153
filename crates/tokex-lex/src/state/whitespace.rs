//! Whitespace state.

use crate::charmap::CharIntervalMap;
use crate::scanner::PushbackScanner;
use crate::state::State;
use crate::token::{Token, TokenType};
use crate::tokenizer::Tokenizer;

/// Consumes a run of whitespace characters.
///
/// By default every character from `U+0000` through the space character
/// counts as whitespace, which covers tabs, carriage returns, and line
/// feeds. The set is customizable the same way as word characters.
pub struct WhitespaceState {
    map: CharIntervalMap<bool>,
}

impl WhitespaceState {
    /// Creates a whitespace state with the default character set.
    pub fn new() -> Self {
        let mut state = Self {
            map: CharIntervalMap::new(),
        };
        state.set_whitespace_chars('\0', ' ', true);
        state
    }

    /// Enables or disables a character range as whitespace.
    pub fn set_whitespace_chars(&mut self, from: char, to: char, enable: bool) {
        self.map.add_interval(from, to, enable);
    }

    /// Clears all whitespace-character definitions.
    pub fn clear_whitespace_chars(&mut self) {
        self.map.clear();
    }

    fn is_whitespace(&self, symbol: char) -> bool {
        self.map.lookup(symbol).copied().unwrap_or(false)
    }
}

impl Default for WhitespaceState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for WhitespaceState {
    fn next_token(&self, scanner: &mut PushbackScanner, _tokenizer: &Tokenizer) -> Token {
        let position = scanner.position();
        let mut value = String::new();
        while let Some(symbol) = scanner.read() {
            if self.is_whitespace(symbol) {
                value.push(symbol);
            } else {
                scanner.pushback(symbol);
                break;
            }
        }
        Token::new(TokenType::Whitespace, value, position)
    }
}
