//! Word state.

use crate::charmap::CharIntervalMap;
use crate::scanner::PushbackScanner;
use crate::state::State;
use crate::token::{Token, TokenType};
use crate::tokenizer::Tokenizer;

/// Consumes an identifier-like word.
///
/// The tokenizer decides which characters may *begin* a word (through its
/// dispatch table); this state decides which characters may appear as the
/// second and later characters. The two sets are typically different: it is
/// normal for digits to appear inside a word but not to start one.
///
/// By default the following ranges are word characters, customizable with
/// [`set_word_chars`](WordState::set_word_chars):
///
/// ```text
/// 'a'..='z'   'A'..='Z'   '0'..='9'   '-'   '_'
/// U+00C0..=U+00FF   U+0100..=U+FFFE
/// ```
pub struct WordState {
    map: CharIntervalMap<bool>,
}

impl WordState {
    /// Creates a word state with the default word-character ranges.
    pub fn new() -> Self {
        let mut state = Self {
            map: CharIntervalMap::new(),
        };
        state.set_word_chars('a', 'z', true);
        state.set_word_chars('A', 'Z', true);
        state.set_word_chars('0', '9', true);
        state.set_word_chars('-', '-', true);
        state.set_word_chars('_', '_', true);
        state.set_word_chars('\u{00c0}', '\u{00ff}', true);
        state.set_word_chars('\u{0100}', '\u{fffe}', true);
        state
    }

    /// Creates a word state with no word characters registered.
    pub fn empty() -> Self {
        Self {
            map: CharIntervalMap::new(),
        }
    }

    /// Enables or disables a character range as valid word characters.
    ///
    /// Later calls shadow earlier ones, so an exception can be carved out
    /// of a broad range.
    pub fn set_word_chars(&mut self, from: char, to: char, enable: bool) {
        self.map.add_interval(from, to, enable);
    }

    /// Clears all word-character definitions.
    pub fn clear_word_chars(&mut self) {
        self.map.clear();
    }

    /// Tests whether `symbol` may appear inside a word.
    pub fn is_word_char(&self, symbol: char) -> bool {
        self.map.lookup(symbol).copied().unwrap_or(false)
    }
}

impl Default for WordState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for WordState {
    fn next_token(&self, scanner: &mut PushbackScanner, _tokenizer: &Tokenizer) -> Token {
        let position = scanner.position();
        let mut value = String::new();
        while let Some(symbol) = scanner.read() {
            if self.is_word_char(symbol) {
                value.push(symbol);
            } else {
                scanner.pushback(symbol);
                break;
            }
        }
        Token::new(TokenType::Word, value, position)
    }
}
