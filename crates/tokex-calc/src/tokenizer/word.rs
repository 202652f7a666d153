//! Expression word state.

use tokex_lex::{PushbackScanner, State, Token, TokenType, Tokenizer, WordState};

/// The reserved words of the expression language.
///
/// Matching is case-insensitive; the reported token keeps the source
/// spelling.
const KEYWORDS: &[&str] = &[
    "AND", "OR", "NOT", "XOR", "LIKE", "IS", "IN", "NULL", "TRUE", "FALSE",
];

/// Consumes identifiers and reclassifies reserved words as keywords.
///
/// Word characters are letters, digits, underscore and the extended
/// Unicode ranges; unlike the generic word state, `-` is not a word
/// character, so `a-b` lexes as a subtraction.
pub struct ExpressionWordState {
    inner: WordState,
}

impl ExpressionWordState {
    /// Creates the expression word state.
    pub fn new() -> Self {
        let mut inner = WordState::empty();
        inner.set_word_chars('a', 'z', true);
        inner.set_word_chars('A', 'Z', true);
        inner.set_word_chars('0', '9', true);
        inner.set_word_chars('_', '_', true);
        inner.set_word_chars('\u{00c0}', '\u{00ff}', true);
        inner.set_word_chars('\u{0100}', '\u{fffe}', true);
        Self { inner }
    }
}

impl Default for ExpressionWordState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for ExpressionWordState {
    fn next_token(&self, scanner: &mut PushbackScanner, tokenizer: &Tokenizer) -> Token {
        let token = self.inner.next_token(scanner, tokenizer);
        let upper = token.value().to_ascii_uppercase();
        if KEYWORDS.contains(&upper.as_str()) {
            Token::new(TokenType::Keyword, token.value().to_string(), token.position())
        } else {
            token
        }
    }
}
