//! Constant state.

use crate::scanner::PushbackScanner;
use crate::state::State;
use crate::token::{Token, TokenType};
use crate::tokenizer::Tokenizer;

/// Consumes exactly one character and reports it with a fixed token type.
///
/// Useful for marker characters with tokenizer-specific meaning, such as
/// the `Special` delimiters of a template dialect built on top of the
/// generic tokenizer.
pub struct ConstantState {
    token_type: TokenType,
}

impl ConstantState {
    /// Creates a constant state reporting the given token type.
    pub fn new(token_type: TokenType) -> Self {
        Self { token_type }
    }
}

impl State for ConstantState {
    fn next_token(&self, scanner: &mut PushbackScanner, _tokenizer: &Tokenizer) -> Token {
        let position = scanner.position();
        let value = match scanner.read() {
            Some(symbol) => symbol.to_string(),
            None => String::new(),
        };
        Token::new(self.token_type, value, position)
    }
}
