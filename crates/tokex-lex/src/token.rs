//! Token type definitions.
//!
//! A [`Token`] is a classified, immutable substring of the source text,
//! tagged with a [`TokenType`] and the position where it started. Tokens
//! are produced by state handlers and never mutated; the tokenizer driver
//! replaces a token wholesale when an option (decoding, whitespace merging,
//! number unification) changes it.

use std::fmt;

use tokex_util::Position;

/// Classification of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// A character run no registered state claimed.
    Unknown,
    /// End of the token stream.
    Eof,
    /// A line terminator, for tokenizers that classify them separately.
    Eol,
    /// A floating-point number literal.
    Float,
    /// An integer number literal.
    Integer,
    /// A hexadecimal number literal.
    HexDecimal,
    /// Any number literal, when number unification is enabled.
    Number,
    /// An operator or punctuation symbol.
    Symbol,
    /// A quoted string literal.
    Quoted,
    /// An identifier-like word.
    Word,
    /// A word reclassified as a reserved keyword.
    Keyword,
    /// A run of whitespace characters.
    Whitespace,
    /// A comment.
    Comment,
    /// A marker character with tokenizer-specific meaning.
    Special,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A classified substring of the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    token_type: TokenType,
    value: String,
    position: Position,
}

impl Token {
    /// Creates a token.
    pub fn new(token_type: TokenType, value: impl Into<String>, position: Position) -> Self {
        Self {
            token_type,
            value: value.into(),
            position,
        }
    }

    /// Returns the token's classification.
    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// Returns the exact text the token was built from.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the line/column where the token started.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at {}", self.token_type, self.value, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_accessors() {
        let token = Token::new(TokenType::Word, "abc", Position::new(2, 5));
        assert_eq!(token.token_type(), TokenType::Word);
        assert_eq!(token.value(), "abc");
        assert_eq!(token.position(), Position::new(2, 5));
    }

    #[test]
    fn test_token_equality() {
        let a = Token::new(TokenType::Symbol, "+", Position::START);
        let b = Token::new(TokenType::Symbol, "+", Position::START);
        assert_eq!(a, b);
    }
}
