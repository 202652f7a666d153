//! Expression quote state.

use tokex_lex::{PushbackScanner, State, Token, TokenType, Tokenizer};

/// Consumes quoted literals with doubled-quote escaping.
///
/// Inside a literal the quote character is written twice to stand for
/// itself, so `'it''s'` decodes to `it's`. A literal opened with `"` is
/// reported as a `Word` token, which lets reserved words be used as
/// identifiers (`"AND"` is a variable named AND, not the operator).
pub struct ExpressionQuoteState;

impl ExpressionQuoteState {
    /// Creates the expression quote state.
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExpressionQuoteState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for ExpressionQuoteState {
    fn next_token(&self, scanner: &mut PushbackScanner, _tokenizer: &Tokenizer) -> Token {
        let position = scanner.position();
        let Some(quote) = scanner.read() else {
            return Token::new(TokenType::Quoted, String::new(), position);
        };
        let mut value = String::new();
        value.push(quote);

        while let Some(symbol) = scanner.read() {
            value.push(symbol);
            if symbol == quote {
                // A doubled quote is an escaped quote, not the end.
                if scanner.peek() == Some(quote) {
                    scanner.read();
                    value.push(quote);
                } else {
                    break;
                }
            }
        }

        let token_type = if quote == '"' {
            TokenType::Word
        } else {
            TokenType::Quoted
        };
        Token::new(token_type, value, position)
    }

    fn encode_string(&self, value: &str, quote: char) -> Option<String> {
        let mut encoded = String::with_capacity(value.len() + 2);
        encoded.push(quote);
        for symbol in value.chars() {
            encoded.push(symbol);
            if symbol == quote {
                encoded.push(quote);
            }
        }
        encoded.push(quote);
        Some(encoded)
    }

    fn decode_string(&self, value: &str, quote: char) -> Option<String> {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() < 2 || chars[0] != quote || chars[chars.len() - 1] != quote {
            return Some(value.to_string());
        }
        let inner = &chars[1..chars.len() - 1];
        let mut decoded = String::with_capacity(inner.len());
        let mut index = 0;
        while index < inner.len() {
            decoded.push(inner[index]);
            if inner[index] == quote && inner.get(index + 1) == Some(&quote) {
                index += 2;
            } else {
                index += 1;
            }
        }
        Some(decoded)
    }
}
