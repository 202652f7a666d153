//! Generic quote state.

use crate::scanner::PushbackScanner;
use crate::state::State;
use crate::token::{Token, TokenType};
use crate::tokenizer::Tokenizer;

/// Consumes a quoted string.
///
/// The first character read is the opening quote; consumption continues
/// until a character equal to it is seen (the closing quote is included in
/// the token value) or the input ends. This generic form has no escape
/// syntax; a doubled quote terminates the run and starts a new token.
///
/// [`decode_string`](State::decode_string) strips one matching pair of
/// leading/trailing quote characters; values that are not wrapped in the
/// quote character pass through unchanged.
pub struct QuoteState;

impl QuoteState {
    /// Creates a quote state.
    pub fn new() -> Self {
        Self
    }
}

impl Default for QuoteState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for QuoteState {
    fn next_token(&self, scanner: &mut PushbackScanner, _tokenizer: &Tokenizer) -> Token {
        let position = scanner.position();
        let Some(first) = scanner.read() else {
            return Token::new(TokenType::Quoted, String::new(), position);
        };
        let mut value = String::new();
        value.push(first);
        while let Some(symbol) = scanner.read() {
            value.push(symbol);
            if symbol == first {
                break;
            }
        }
        Token::new(TokenType::Quoted, value, position)
    }

    fn encode_string(&self, value: &str, quote: char) -> Option<String> {
        Some(format!("{quote}{value}{quote}"))
    }

    fn decode_string(&self, value: &str, quote: char) -> Option<String> {
        let decoded = if value.chars().count() >= 2
            && value.starts_with(quote)
            && value.ends_with(quote)
        {
            let inner = &value[quote.len_utf8()..value.len() - quote.len_utf8()];
            inner.to_string()
        } else {
            value.to_string()
        };
        Some(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_quote(source: &str) -> (Token, PushbackScanner) {
        let state = QuoteState::new();
        let tokenizer = Tokenizer::new();
        let mut scanner = PushbackScanner::new(source);
        let token = state.next_token(&mut scanner, &tokenizer);
        (token, scanner)
    }

    #[test]
    fn test_closing_quote_included() {
        let (token, _) = scan_quote("'abc' rest");
        assert_eq!(token.token_type(), TokenType::Quoted);
        assert_eq!(token.value(), "'abc'");
    }

    #[test]
    fn test_unterminated_quote_ends_at_eof() {
        let (token, scanner) = scan_quote("\"abc");
        assert_eq!(token.value(), "\"abc");
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_doubled_quote_terminates() {
        // No escaping in the generic form: '' is an empty literal.
        let (token, mut scanner) = scan_quote("''abc");
        assert_eq!(token.value(), "''");
        assert_eq!(scanner.read(), Some('a'));
    }

    #[test]
    fn test_decode_strips_quotes() {
        let state = QuoteState::new();
        assert_eq!(state.decode_string("'abc'", '\'').unwrap(), "abc");
    }

    #[test]
    fn test_decode_passes_through_unquoted() {
        let state = QuoteState::new();
        assert_eq!(state.decode_string("abc", '\'').unwrap(), "abc");
        assert_eq!(state.decode_string("'", '\'').unwrap(), "'");
    }

    #[test]
    fn test_encode_wraps() {
        let state = QuoteState::new();
        assert_eq!(state.encode_string("abc", '"').unwrap(), "\"abc\"");
    }
}
