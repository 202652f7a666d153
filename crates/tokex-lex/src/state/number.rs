//! Number state.

use crate::scanner::PushbackScanner;
use crate::state::State;
use crate::token::{Token, TokenType};
use crate::tokenizer::Tokenizer;

/// Consumes an integer or floating-point literal.
///
/// Handles an optional leading minus sign, an integer part, and a decimal
/// point followed by a fractional part. A decimal point only counts when a
/// digit follows it, so `1.x` lexes as `1`, `.`, `x`. When no digit is
/// consumed at all (a lone `-` or `.`), everything read is pushed back and
/// the call is delegated to the tokenizer's symbol state.
pub struct NumberState;

impl NumberState {
    /// Creates a number state.
    pub fn new() -> Self {
        Self
    }
}

impl Default for NumberState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for NumberState {
    fn next_token(&self, scanner: &mut PushbackScanner, tokenizer: &Tokenizer) -> Token {
        let position = scanner.position();
        let mut value = String::new();
        let mut got_digit = false;
        let mut is_float = false;

        let mut next = scanner.read();
        if next == Some('-') {
            value.push('-');
            next = scanner.read();
        }

        while let Some(symbol) = next {
            if !symbol.is_ascii_digit() {
                break;
            }
            value.push(symbol);
            got_digit = true;
            next = scanner.read();
        }

        if next == Some('.') && scanner.peek().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            value.push('.');
            next = scanner.read();
            while let Some(symbol) = next {
                if !symbol.is_ascii_digit() {
                    break;
                }
                value.push(symbol);
                got_digit = true;
                next = scanner.read();
            }
        }

        if let Some(symbol) = next {
            scanner.pushback(symbol);
        }

        if !got_digit {
            scanner.pushback_str(&value);
            return tokenizer.symbol_state().next_token(scanner, tokenizer);
        }

        let token_type = if is_float {
            TokenType::Float
        } else {
            TokenType::Integer
        };
        Token::new(token_type, value, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_number(source: &str) -> (Token, PushbackScanner) {
        let state = NumberState::new();
        let tokenizer = Tokenizer::new();
        let mut scanner = PushbackScanner::new(source);
        let token = state.next_token(&mut scanner, &tokenizer);
        (token, scanner)
    }

    #[test]
    fn test_integer() {
        let (token, _) = scan_number("123 x");
        assert_eq!(token.token_type(), TokenType::Integer);
        assert_eq!(token.value(), "123");
    }

    #[test]
    fn test_float() {
        let (token, _) = scan_number("3.14+");
        assert_eq!(token.token_type(), TokenType::Float);
        assert_eq!(token.value(), "3.14");
    }

    #[test]
    fn test_negative_number() {
        let (token, _) = scan_number("-42");
        assert_eq!(token.token_type(), TokenType::Integer);
        assert_eq!(token.value(), "-42");
    }

    #[test]
    fn test_trailing_dot_is_not_consumed() {
        let (token, mut scanner) = scan_number("1.x");
        assert_eq!(token.token_type(), TokenType::Integer);
        assert_eq!(token.value(), "1");
        assert_eq!(scanner.read(), Some('.'));
    }

    #[test]
    fn test_lone_minus_delegates_to_symbol_state() {
        let (token, mut scanner) = scan_number("-x");
        assert_eq!(token.token_type(), TokenType::Symbol);
        assert_eq!(token.value(), "-");
        assert_eq!(scanner.read(), Some('x'));
    }

    #[test]
    fn test_lone_dot_delegates_to_symbol_state() {
        let (token, _) = scan_number(".x");
        assert_eq!(token.token_type(), TokenType::Symbol);
        assert_eq!(token.value(), ".");
    }
}
