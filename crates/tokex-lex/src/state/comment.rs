//! C-style comment state.

use crate::scanner::PushbackScanner;
use crate::state::State;
use crate::token::{Token, TokenType};
use crate::tokenizer::Tokenizer;

/// Consumes `//` and `/* */` comments.
///
/// Must be registered for the `/` character. When the second character is
/// neither `/` nor `*`, both characters are pushed back and the call is
/// delegated to the tokenizer's symbol state, so a lone `/` still comes out
/// as a symbol.
///
/// # Panics
///
/// Panics if invoked on a character other than `/`. That is a usage
/// contract violation, not a data condition: it cannot happen through a
/// well-formed dispatch table.
pub struct CppCommentState;

impl CppCommentState {
    /// Creates a comment state.
    pub fn new() -> Self {
        Self
    }

    /// Consumes up to and including a closing `*/`, or to end of input.
    fn read_multi_line(scanner: &mut PushbackScanner) -> String {
        let mut result = String::new();
        let mut last = '\0';
        while let Some(symbol) = scanner.read() {
            result.push(symbol);
            if last == '*' && symbol == '/' {
                break;
            }
            last = symbol;
        }
        result
    }

    /// Consumes to end of line, pushing the line terminator back.
    fn read_single_line(scanner: &mut PushbackScanner) -> String {
        let mut result = String::new();
        while let Some(symbol) = scanner.read() {
            if symbol == '\n' || symbol == '\r' {
                scanner.pushback(symbol);
                break;
            }
            result.push(symbol);
        }
        result
    }
}

impl Default for CppCommentState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for CppCommentState {
    fn next_token(&self, scanner: &mut PushbackScanner, tokenizer: &Tokenizer) -> Token {
        let position = scanner.position();
        let first = scanner.read();
        if first != Some('/') {
            if let Some(symbol) = first {
                scanner.pushback(symbol);
            }
            panic!("CppCommentState invoked on a character other than '/'");
        }

        match scanner.read() {
            Some('*') => {
                let body = Self::read_multi_line(scanner);
                Token::new(TokenType::Comment, format!("/*{body}"), position)
            },
            Some('/') => {
                let body = Self::read_single_line(scanner);
                Token::new(TokenType::Comment, format!("//{body}"), position)
            },
            second => {
                if let Some(symbol) = second {
                    scanner.pushback(symbol);
                }
                scanner.pushback('/');
                tokenizer.symbol_state().next_token(scanner, tokenizer)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_comment(source: &str) -> (Token, PushbackScanner) {
        let state = CppCommentState::new();
        let tokenizer = Tokenizer::new();
        let mut scanner = PushbackScanner::new(source);
        let token = state.next_token(&mut scanner, &tokenizer);
        (token, scanner)
    }

    #[test]
    fn test_multi_line_comment() {
        let (token, mut scanner) = scan_comment("/* a b */x");
        assert_eq!(token.token_type(), TokenType::Comment);
        assert_eq!(token.value(), "/* a b */");
        assert_eq!(scanner.read(), Some('x'));
    }

    #[test]
    fn test_unterminated_multi_line_ends_at_eof() {
        let (token, scanner) = scan_comment("/* open");
        assert_eq!(token.value(), "/* open");
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_single_line_comment_pushes_back_terminator() {
        let (token, mut scanner) = scan_comment("// note\nx");
        assert_eq!(token.value(), "// note");
        assert_eq!(scanner.read(), Some('\n'));
        assert_eq!(scanner.read(), Some('x'));
    }

    #[test]
    fn test_single_line_comment_at_eof() {
        let (token, scanner) = scan_comment("// note");
        assert_eq!(token.value(), "// note");
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_lone_slash_delegates_to_symbol_state() {
        let (token, mut scanner) = scan_comment("/x");
        assert_eq!(token.token_type(), TokenType::Symbol);
        assert_eq!(token.value(), "/");
        assert_eq!(scanner.read(), Some('x'));
    }

    #[test]
    fn test_slash_at_eof_is_a_symbol() {
        let (token, scanner) = scan_comment("/");
        assert_eq!(token.token_type(), TokenType::Symbol);
        assert_eq!(token.value(), "/");
        assert!(scanner.is_at_end());
    }

    #[test]
    #[should_panic(expected = "other than '/'")]
    fn test_wrong_first_character_panics() {
        scan_comment("x");
    }
}
