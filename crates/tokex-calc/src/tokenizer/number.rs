//! Expression number state.

use tokex_lex::{PushbackScanner, State, Token, TokenType, Tokenizer};

/// Consumes expression numeric literals.
///
/// Recognizes decimal integers, floats with a fraction and an optional
/// `e`/`E` exponent, and `0x` hexadecimal literals. A leading sign is left
/// to the parser's unary minus. A lone `.` with no digit after it is
/// delegated to the symbol state.
pub struct ExpressionNumberState;

impl ExpressionNumberState {
    /// Creates the expression number state.
    pub fn new() -> Self {
        Self
    }

    fn read_digits(scanner: &mut PushbackScanner, value: &mut String) -> bool {
        let mut any = false;
        while let Some(symbol) = scanner.peek() {
            if symbol.is_ascii_digit() {
                scanner.read();
                value.push(symbol);
                any = true;
            } else {
                break;
            }
        }
        any
    }
}

impl Default for ExpressionNumberState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for ExpressionNumberState {
    fn next_token(&self, scanner: &mut PushbackScanner, tokenizer: &Tokenizer) -> Token {
        let position = scanner.position();
        let mut value = String::new();

        // 0x... hexadecimal literal.
        if scanner.peek() == Some('0') {
            scanner.read();
            match scanner.peek() {
                Some(marker @ ('x' | 'X')) => {
                    scanner.read();
                    let mut digits = String::new();
                    while let Some(symbol) = scanner.peek() {
                        if symbol.is_ascii_hexdigit() {
                            scanner.read();
                            digits.push(symbol);
                        } else {
                            break;
                        }
                    }
                    if digits.is_empty() {
                        // "0x" with no digits: the zero is a plain number.
                        scanner.pushback(marker);
                    } else {
                        return Token::new(
                            TokenType::HexDecimal,
                            format!("0{marker}{digits}"),
                            position,
                        );
                    }
                },
                _ => {},
            }
            scanner.pushback('0');
        }

        let mut has_digits = Self::read_digits(scanner, &mut value);
        let mut is_float = false;

        // Fraction only counts when a digit follows the dot.
        if scanner.peek() == Some('.') {
            scanner.read();
            if scanner.peek().is_some_and(|c| c.is_ascii_digit()) {
                value.push('.');
                Self::read_digits(scanner, &mut value);
                is_float = true;
                has_digits = true;
            } else {
                scanner.pushback('.');
            }
        }

        if !has_digits {
            // Dispatched on '.', but no literal here.
            return tokenizer.symbol_state().next_token(scanner, tokenizer);
        }

        if let Some(marker @ ('e' | 'E')) = scanner.peek() {
            scanner.read();
            let sign = match scanner.peek() {
                Some(symbol @ ('+' | '-')) => {
                    scanner.read();
                    Some(symbol)
                },
                _ => None,
            };
            let mut exponent = String::new();
            let has_exponent = Self::read_digits(scanner, &mut exponent);
            if has_exponent {
                is_float = true;
                value.push(marker);
                if let Some(symbol) = sign {
                    value.push(symbol);
                }
                value.push_str(&exponent);
            } else {
                // "1e" or "1e+" without digits: the marker is not ours.
                if let Some(symbol) = sign {
                    scanner.pushback(symbol);
                }
                scanner.pushback(marker);
            }
        }

        let token_type = if is_float {
            TokenType::Float
        } else {
            TokenType::Integer
        };
        Token::new(token_type, value, position)
    }
}
