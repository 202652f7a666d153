//! The expression-language tokenizer.
//!
//! Composes the generic lexical framework into the concrete dialect the
//! calculator parses: C-style comments, single- and double-quoted
//! literals with doubled-quote escaping, hex and exponent number forms,
//! reserved words, and the multi-character comparison and shift
//! operators.

mod number;
mod quote;
mod word;

pub use number::ExpressionNumberState;
pub use quote::ExpressionQuoteState;
pub use word::ExpressionWordState;

use std::rc::Rc;

use tokex_lex::{CppCommentState, SymbolState, Token, TokenType, Tokenizer, WhitespaceState};

/// A tokenizer preconfigured for the expression language.
///
/// Whitespace and comments are skipped, quoted values are decoded, and no
/// terminal `Eof` token is reported; the parser works on the bare token
/// vector.
///
/// # Example
///
/// ```
/// use tokex_calc::tokenizer::ExpressionTokenizer;
/// use tokex_lex::TokenType;
///
/// let tokens = ExpressionTokenizer::new().tokenize("rate >= 0.5");
/// let types: Vec<_> = tokens.iter().map(|t| t.token_type()).collect();
/// assert_eq!(types, [TokenType::Word, TokenType::Symbol, TokenType::Float]);
/// assert_eq!(tokens[1].value(), ">=");
/// ```
pub struct ExpressionTokenizer {
    inner: Tokenizer,
}

impl ExpressionTokenizer {
    /// Creates a tokenizer for the expression language.
    pub fn new() -> Self {
        let mut inner = Tokenizer::new();

        let mut symbol = SymbolState::new();
        symbol.add("<>", TokenType::Symbol);
        symbol.add("<<", TokenType::Symbol);
        symbol.add(">>", TokenType::Symbol);
        let symbol = Rc::new(symbol);
        inner.set_symbol_state(symbol.clone());

        // Broad ranges first; specific classes carve out exceptions.
        inner.set_character_state('\0', '\u{ff}', symbol);
        inner.set_character_state('\0', ' ', Rc::new(WhitespaceState::new()));

        let word = Rc::new(ExpressionWordState::new());
        inner.set_character_state('a', 'z', word.clone());
        inner.set_character_state('A', 'Z', word.clone());
        inner.set_character_state('_', '_', word.clone());
        inner.set_character_state('\u{00c0}', '\u{00ff}', word.clone());
        inner.set_character_state('\u{0100}', '\u{fffe}', word);

        let number = Rc::new(ExpressionNumberState::new());
        inner.set_character_state('0', '9', number.clone());
        inner.set_character_state('.', '.', number);

        let quote = Rc::new(ExpressionQuoteState::new());
        inner.set_character_state('\'', '\'', quote.clone());
        inner.set_character_state('"', '"', quote);

        inner.set_character_state('/', '/', Rc::new(CppCommentState::new()));

        inner.skip_whitespaces = true;
        inner.skip_comments = true;
        inner.skip_eof = true;
        inner.decode_strings = true;

        Self { inner }
    }

    /// Tokenizes an expression into its significant tokens.
    pub fn tokenize(&self, expression: &str) -> Vec<Token> {
        self.inner
            .tokenize(expression)
            .into_iter()
            .filter(|t| t.token_type() != TokenType::Whitespace)
            .collect()
    }

    /// The underlying generic tokenizer, for callers that need to adjust
    /// options.
    pub fn inner_mut(&mut self) -> &mut Tokenizer {
        &mut self.inner
    }
}

impl Default for ExpressionTokenizer {
    fn default() -> Self {
        Self::new()
    }
}
