//! Tokenizer state handlers.
//!
//! Each state handler owns the job of consuming characters belonging to one
//! token class. The tokenizer decides which state a character belongs to
//! through its dispatch table and hands the scanner over; the state consumes
//! zero or more characters and returns a single token.
//!
//! - [`WordState`] - identifier-like words
//! - [`QuoteState`] - quoted strings (no escaping)
//! - [`CppCommentState`] - `//` and `/* */` comments
//! - [`WhitespaceState`] - whitespace runs
//! - [`SymbolState`] - operators and punctuation, with multi-character
//!   symbol support
//! - [`NumberState`] - integer and floating-point literals
//! - [`ConstantState`] - single-character markers with a fixed type

mod comment;
mod constant;
mod number;
mod quote;
mod symbol;
mod whitespace;
mod word;

pub use comment::CppCommentState;
pub use constant::ConstantState;
pub use number::NumberState;
pub use quote::QuoteState;
pub use symbol::SymbolState;
pub use whitespace::WhitespaceState;
pub use word::WordState;

use crate::scanner::PushbackScanner;
use crate::token::Token;
use crate::tokenizer::Tokenizer;

/// A handler for one character class of the tokenizer.
///
/// The tokenizer dispatches to `next_token` after peeking a character the
/// state is registered for; the state then owns the scanner until it
/// returns a token. A state that consumes nothing must return a token with
/// an empty value, which the driver degrades to a single-character
/// `Unknown` token to guarantee forward progress.
pub trait State {
    /// Produces the next token from the stream, starting at the character
    /// the tokenizer dispatched on.
    fn next_token(&self, scanner: &mut PushbackScanner, tokenizer: &Tokenizer) -> Token;

    /// Encodes a raw string value into this state's source form, if the
    /// state has one (quote states wrap and escape).
    fn encode_string(&self, _value: &str, _quote: char) -> Option<String> {
        None
    }

    /// Decodes a token value back into its raw form, if the state supports
    /// decoding. The tokenizer driver applies this when its `decode_strings`
    /// option is set.
    fn decode_string(&self, _value: &str, _quote: char) -> Option<String> {
        None
    }
}
