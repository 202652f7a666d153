//! tokex-lex - A Reusable Lexical-Analysis Framework
//!
//! This crate converts raw text into a stream of classified tokens through
//! a pluggable, character-interval-dispatched state machine. It is the
//! foundation the tokex expression calculator is built on, and it is
//! equally usable for template dialects or small domain languages.
//!
//! # Overview
//!
//! A [`Tokenizer`] maps character intervals to [`State`] handlers. To
//! produce a token it peeks one character from a [`PushbackScanner`], looks
//! up the responsible state, and hands the scanner over; the state consumes
//! a run of characters and returns a [`Token`]. Characters no state claims
//! come back as `Unknown` tokens rather than errors, so the tokenizer never
//! fails on malformed input.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use tokex_lex::{Tokenizer, TokenType, WhitespaceState, WordState};
//!
//! let mut tokenizer = Tokenizer::new();
//! tokenizer.set_character_state('a', 'z', Rc::new(WordState::new()));
//! tokenizer.set_character_state('A', 'Z', Rc::new(WordState::new()));
//! tokenizer.set_character_state('\0', ' ', Rc::new(WhitespaceState::new()));
//! tokenizer.skip_whitespaces = true;
//!
//! let words: Vec<_> = tokenizer
//!     .tokenize("The quick fox")
//!     .into_iter()
//!     .filter(|t| t.token_type() == TokenType::Word)
//!     .map(|t| t.value().to_string())
//!     .collect();
//! assert_eq!(words, ["The", "quick", "fox"]);
//! ```
//!
//! # Module Structure
//!
//! - [`scanner`] - character stream with unlimited pushback
//! - [`charmap`] - interval-to-value character map
//! - [`token`] - token and token-type definitions
//! - [`state`] - per-character-class state handlers
//! - [`tokenizer`] - the driver composing the above

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod charmap;
pub mod scanner;
pub mod state;
pub mod token;
pub mod tokenizer;

pub use charmap::CharIntervalMap;
pub use scanner::PushbackScanner;
pub use state::{
    ConstantState, CppCommentState, NumberState, QuoteState, State, SymbolState, WhitespaceState,
    WordState,
};
pub use token::{Token, TokenType};
pub use tokenizer::{TokenStream, Tokenizer};
