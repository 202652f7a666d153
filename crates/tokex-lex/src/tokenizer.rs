//! Tokenizer driver.
//!
//! The [`Tokenizer`] composes a character-to-state dispatch table, a
//! scanner, and a set of post-processing options into a token stream. The
//! driver itself raises no errors: malformed input degrades to `Unknown`
//! tokens, which callers may skip or inspect.

use std::rc::Rc;

use crate::charmap::CharIntervalMap;
use crate::scanner::PushbackScanner;
use crate::state::{State, SymbolState};
use crate::token::{Token, TokenType};

/// A configurable, interval-dispatched tokenizer.
///
/// Character ranges are mapped to state handlers with
/// [`set_character_state`](Tokenizer::set_character_state); later mappings
/// shadow earlier ones, so a broad range can be registered first and
/// exceptions carved out afterwards. The dispatch table is configured once
/// and treated as read-only during tokenization, which is why a single
/// tokenizer can drive any number of passes.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use tokex_lex::{Tokenizer, TokenType, WordState, WhitespaceState};
///
/// let mut tokenizer = Tokenizer::new();
/// tokenizer.set_character_state('a', 'z', Rc::new(WordState::new()));
/// tokenizer.set_character_state('\0', ' ', Rc::new(WhitespaceState::new()));
/// tokenizer.skip_whitespaces = true;
///
/// let tokens = tokenizer.tokenize("ab cd");
/// assert_eq!(tokens[0].value(), "ab");
/// assert_eq!(tokens.last().unwrap().token_type(), TokenType::Eof);
/// ```
pub struct Tokenizer {
    states: CharIntervalMap<Rc<dyn State>>,
    symbol_state: Rc<SymbolState>,

    /// Drop `Unknown` tokens instead of reporting them.
    pub skip_unknown: bool,
    /// Drop `Comment` tokens.
    pub skip_comments: bool,
    /// Drop a `Whitespace` token when the previous token was also
    /// whitespace, collapsing runs across other skip decisions.
    pub skip_whitespaces: bool,
    /// Collapse every reported `Whitespace` token's value to one space.
    pub merge_whitespaces: bool,
    /// Remap `Integer`, `Float` and `HexDecimal` to the unified `Number`.
    pub unify_numbers: bool,
    /// Do not synthesize a terminal `Eof` token.
    pub skip_eof: bool,
    /// Replace token values with their decoded form for states that
    /// support decoding (quote states).
    pub decode_strings: bool,
}

impl Tokenizer {
    /// Creates a tokenizer with an empty dispatch table, a default symbol
    /// state, and all options off.
    pub fn new() -> Self {
        Self {
            states: CharIntervalMap::new(),
            symbol_state: Rc::new(SymbolState::new()),
            skip_unknown: false,
            skip_comments: false,
            skip_whitespaces: false,
            merge_whitespaces: false,
            unify_numbers: false,
            skip_eof: false,
            decode_strings: false,
        }
    }

    /// Maps a character range to a state handler. Later mappings shadow
    /// earlier ones.
    pub fn set_character_state(&mut self, from: char, to: char, state: Rc<dyn State>) {
        self.states.add_interval(from, to, state);
    }

    /// Removes all character-to-state mappings.
    pub fn clear_character_states(&mut self) {
        self.states.clear();
    }

    /// Returns the state registered for a character, if any.
    pub fn character_state(&self, symbol: char) -> Option<Rc<dyn State>> {
        self.states.lookup(symbol).cloned()
    }

    /// The symbol state that comment and number states delegate to when
    /// their input turns out to be a plain symbol.
    pub fn symbol_state(&self) -> &Rc<SymbolState> {
        &self.symbol_state
    }

    /// Replaces the delegation symbol state. The caller is responsible for
    /// also mapping it into the dispatch table if it should receive
    /// characters directly.
    pub fn set_symbol_state(&mut self, state: Rc<SymbolState>) {
        self.symbol_state = state;
    }

    /// Starts a tokenization pass over `source`.
    pub fn stream(&self, source: &str) -> TokenStream<'_> {
        TokenStream {
            tokenizer: self,
            scanner: PushbackScanner::new(source),
            pending: None,
            last_type: TokenType::Unknown,
        }
    }

    /// Drains `source` into a vector of tokens.
    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        self.stream(source).collect()
    }

    /// Drains `source` into a vector of raw token values.
    pub fn tokenize_to_strings(&self, source: &str) -> Vec<String> {
        self.stream(source).map(|t| t.value().to_string()).collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// One tokenization pass: a scanner plus a one-token lookahead cache.
///
/// A stream is created per pass and is not safe to share; the tokenizer
/// it borrows from stays immutable for the duration.
pub struct TokenStream<'t> {
    tokenizer: &'t Tokenizer,
    scanner: PushbackScanner,
    pending: Option<Token>,
    last_type: TokenType,
}

impl TokenStream<'_> {
    /// Returns true if another token is available, reading and caching it
    /// if necessary.
    pub fn has_next_token(&mut self) -> bool {
        if self.pending.is_none() {
            self.pending = self.read_next_token();
        }
        self.pending.is_some()
    }

    /// Returns the next token, or `None` once the pass is finished.
    pub fn next_token(&mut self) -> Option<Token> {
        match self.pending.take() {
            Some(token) => Some(token),
            None => self.read_next_token(),
        }
    }

    fn read_next_token(&mut self) -> Option<Token> {
        let mut token = None;

        loop {
            let Some(next_char) = self.scanner.peek() else {
                break;
            };
            let state = self.tokenizer.character_state(next_char);
            let position = self.scanner.position();

            let produced = state
                .as_ref()
                .map(|s| s.next_token(&mut self.scanner, self.tokenizer));

            // Unknown-character and endless-loop safety net: any state that
            // failed to advance degrades to a single-character token.
            let mut tok = match produced {
                Some(t) if !t.value().is_empty() => t,
                _ => match self.scanner.read() {
                    Some(c) => Token::new(TokenType::Unknown, c.to_string(), position),
                    None => break,
                },
            };

            if tok.token_type() == TokenType::Unknown && self.tokenizer.skip_unknown {
                self.last_type = tok.token_type();
                continue;
            }

            if self.tokenizer.decode_strings {
                if let Some(decoded) = state
                    .as_ref()
                    .and_then(|s| s.decode_string(tok.value(), next_char))
                {
                    tok = Token::new(tok.token_type(), decoded, tok.position());
                }
            }

            if tok.token_type() == TokenType::Comment && self.tokenizer.skip_comments {
                self.last_type = tok.token_type();
                continue;
            }

            if tok.token_type() == TokenType::Whitespace {
                if self.last_type == TokenType::Whitespace && self.tokenizer.skip_whitespaces {
                    self.last_type = tok.token_type();
                    continue;
                }
                if self.tokenizer.merge_whitespaces {
                    tok = Token::new(TokenType::Whitespace, " ", tok.position());
                }
            }

            if self.tokenizer.unify_numbers
                && matches!(
                    tok.token_type(),
                    TokenType::Integer | TokenType::Float | TokenType::HexDecimal
                )
            {
                tok = Token::new(TokenType::Number, tok.value().to_string(), tok.position());
            }

            token = Some(tok);
            break;
        }

        if token.is_none() && self.last_type != TokenType::Eof && !self.tokenizer.skip_eof {
            token = Some(Token::new(
                TokenType::Eof,
                String::new(),
                self.scanner.position(),
            ));
        }

        self.last_type = token
            .as_ref()
            .map_or(TokenType::Eof, |t| t.token_type());
        token
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
