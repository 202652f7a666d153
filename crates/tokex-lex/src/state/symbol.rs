//! Symbol state.

use crate::scanner::PushbackScanner;
use crate::state::State;
use crate::token::{Token, TokenType};
use crate::tokenizer::Tokenizer;

/// Consumes an operator or punctuation symbol.
///
/// Any single character dispatched to this state is a valid symbol on its
/// own. Multi-character symbols are registered with
/// [`add`](SymbolState::add) and matched greedily: the state reads as far
/// as a registered symbol could extend and pushes back whatever did not
/// belong to the longest registered match.
///
/// The default set registers `!=`, `<=` and `>=`.
pub struct SymbolState {
    root: SymbolNode,
}

/// One node of the symbol trie. A node with a token type marks the end of
/// a registered symbol.
#[derive(Default)]
struct SymbolNode {
    children: Vec<(char, SymbolNode)>,
    token_type: Option<TokenType>,
}

impl SymbolNode {
    fn child(&self, symbol: char) -> Option<&SymbolNode> {
        self.children
            .iter()
            .find(|(c, _)| *c == symbol)
            .map(|(_, node)| node)
    }

    fn child_mut(&mut self, symbol: char) -> &mut SymbolNode {
        if let Some(index) = self.children.iter().position(|(c, _)| *c == symbol) {
            &mut self.children[index].1
        } else {
            self.children.push((symbol, SymbolNode::default()));
            let last = self.children.len() - 1;
            &mut self.children[last].1
        }
    }
}

impl SymbolState {
    /// Creates a symbol state with the default multi-character symbols.
    pub fn new() -> Self {
        let mut state = Self::empty();
        state.add("!=", TokenType::Symbol);
        state.add("<=", TokenType::Symbol);
        state.add(">=", TokenType::Symbol);
        state
    }

    /// Creates a symbol state with no registered multi-character symbols.
    pub fn empty() -> Self {
        Self {
            root: SymbolNode::default(),
        }
    }

    /// Registers a multi-character symbol and the token type to report
    /// for it.
    pub fn add(&mut self, symbol: &str, token_type: TokenType) {
        let mut node = &mut self.root;
        for c in symbol.chars() {
            node = node.child_mut(c);
        }
        node.token_type = Some(token_type);
    }
}

impl Default for SymbolState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for SymbolState {
    fn next_token(&self, scanner: &mut PushbackScanner, _tokenizer: &Tokenizer) -> Token {
        let position = scanner.position();
        let mut consumed: Vec<char> = Vec::new();
        let mut node = &self.root;
        let mut best_len = 0;
        let mut best_type = TokenType::Symbol;

        while let Some(symbol) = scanner.peek() {
            let Some(child) = node.child(symbol) else {
                break;
            };
            scanner.read();
            consumed.push(symbol);
            node = child;
            if let Some(token_type) = child.token_type {
                best_len = consumed.len();
                best_type = token_type;
            }
        }

        // A single character is always a valid symbol, even unregistered.
        let keep = if best_len > 0 {
            best_len
        } else if consumed.is_empty() {
            match scanner.read() {
                Some(symbol) => consumed.push(symbol),
                None => return Token::new(TokenType::Symbol, String::new(), position),
            }
            1
        } else {
            1
        };

        for &symbol in consumed[keep..].iter().rev() {
            scanner.pushback(symbol);
        }
        let value: String = consumed[..keep].iter().collect();
        Token::new(best_type, value, position)
    }
}
