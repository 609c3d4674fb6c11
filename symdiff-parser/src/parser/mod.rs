pub mod error;
mod expr;

use log::trace;
use std::ops::Range;
use symdiff_error::{Error, ErrorKind};
use symdiff_tree::Tree;
use super::tokenizer::{tokenize_complete, Token, TokenKind};

/// The maximum number of brackets and function calls that may enclose an operand.
pub const MAX_DEPTH: usize = 512;

/// A recursive-descent parser that builds an expression [`Tree`] from source text.
///
/// Parsing stops at the first error. No partial tree is returned.
#[derive(Debug)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The number of brackets and function calls enclosing the current position.
    depth: usize,

    /// The tree being built.
    tree: Tree,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            depth: 0,
            tree: Tree::new(),
        }
    }

    /// Creates an error that points at the next non-whitespace token, or the end of the source
    /// code if there are no more tokens.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the next non-whitespace token, or the end of the source code if there
    /// are no more tokens.
    pub fn span(&self) -> Range<usize> {
        self.peek_token().map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor..].iter().find(|token| !token.is_whitespace())
    }

    /// Returns the token directly at the cursor, whitespace included.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    pub fn next_token(&mut self) -> Option<Token<'source>> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // cloning is cheap: only Range<_> is cloned
                return Some(token.clone());
            }
        }

        None
    }

    /// Consumes the next non-whitespace token if it has the given kind.
    pub fn next_token_if(&mut self, kind: TokenKind) -> Option<Token<'source>> {
        if self.peek_token()?.kind == kind {
            self.next_token()
        } else {
            None
        }
    }

    /// Parses the whole source as a single expression. The returned tree has its parent links
    /// set.
    pub fn parse(mut self) -> Result<Tree, Error> {
        let root = self.parse_expr()?;
        if let Some(token) = self.peek_token() {
            let start = token.span.start;
            return Err(Error::new(vec![start..self.eof_span().end], error::TrailingContent));
        }

        self.tree.set_root(root);
        self.tree.set_parents();
        trace!("parsed {} nodes: {}", self.tree.len(), self.tree);
        Ok(self.tree)
    }
}

/// Parses the given source into an expression tree.
///
/// ```
/// use symdiff_parser::parse;
///
/// let tree = parse("x^2 + sin(y)").unwrap();
/// assert_eq!(tree.to_string(), "x^2 + sin(y)");
/// ```
pub fn parse(source: &str) -> Result<Tree, Error> {
    Parser::new(source).parse()
}
