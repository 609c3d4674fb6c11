use logos::Logos;
use std::ops::Range;
use symdiff_tree::{BinOp, UnaryFn};

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[\n\r]+")]
    NewLine,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("sin")]
    Sin,

    #[token("cos")]
    Cos,

    #[token("tan")]
    Tan,

    #[token("cot")]
    #[token("ctg")]
    Cot,

    #[token("sqrt")]
    Sqrt,

    #[token("ln")]
    Ln,

    #[token("exp")]
    ExpFn,

    #[regex(r"[xy]")]
    Var,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Float,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::NewLine)
    }

    /// Returns true if the token is a numeric literal.
    pub fn is_number(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float)
    }

    /// Returns the binary operator this token represents, if any.
    pub fn as_binary_op(self) -> Option<BinOp> {
        match self {
            TokenKind::Add => Some(BinOp::Add),
            TokenKind::Sub => Some(BinOp::Sub),
            TokenKind::Mul => Some(BinOp::Mul),
            TokenKind::Div => Some(BinOp::Div),
            TokenKind::Exp => Some(BinOp::Pow),
            _ => None,
        }
    }

    /// Returns the unary function this token names, if any.
    pub fn as_function(self) -> Option<UnaryFn> {
        match self {
            TokenKind::Sin => Some(UnaryFn::Sin),
            TokenKind::Cos => Some(UnaryFn::Cos),
            TokenKind::Tan => Some(UnaryFn::Tan),
            TokenKind::Cot => Some(UnaryFn::Cot),
            TokenKind::Sqrt => Some(UnaryFn::Sqrt),
            TokenKind::Ln => Some(UnaryFn::Ln),
            TokenKind::ExpFn => Some(UnaryFn::Exp),
            _ => None,
        }
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from, in characters.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
