//! Grammar rules, from the lowest to the highest precedence:
//!
//! ```text
//! Expression := Term (('+' | '-') Term)*
//! Term       := Power (('*' | '/') Power)*
//! Power      := Unary ('^' Unary)*
//! Unary      := Function Primary | Primary
//! Primary    := '(' Expression ')' | Number | Variable
//! ```
//!
//! Every binary level is left-associative, including `^`. A `+` or `-` sign directly followed
//! by digits in primary position is part of the number.

use std::ops::Range;
use symdiff_error::Error;
use symdiff_tree::{NodeId, Precedence, Var};
use super::{error, Parser, MAX_DEPTH};
use crate::tokenizer::{Token, TokenKind};

impl Parser<'_> {
    /// Parses a full expression.
    pub(crate) fn parse_expr(&mut self) -> Result<NodeId, Error> {
        self.parse_level(Precedence::Term)
    }

    /// Parses a chain of binary operations of the given precedence.
    fn parse_level(&mut self, precedence: Precedence) -> Result<NodeId, Error> {
        let mut lhs = self.parse_operand(precedence)?;

        while let Some(op) = self.peek_token()
            .and_then(|token| token.kind.as_binary_op())
            .filter(|op| op.precedence() == precedence)
        {
            self.next_token();
            let rhs = self.parse_operand(precedence)?;
            lhs = self.tree.binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    /// Parses an operand of a binary operation of the given precedence.
    fn parse_operand(&mut self, precedence: Precedence) -> Result<NodeId, Error> {
        match precedence.next() {
            Some(next) => self.parse_level(next),
            None => self.parse_unary(),
        }
    }

    /// Increases the nesting depth for the bracket or function at the given span.
    fn enter(&mut self, span: Range<usize>) -> Result<(), Error> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::new(vec![span], error::NestingTooDeep { limit: MAX_DEPTH }));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_unary(&mut self) -> Result<NodeId, Error> {
        let Some(func) = self.peek_token().and_then(|token| token.kind.as_function()) else {
            return self.parse_primary();
        };

        let span = self.span();
        self.next_token();
        self.enter(span)?;
        let operand = self.parse_primary()?;
        self.leave();

        Ok(self.tree.unary(func, operand))
    }

    fn parse_primary(&mut self) -> Result<NodeId, Error> {
        let err = self.error(error::EmptyNumber);
        let Some(token) = self.next_token() else {
            return Err(err);
        };

        match token.kind {
            TokenKind::OpenParen => {
                self.enter(token.span.clone())?;
                let inner = self.parse_expr()?;
                if self.next_token_if(TokenKind::CloseParen).is_none() {
                    return Err(Error::new(
                        vec![self.span(), token.span],
                        error::MissingClosingBracket,
                    ));
                }
                self.leave();
                Ok(inner)
            },
            TokenKind::Int | TokenKind::Float => self.parse_number(&token, 1.0, err),
            TokenKind::Add | TokenKind::Sub => {
                // the sign must be glued to the digits
                match self.current_token() {
                    Some(number) if number.kind.is_number() => {
                        let number = number.clone();
                        self.cursor += 1;
                        let sign = if token.kind == TokenKind::Sub { -1.0 } else { 1.0 };
                        self.parse_number(&number, sign, err)
                    },
                    _ => Err(err),
                }
            },
            TokenKind::Var => {
                let var = token.lexeme.chars().next().and_then(Var::from_char).ok_or(err)?;
                Ok(self.tree.var(var))
            },
            _ => Err(err),
        }
    }

    fn parse_number(&mut self, token: &Token, sign: f64, err: Error) -> Result<NodeId, Error> {
        let value = token.lexeme.parse::<f64>().map_err(|_| err)?;
        if !value.is_finite() {
            return Err(Error::new(vec![token.span.clone()], error::NumberOutOfRange));
        }
        Ok(self.tree.constant(sign * value))
    }
}
