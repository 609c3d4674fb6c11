//! Tokenizer and parser for `symdiff` expressions.
//!
//! The grammar covers numeric constants, the variables `x` and `y`, the binary operators
//! `+ - * / ^`, and the unary functions `sin cos tan cot sqrt ln exp` (`ctg` is accepted as a
//! spelling of `cot`). See [`parse`] for the entry point.

pub mod parser;
pub mod tokenizer;

pub use parser::{error, parse, Parser, MAX_DEPTH};
