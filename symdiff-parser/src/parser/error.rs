//! Kinds of syntax errors reported by the parser.

use ariadne::Fmt;
use symdiff_attrs::ErrorKind;
use symdiff_error::{ErrorKind, EXPR};

/// Expected an operand (a number, a variable, or a bracketed expression), but found something
/// else or nothing at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a number",
    labels = [format!("I expected a number, a variable or an {} here", "opening bracket".fg(EXPR))],
    help = "operands can be numbers like `2.5`, the variables `x` and `y`, or expressions in brackets",
)]
pub struct EmptyNumber;

/// An opening bracket was never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing closing bracket",
    labels = [
        format!("I expected a {} here", "`)`".fg(EXPR)),
        "this bracket is never closed".to_string(),
    ],
    help = "add a `)` to close the bracket",
)]
pub struct MissingClosingBracket;

/// A number literal is too large to be represented.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "number is too large",
    labels = ["this number does not fit in a 64-bit float"],
)]
pub struct NumberOutOfRange;

/// A complete expression was parsed, but there is more input after it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected content after the expression",
    labels = [format!("I could not understand the remaining {} here", "input".fg(EXPR))],
    help = "there may be a missing operator, or a function name may be misspelled",
)]
pub struct TrailingContent;

/// Brackets and function calls are nested deeper than the parser allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expression is nested more than {} levels deep", self.limit),
    labels = ["this is too deeply nested"],
    help = "try to simplify the expression by hand first",
)]
pub struct NestingTooDeep {
    /// The maximum nesting depth.
    pub limit: usize,
}
