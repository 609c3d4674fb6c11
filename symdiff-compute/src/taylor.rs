//! Truncated Taylor series expansion.
//!
//! The expansion of `f` around `a` up to order `n` is
//!
//! ```text
//! f(a) + f'(a)*(x - a) + f''(a)/2!*(x - a)^2 + ... + f⁽ⁿ⁾(a)/n!*(x - a)^n
//! ```
//!
//! Each coefficient is found by differentiating the previous derivative, substituting the
//! expansion point into a copy of it, and simplifying the copy down to a constant.

use ariadne::Fmt;
use log::debug;
use std::ops::Range;
use symdiff_attrs::ErrorKind;
use symdiff_error::{Error, ErrorKind, EXPR};
use symdiff_tree::{BinOp, NodeId, Tree, Var};
use super::{
    derivative::take_derivative,
    eval::{reduce, EvalError},
    simplify::simplify,
};

/// A Taylor coefficient still depends on a variable after the expansion point was substituted.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the coefficient of order {} is not a constant", self.order),
    labels = [format!("this {} depends on more than one variable", "expression".fg(EXPR))],
    help = "only expressions of a single variable can be expanded",
)]
pub struct NonConstantCoefficient {
    /// The order of the offending coefficient.
    pub order: usize,
}

/// A Taylor coefficient is undefined at the expansion point.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the coefficient of order {} is undefined", self.order),
    labels = [format!("this {} or one of its derivatives is undefined at the expansion point", "expression".fg(EXPR))],
    help = "try expanding around a different point with `--at`",
)]
pub struct UndefinedCoefficient {
    /// The order of the offending coefficient.
    pub order: usize,
}

/// The highest order a series can be expanded to. `170!` is the largest factorial that fits in
/// an `f64`.
pub const MAX_ORDER: usize = 170;

/// The requested order is above [`MAX_ORDER`].
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot expand to order {}", self.order),
    labels = [format!("this {} can only be expanded up to order {}", "expression".fg(EXPR), MAX_ORDER)],
    help = format!("the factorial of orders above {} does not fit in a 64-bit float", MAX_ORDER),
)]
pub struct OrderTooHigh {
    /// The requested order.
    pub order: usize,
}

/// An error that can occur when expanding a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TaylorError {
    NonConstant(NonConstantCoefficient),
    Undefined(UndefinedCoefficient),
    TooHigh(OrderTooHigh),
}

impl TaylorError {
    fn new(err: EvalError, order: usize) -> Self {
        match err {
            EvalError::NotConstant => TaylorError::NonConstant(NonConstantCoefficient { order }),
            EvalError::Undefined => TaylorError::Undefined(UndefinedCoefficient { order }),
        }
    }

    /// Returns the order of the coefficient that could not be computed, or the requested order if
    /// it was too high.
    pub fn order(&self) -> usize {
        match self {
            TaylorError::NonConstant(kind) => kind.order,
            TaylorError::Undefined(kind) => kind.order,
            TaylorError::TooHigh(kind) => kind.order,
        }
    }

    /// Converts this error into a reportable [`Error`] that points at the given span, which
    /// should cover the whole input expression.
    pub fn into_error(self, span: Range<usize>) -> Error {
        match self {
            TaylorError::NonConstant(kind) => Error::new(vec![span], kind),
            TaylorError::Undefined(kind) => Error::new(vec![span], kind),
            TaylorError::TooHigh(kind) => Error::new(vec![span], kind),
        }
    }
}

/// Builds the term `(var - point)^order / factorial * coefficient` in the given tree, without
/// linking it to the root. The base is just `var` when expanding around zero.
fn build_term(tree: &mut Tree, var: Var, point: f64, order: usize, factorial: f64, coefficient: f64) -> NodeId {
    let var = tree.var(var);
    let base = if point == 0.0 {
        var
    } else {
        let point = tree.constant(point);
        tree.binary(BinOp::Sub, var, point)
    };

    let exponent = tree.constant(order as f64);
    let power = tree.binary(BinOp::Pow, base, exponent);
    let factorial = tree.constant(factorial);
    let quotient = tree.binary(BinOp::Div, power, factorial);
    let coefficient = tree.constant(coefficient);
    tree.binary(BinOp::Mul, quotient, coefficient)
}

/// Expands the tree into its Taylor polynomial of the given order around `var = point`. The
/// input tree is not modified.
///
/// Orders above [`MAX_ORDER`] are rejected before anything is computed.
///
/// ```
/// use symdiff_compute::taylor::taylor_at;
/// use symdiff_parser::parse;
/// use symdiff_tree::Var;
///
/// let tree = parse("x^2").unwrap();
/// let series = taylor_at(&tree, Var::X, 1.0, 2).unwrap();
/// assert_eq!(series.to_string(), "1 + (x - 1)*2 + (x - 1)^2/2*2");
/// ```
pub fn taylor_at(tree: &Tree, var: Var, point: f64, order: usize) -> Result<Tree, TaylorError> {
    if order > MAX_ORDER {
        return Err(TaylorError::TooHigh(OrderTooHigh { order }));
    }

    let mut current = tree.copy();
    let mut series = Tree::new();
    let mut factorial = 1.0;

    for i in 0..=order {
        if i > 0 {
            take_derivative(&mut current, var);
            factorial *= i as f64;
        }

        let mut at_point = current.copy();
        at_point.substitute(var, point);
        let coefficient = reduce(at_point).map_err(|err| TaylorError::new(err, i))?;
        debug!("taylor coefficient {}: {}", i, coefficient);

        let term = build_term(&mut series, var, point, i, factorial, coefficient);
        let root = if series.is_empty() {
            term
        } else {
            let sum = series.root();
            series.binary(BinOp::Add, sum, term)
        };
        series.set_root(root);
        series.set_parents();
        simplify(&mut series);
    }

    Ok(series)
}

/// Expands the tree into its Taylor polynomial of the given order around `var = 0`.
pub fn taylor(tree: &Tree, var: Var, order: usize) -> Result<Tree, TaylorError> {
    taylor_at(tree, var, 0.0, order)
}
