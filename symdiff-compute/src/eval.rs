//! Numeric evaluation of expression trees by substitution and simplification.

use std::fmt;
use symdiff_tree::{NodeKind, Tree, Var};
use super::simplify::simplify;

/// An error that can occur when evaluating a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// The tree still contains a variable after substitution.
    NotConstant,

    /// The tree is undefined at the given point, such as `ln(x)` at `x = 0`.
    Undefined,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::NotConstant => write!(f, "expression does not reduce to a constant"),
            EvalError::Undefined => write!(f, "expression is undefined at this point"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Simplifies the tree and returns its value if it reduced to a single constant.
pub(crate) fn reduce(mut tree: Tree) -> Result<f64, EvalError> {
    simplify(&mut tree);
    match tree.kind(tree.root()) {
        NodeKind::Const(value) => Ok(value),
        _ if tree.has_var(tree.root()) => Err(EvalError::NotConstant),
        _ => Err(EvalError::Undefined),
    }
}

/// Evaluates the tree at the given values of `x` and `y`. The tree is not modified.
///
/// ```
/// use symdiff_compute::eval::evaluate;
/// use symdiff_parser::parse;
///
/// let tree = parse("x^2 + 3*y").unwrap();
/// assert_eq!(evaluate(&tree, 2.0, 1.0), Ok(7.0));
/// ```
pub fn evaluate(tree: &Tree, x: f64, y: f64) -> Result<f64, EvalError> {
    let mut copy = tree.copy();
    copy.substitute(Var::X, x);
    copy.substitute(Var::Y, y);
    reduce(copy)
}

#[cfg(test)]
mod tests {
    use symdiff_parser::parse;
    use super::*;

    #[test]
    fn substitutes_both_variables() {
        let tree = parse("x/y - 1").unwrap();
        assert_eq!(evaluate(&tree, 3.0, 2.0), Ok(0.5));
        assert_eq!(tree.to_string(), "x/y - 1");
    }

    #[test]
    fn undefined_points() {
        let tree = parse("ln(x)").unwrap();
        assert_eq!(evaluate(&tree, 0.0, 0.0), Err(EvalError::Undefined));

        let tree = parse("cot(x)").unwrap();
        assert_eq!(evaluate(&tree, 0.0, 0.0), Err(EvalError::Undefined));

        let tree = parse("x^0.5").unwrap();
        assert_eq!(evaluate(&tree, -4.0, 0.0), Err(EvalError::Undefined));
    }

    #[test]
    fn partial_substitution() {
        let mut tree = parse("x*y + 1").unwrap();
        assert_eq!(tree.substitute(Var::X, 2.0), 1);
        assert_eq!(reduce(tree), Err(EvalError::NotConstant));
    }
}
