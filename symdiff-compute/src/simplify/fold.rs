//! Constant folding.

use symdiff_tree::{BinOp, NodeId, NodeKind, Tree, UnaryFn};

/// The outcome of trying to fold a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fold {
    /// The node evaluates to this value.
    Value(f64),

    /// The node is an operation on constants outside of its domain.
    Undefined,

    /// The node cannot be folded.
    Skip,
}

impl Fold {
    /// Wraps a computed value, treating non-finite results as undefined.
    fn finite(value: f64) -> Self {
        if value.is_finite() {
            Fold::Value(value)
        } else {
            Fold::Undefined
        }
    }
}

/// Folds a binary operation on the given constants.
pub fn fold_binary(op: BinOp, lhs: f64, rhs: f64) -> Fold {
    let value = match op {
        BinOp::Add => lhs + rhs,
        BinOp::Sub => lhs - rhs,
        BinOp::Mul => lhs * rhs,
        BinOp::Div if rhs == 0.0 => return Fold::Undefined,
        BinOp::Div => lhs / rhs,
        BinOp::Pow => lhs.powf(rhs),
    };
    Fold::finite(value)
}

/// Folds a unary function of the given constant.
pub fn fold_unary(func: UnaryFn, arg: f64) -> Fold {
    let value = match func {
        UnaryFn::Sin => arg.sin(),
        UnaryFn::Cos => arg.cos(),
        UnaryFn::Tan => arg.tan(),
        // `cot(0)` stays unevaluated rather than becoming an error
        UnaryFn::Cot if arg == 0.0 => return Fold::Skip,
        UnaryFn::Cot => arg.tan().recip(),
        UnaryFn::Sqrt if arg < 0.0 => return Fold::Undefined,
        UnaryFn::Sqrt => arg.sqrt(),
        UnaryFn::Ln if arg <= 0.0 => return Fold::Undefined,
        UnaryFn::Ln => arg.ln(),
        UnaryFn::Exp => arg.exp(),
    };
    Fold::finite(value)
}

/// Tries to fold the given node. Only operations whose operands are all constants can be folded;
/// an error operand blocks folding.
pub fn fold_node(tree: &Tree, id: NodeId) -> Fold {
    match tree.kind(id) {
        NodeKind::Binary(op) => {
            match (tree.kind(tree.left(id)).as_const(), tree.kind(tree.right(id)).as_const()) {
                (Some(lhs), Some(rhs)) => fold_binary(op, lhs, rhs),
                _ => Fold::Skip,
            }
        },
        NodeKind::Unary(func) => match tree.kind(tree.right(id)).as_const() {
            Some(arg) => fold_unary(func, arg),
            None => Fold::Skip,
        },
        _ => Fold::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        assert_eq!(fold_binary(BinOp::Sub, 2.0, 5.0), Fold::Value(-3.0));
        assert_eq!(fold_binary(BinOp::Pow, 2.0, 10.0), Fold::Value(1024.0));
        assert_eq!(fold_binary(BinOp::Pow, 0.0, 0.0), Fold::Value(1.0));
    }

    #[test]
    fn domain_errors() {
        assert_eq!(fold_binary(BinOp::Div, 1.0, 0.0), Fold::Undefined);
        assert_eq!(fold_binary(BinOp::Div, 0.0, -0.0), Fold::Undefined);
        assert_eq!(fold_binary(BinOp::Pow, -8.0, 0.5), Fold::Undefined);
        assert_eq!(fold_binary(BinOp::Pow, 0.0, -1.0), Fold::Undefined);
        assert_eq!(fold_unary(UnaryFn::Sqrt, -1.0), Fold::Undefined);
        assert_eq!(fold_unary(UnaryFn::Ln, 0.0), Fold::Undefined);
        assert_eq!(fold_unary(UnaryFn::Exp, 1000.0), Fold::Undefined);
    }

    #[test]
    fn functions() {
        assert_eq!(fold_unary(UnaryFn::Sqrt, 0.0), Fold::Value(0.0));
        assert_eq!(fold_unary(UnaryFn::Ln, 1.0), Fold::Value(0.0));
        assert_eq!(fold_unary(UnaryFn::Cos, 0.0), Fold::Value(1.0));
        assert_eq!(fold_unary(UnaryFn::Cot, 0.0), Fold::Skip);
    }
}
