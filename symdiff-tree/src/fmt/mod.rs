//! Renderers for expression trees.
//!
//! Every renderer reads the tree through [`NodeView`] and never relies on parent links, so a tree
//! can be rendered right after construction, before [`Tree::set_parents`] is called.

pub mod dot;
pub mod latex;

use std::fmt::{self, Display, Formatter};
use super::{BinOp, NodeKind, NodeView, Tree};

/// Which operand of a binary operation a node is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Returns true if the given operand of a binary operation must be wrapped in parentheses for
/// the infix rendering to parse back into the same tree.
pub(crate) fn needs_parens(operand: &NodeView, op: BinOp, side: Side) -> bool {
    if op == BinOp::Pow {
        return !operand.kind().is_leaf()
            || operand.value().map_or(false, f64::is_sign_negative);
    }

    // all binary operators are left-associative
    match operand.binary_op() {
        Some(inner) => inner.precedence() < op.precedence()
            || (side == Side::Right && inner.precedence() == op.precedence()),
        None => false,
    }
}

/// A piece of output waiting on the render stack.
pub(crate) enum Piece<'a> {
    /// A subtree that has not been expanded yet.
    Node(NodeView<'a>),
    Text(&'static str),
}

/// Writes the subtree rooted at `root` using an explicit stack, so that the depth of the tree is
/// not limited by the call stack.
///
/// `expand` is called once per node in output order. Leaves are written directly to the
/// formatter; other nodes push the pieces they are made of, in order, to the given buffer.
pub(crate) fn write_pieces<'a>(
    f: &mut Formatter,
    root: NodeView<'a>,
    mut expand: impl FnMut(&mut Formatter, NodeView<'a>, &mut Vec<Piece<'a>>) -> fmt::Result,
) -> fmt::Result {
    let mut stack = vec![Piece::Node(root)];
    let mut pieces = Vec::new();

    while let Some(piece) = stack.pop() {
        match piece {
            Piece::Text(text) => f.write_str(text)?,
            Piece::Node(node) => {
                expand(f, node, &mut pieces)?;
                stack.extend(pieces.drain(..).rev());
            },
        }
    }

    Ok(())
}

/// Pushes an operand of a binary operation, between the given delimiters if it needs them.
pub(crate) fn push_operand<'a>(
    pieces: &mut Vec<Piece<'a>>,
    operand: Option<NodeView<'a>>,
    op: BinOp,
    side: Side,
    (open, close): (&'static str, &'static str),
) {
    let Some(operand) = operand else {
        return;
    };

    if needs_parens(&operand, op, side) {
        pieces.extend([Piece::Text(open), Piece::Node(operand), Piece::Text(close)]);
    } else {
        pieces.push(Piece::Node(operand));
    }
}

fn expand_infix<'a>(
    f: &mut Formatter,
    node: NodeView<'a>,
    pieces: &mut Vec<Piece<'a>>,
) -> fmt::Result {
    match node.kind() {
        NodeKind::Nil => {},
        NodeKind::Const(value) => write!(f, "{}", value)?,
        NodeKind::Var(var) => write!(f, "{}", var)?,
        NodeKind::Error => f.write_str("error")?,
        NodeKind::Unary(func) => {
            pieces.extend([Piece::Text(func.name()), Piece::Text("(")]);
            pieces.extend(node.right().map(Piece::Node));
            pieces.push(Piece::Text(")"));
        },
        NodeKind::Binary(op) => {
            push_operand(pieces, node.left(), op, Side::Left, ("(", ")"));
            match op {
                BinOp::Add | BinOp::Sub => {
                    pieces.extend([Piece::Text(" "), Piece::Text(op.symbol()), Piece::Text(" ")]);
                },
                _ => pieces.push(Piece::Text(op.symbol())),
            }
            push_operand(pieces, node.right(), op, Side::Right, ("(", ")"));
        },
    }
    Ok(())
}

/// Formats the subtree rooted at the viewed node as infix text that the parser accepts.
impl Display for NodeView<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write_pieces(f, *self, expand_infix)
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.root_view().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{UnaryFn, Var};
    use super::*;

    #[test]
    fn empty_tree() {
        assert_eq!(Tree::new().to_string(), "");
    }

    #[test]
    fn sum_under_product() {
        // (x + 1) * sin(y)
        let mut tree = Tree::new();
        let x = tree.var(Var::X);
        let one = tree.constant(1.0);
        let sum = tree.binary(BinOp::Add, x, one);
        let y = tree.var(Var::Y);
        let sin = tree.unary(UnaryFn::Sin, y);
        let root = tree.binary(BinOp::Mul, sum, sin);
        tree.set_root(root);

        assert_eq!(tree.to_string(), "(x + 1)*sin(y)");
    }

    #[test]
    fn right_operands_keep_grouping() {
        // x - (y - 2.5)
        let mut tree = Tree::new();
        let x = tree.var(Var::X);
        let y = tree.var(Var::Y);
        let c = tree.constant(2.5);
        let inner = tree.binary(BinOp::Sub, y, c);
        let root = tree.binary(BinOp::Sub, x, inner);
        tree.set_root(root);
        assert_eq!(tree.to_string(), "x - (y - 2.5)");

        // x / (y * 2)
        let mut tree = Tree::new();
        let x = tree.var(Var::X);
        let y = tree.var(Var::Y);
        let c = tree.constant(2.0);
        let inner = tree.binary(BinOp::Mul, y, c);
        let root = tree.binary(BinOp::Div, x, inner);
        tree.set_root(root);
        assert_eq!(tree.to_string(), "x/(y*2)");
    }

    #[test]
    fn power_operands() {
        // (x*2)^(-1) * ln(x)^2 would be ambiguous without brackets
        let mut tree = Tree::new();
        let x = tree.var(Var::X);
        let two = tree.constant(2.0);
        let base = tree.binary(BinOp::Mul, x, two);
        let minus_one = tree.constant(-1.0);
        let pow = tree.binary(BinOp::Pow, base, minus_one);
        let x2 = tree.var(Var::X);
        let ln = tree.unary(UnaryFn::Ln, x2);
        let two2 = tree.constant(2.0);
        let pow2 = tree.binary(BinOp::Pow, ln, two2);
        let root = tree.binary(BinOp::Mul, pow, pow2);
        tree.set_root(root);

        assert_eq!(tree.to_string(), "(x*2)^(-1)*(ln(x))^2");
    }

    #[test]
    fn error_leaf() {
        let mut tree = Tree::new();
        let error = tree.construct(NodeKind::Error, crate::NodeId::NIL, crate::NodeId::NIL);
        let x = tree.var(Var::X);
        let root = tree.binary(BinOp::Add, error, x);
        tree.set_root(root);
        assert_eq!(tree.to_string(), "error + x");
    }

    /// Builds `x + x + ... + x` with `terms` terms as a left-deep chain.
    fn long_sum(terms: usize) -> Tree {
        let mut tree = Tree::new();
        let mut lhs = tree.var(Var::X);
        for _ in 1..terms {
            let rhs = tree.var(Var::X);
            lhs = tree.binary(BinOp::Add, lhs, rhs);
        }
        tree.set_root(lhs);
        tree
    }

    #[test]
    fn deep_chain() {
        let terms = 100_000;
        let rendered = long_sum(terms).to_string();
        assert_eq!(rendered.len(), terms + 3 * (terms - 1));
        assert!(rendered.starts_with("x + x + x"));
        assert!(rendered.ends_with("x + x"));
    }
}
