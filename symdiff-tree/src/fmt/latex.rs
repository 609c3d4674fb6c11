use std::fmt::{Display, Formatter, Result};
use crate::{BinOp, NodeKind, NodeView, Tree, UnaryFn};
use super::{push_operand, write_pieces, Piece, Side};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Delimiters around an operand that needs brackets.
const BRACKETS: (&str, &str) = ("\\left(", "\\right)");

/// Helper to push an operand that is delimited by braces.
fn push_group<'a>(pieces: &mut Vec<Piece<'a>>, operand: Option<NodeView<'a>>) {
    pieces.push(Piece::Text("{"));
    pieces.extend(operand.map(Piece::Node));
    pieces.push(Piece::Text("}"));
}

fn expand_latex<'a>(f: &mut Formatter, node: NodeView<'a>, pieces: &mut Vec<Piece<'a>>) -> Result {
    match node.kind() {
        NodeKind::Nil => {},
        NodeKind::Const(value) => write!(f, "{}", value)?,
        NodeKind::Var(var) => write!(f, "{}", var)?,
        NodeKind::Error => f.write_str("\\mathrm{error}")?,
        NodeKind::Unary(func) => match func {
            UnaryFn::Sqrt => {
                pieces.push(Piece::Text("\\sqrt"));
                push_group(pieces, node.right());
            },
            UnaryFn::Exp => {
                pieces.push(Piece::Text("e^"));
                push_group(pieces, node.right());
            },
            _ => {
                pieces.extend([Piece::Text("\\"), Piece::Text(func.name()), Piece::Text(BRACKETS.0)]);
                pieces.extend(node.right().map(Piece::Node));
                pieces.push(Piece::Text(BRACKETS.1));
            },
        },
        NodeKind::Binary(op) => match op {
            BinOp::Div => {
                pieces.push(Piece::Text("\\frac"));
                push_group(pieces, node.left());
                push_group(pieces, node.right());
            },
            BinOp::Pow => {
                pieces.push(Piece::Text("{"));
                push_operand(pieces, node.left(), op, Side::Left, BRACKETS);
                pieces.push(Piece::Text("}^"));
                push_group(pieces, node.right());
            },
            BinOp::Mul => {
                push_operand(pieces, node.left(), op, Side::Left, BRACKETS);
                pieces.push(Piece::Text(" \\cdot "));
                push_operand(pieces, node.right(), op, Side::Right, BRACKETS);
            },
            BinOp::Add | BinOp::Sub => {
                push_operand(pieces, node.left(), op, Side::Left, BRACKETS);
                pieces.extend([Piece::Text(" "), Piece::Text(op.symbol()), Piece::Text(" ")]);
                push_operand(pieces, node.right(), op, Side::Right, BRACKETS);
            },
        },
    }
    Ok(())
}

impl Latex for NodeView<'_> {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        write_pieces(f, *self, expand_latex)
    }
}

impl Latex for Tree {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        self.root_view().fmt_latex(f)
    }
}

/// Wraps the LaTeX rendering of the tree in a minimal standalone `article` document.
pub fn latex_document(tree: &Tree) -> String {
    format!(
        "\\documentclass{{article}}\n\
         \\usepackage{{amsmath}}\n\
         \\begin{{document}}\n\
         \\[\n{}\n\\]\n\
         \\end{{document}}\n",
        tree.as_display(),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::Var;
    use super::*;

    /// Builds `sqrt(x)/(x + 1)^2 * sin(y)`.
    fn sample() -> Tree {
        let mut tree = Tree::new();
        let x = tree.var(Var::X);
        let sqrt = tree.unary(UnaryFn::Sqrt, x);
        let x2 = tree.var(Var::X);
        let one = tree.constant(1.0);
        let sum = tree.binary(BinOp::Add, x2, one);
        let two = tree.constant(2.0);
        let pow = tree.binary(BinOp::Pow, sum, two);
        let div = tree.binary(BinOp::Div, sqrt, pow);
        let y = tree.var(Var::Y);
        let sin = tree.unary(UnaryFn::Sin, y);
        let root = tree.binary(BinOp::Mul, div, sin);
        tree.set_root(root);
        tree
    }

    #[test]
    fn fmt_latex() {
        let fmt = format!("{}", sample().as_display());
        assert_eq!(fmt, "\\frac{\\sqrt{x}}{{\\left(x + 1\\right)}^{2}} \\cdot \\sin\\left(y\\right)");
    }

    #[test]
    fn document_wraps_formula() {
        let document = latex_document(&sample());
        assert!(document.starts_with("\\documentclass{article}\n"));
        assert!(document.contains("\\[\n\\frac{\\sqrt{x}}"));
        assert!(document.ends_with("\\end{document}\n"));
    }

    #[test]
    fn deep_power_tower() {
        // x^(x^(...^x)) nests braces on the right
        let depth = 50_000;
        let mut tree = Tree::new();
        let mut exponent = tree.var(Var::X);
        for _ in 0..depth {
            let base = tree.var(Var::X);
            exponent = tree.binary(BinOp::Pow, base, exponent);
        }
        tree.set_root(exponent);

        let fmt = format!("{}", tree.as_display());
        assert!(fmt.starts_with("{x}^{{x}^{"));
        assert!(fmt.ends_with("x}}"));
        assert_eq!(fmt.matches('^').count(), depth);
    }
}
