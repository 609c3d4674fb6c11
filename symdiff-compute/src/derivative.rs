//! Symbolic differentiation.
//!
//! The derivative of a node is built as a new subtree in the same arena, without modifying the
//! node or anything around it. Every operand that appears in the result is a fresh deep copy, so
//! the derivative never shares nodes with the original expression.
//!
//! Every variable differentiates to `1`, whichever variable the derivative is taken with respect
//! to. Power rules likewise check for the presence of any variable.

use log::trace;
use std::collections::HashMap;
use symdiff_tree::{BinOp, NodeId, NodeKind, Tree, UnaryFn, Var};
use super::{
    simplify::{inner_simplify, step::Step},
    step_collector::StepCollector,
};

/// `(f * g)' = f' * g + f * g'`
fn product_rule(
    tree: &mut Tree,
    lhs: NodeId,
    rhs: NodeId,
    d_lhs: NodeId,
    d_rhs: NodeId,
) -> NodeId {
    let rhs_copy = tree.copy_subtree(rhs);
    let left_term = tree.binary(BinOp::Mul, d_lhs, rhs_copy);

    let lhs_copy = tree.copy_subtree(lhs);
    let right_term = tree.binary(BinOp::Mul, lhs_copy, d_rhs);

    tree.binary(BinOp::Add, left_term, right_term)
}

/// `(f / g)' = (f' * g - f * g') / (g * g)`
fn quotient_rule(
    tree: &mut Tree,
    lhs: NodeId,
    rhs: NodeId,
    d_lhs: NodeId,
    d_rhs: NodeId,
) -> NodeId {
    let rhs_copy = tree.copy_subtree(rhs);
    let left_term = tree.binary(BinOp::Mul, d_lhs, rhs_copy);

    let lhs_copy = tree.copy_subtree(lhs);
    let right_term = tree.binary(BinOp::Mul, lhs_copy, d_rhs);
    let numerator = tree.binary(BinOp::Sub, left_term, right_term);

    let rhs_a = tree.copy_subtree(rhs);
    let rhs_b = tree.copy_subtree(rhs);
    let denominator = tree.binary(BinOp::Mul, rhs_a, rhs_b);

    tree.binary(BinOp::Div, numerator, denominator)
}

/// Differentiates `f^g`, picking the rule by which sides depend on a variable:
///
/// - `(f^g)' = (exp(g * ln(f)))'` if both sides do;
/// - `(f^g)' = (g * f^(g - 1)) * f'` if only the base does;
/// - `(f^g)' = (f^g * ln(f)) * g'` if only the exponent does;
/// - `(f^g)' = 0` otherwise.
///
/// Takes ownership of both operand derivatives, destroying the ones the result does not use.
fn power_rule(tree: &mut Tree, id: NodeId, d_base: NodeId, d_exponent: NodeId) -> NodeId {
    let (base, exponent) = (tree.left(id), tree.right(id));

    match (tree.has_var(base), tree.has_var(exponent)) {
        (true, true) => {
            // exp(g * ln(f)) * (g' * ln(f) + g * ((1 / f) * f'))
            let exponent_copy = tree.copy_subtree(exponent);
            let base_copy = tree.copy_subtree(base);
            let ln = tree.unary(UnaryFn::Ln, base_copy);
            let product = tree.binary(BinOp::Mul, exponent_copy, ln);
            let outer = tree.unary(UnaryFn::Exp, product);

            let base_copy = tree.copy_subtree(base);
            let ln = tree.unary(UnaryFn::Ln, base_copy);
            let left_term = tree.binary(BinOp::Mul, d_exponent, ln);

            let one = tree.constant(1.0);
            let base_copy = tree.copy_subtree(base);
            let reciprocal = tree.binary(BinOp::Div, one, base_copy);
            let d_ln = tree.binary(BinOp::Mul, reciprocal, d_base);
            let exponent_copy = tree.copy_subtree(exponent);
            let right_term = tree.binary(BinOp::Mul, exponent_copy, d_ln);

            let d_product = tree.binary(BinOp::Add, left_term, right_term);
            tree.binary(BinOp::Mul, outer, d_product)
        },
        (true, false) => {
            tree.destroy(d_exponent);
            let exponent_copy = tree.copy_subtree(exponent);
            let base_copy = tree.copy_subtree(base);
            let exponent_copy_2 = tree.copy_subtree(exponent);
            let one = tree.constant(1.0);
            let reduced = tree.binary(BinOp::Sub, exponent_copy_2, one);
            let power = tree.binary(BinOp::Pow, base_copy, reduced);
            let coefficient = tree.binary(BinOp::Mul, exponent_copy, power);
            tree.binary(BinOp::Mul, coefficient, d_base)
        },
        (false, true) => {
            tree.destroy(d_base);
            let power = tree.copy_subtree(id);
            let base_copy = tree.copy_subtree(base);
            let ln = tree.unary(UnaryFn::Ln, base_copy);
            let coefficient = tree.binary(BinOp::Mul, power, ln);
            tree.binary(BinOp::Mul, coefficient, d_exponent)
        },
        (false, false) => {
            tree.destroy(d_base);
            tree.destroy(d_exponent);
            tree.constant(0.0)
        },
    }
}

/// Builds `1 / f(u)^2` for the derivatives of the tangent and cotangent.
fn reciprocal_square(tree: &mut Tree, numerator: f64, func: UnaryFn, arg: NodeId) -> NodeId {
    let numerator = tree.constant(numerator);
    let arg_copy = tree.copy_subtree(arg);
    let call = tree.unary(func, arg_copy);
    let two = tree.constant(2.0);
    let square = tree.binary(BinOp::Pow, call, two);
    tree.binary(BinOp::Div, numerator, square)
}

/// Differentiates a function call with the chain rule: `f(u)' = f'(u) * u'`.
fn chain_rule(tree: &mut Tree, id: NodeId, func: UnaryFn, d_arg: NodeId) -> NodeId {
    let arg = tree.right(id);
    let outer = match func {
        // sin(u)' = cos(u) * u'
        UnaryFn::Sin => {
            let arg_copy = tree.copy_subtree(arg);
            tree.unary(UnaryFn::Cos, arg_copy)
        },
        // cos(u)' = (sin(u) * u') * -1
        UnaryFn::Cos => {
            let arg_copy = tree.copy_subtree(arg);
            let sin = tree.unary(UnaryFn::Sin, arg_copy);
            let product = tree.binary(BinOp::Mul, sin, d_arg);
            let minus_one = tree.constant(-1.0);
            return tree.binary(BinOp::Mul, product, minus_one);
        },
        // tan(u)' = (1 / cos(u)^2) * u'
        UnaryFn::Tan => reciprocal_square(tree, 1.0, UnaryFn::Cos, arg),
        // cot(u)' = (-1 / sin(u)^2) * u'
        UnaryFn::Cot => reciprocal_square(tree, -1.0, UnaryFn::Sin, arg),
        // sqrt(u)' = (1 / (2 * sqrt(u))) * u'
        UnaryFn::Sqrt => {
            let one = tree.constant(1.0);
            let two = tree.constant(2.0);
            let sqrt = tree.copy_subtree(id);
            let denominator = tree.binary(BinOp::Mul, two, sqrt);
            tree.binary(BinOp::Div, one, denominator)
        },
        // ln(u)' = (1 / u) * u'
        UnaryFn::Ln => {
            let one = tree.constant(1.0);
            let arg_copy = tree.copy_subtree(arg);
            tree.binary(BinOp::Div, one, arg_copy)
        },
        // exp(u)' = exp(u) * u'
        UnaryFn::Exp => tree.copy_subtree(id),
    };

    tree.binary(BinOp::Mul, outer, d_arg)
}

/// Builds the derivative of a single node from the derivatives of its children, which are taken
/// out of `derivatives`.
fn derive_node(tree: &mut Tree, id: NodeId, derivatives: &mut HashMap<NodeId, NodeId>) -> NodeId {
    let mut take = |child: NodeId| derivatives.remove(&child).unwrap_or(NodeId::NIL);

    match tree.kind(id) {
        NodeKind::Const(_) => tree.constant(0.0),
        NodeKind::Var(_) => tree.constant(1.0),
        NodeKind::Error => tree.construct(NodeKind::Error, NodeId::NIL, NodeId::NIL),
        NodeKind::Binary(op) => {
            let (lhs, rhs) = (tree.left(id), tree.right(id));
            let (d_lhs, d_rhs) = (take(lhs), take(rhs));
            match op {
                // (f op g)' = f' op g'
                BinOp::Add | BinOp::Sub => tree.binary(op, d_lhs, d_rhs),
                BinOp::Mul => product_rule(tree, lhs, rhs, d_lhs, d_rhs),
                BinOp::Div => quotient_rule(tree, lhs, rhs, d_lhs, d_rhs),
                BinOp::Pow => power_rule(tree, id, d_lhs, d_rhs),
            }
        },
        NodeKind::Unary(func) => {
            let d_arg = take(tree.right(id));
            chain_rule(tree, id, func, d_arg)
        },
        NodeKind::Nil => NodeId::NIL,
    }
}

/// Builds the derivative of the subtree rooted at `id` with respect to `var`, and returns the
/// root of the new, detached subtree. The subtree at `id` is left untouched.
///
/// Nodes are differentiated in post-order, each one from the derivatives of its children, so the
/// depth of the subtree is not limited by the call stack.
///
/// An error leaf differentiates to an error leaf.
///
/// # Panics
///
/// Panics if `id` is the sentinel, which means the tree is malformed.
pub fn derivative(tree: &mut Tree, id: NodeId, var: Var) -> NodeId {
    let nodes = tree.post_order(id).collect::<Vec<_>>();
    trace!("d/d{}: differentiating {} nodes", var, nodes.len());

    let mut derivatives = HashMap::with_capacity(nodes.len());
    for node in nodes {
        let d_node = derive_node(tree, node, &mut derivatives);
        derivatives.insert(node, d_node);
    }

    match derivatives.remove(&id) {
        Some(d_root) => d_root,
        None => panic!("cannot differentiate the sentinel node {}", id),
    }
}

/// Base implementation of [`take_derivative`].
fn inner_take_derivative(tree: &mut Tree, var: Var, step_collector: &mut dyn StepCollector<Step>) {
    if tree.is_empty() {
        return;
    }

    let old_root = tree.root();
    let new_root = derivative(tree, old_root, var);
    tree.destroy(old_root);
    tree.set_root(new_root);
    tree.set_parents();
    trace!("d/d{}: {}", var, tree);

    inner_simplify(tree, step_collector);
}

/// Replaces the tree by its simplified derivative with respect to `var`. An empty tree is left
/// as is.
///
/// ```
/// use symdiff_compute::derivative::take_derivative;
/// use symdiff_parser::parse;
/// use symdiff_tree::Var;
///
/// let mut tree = parse("x^2").unwrap();
/// take_derivative(&mut tree, Var::X);
/// assert_eq!(tree.to_string(), "2*x");
/// ```
pub fn take_derivative(tree: &mut Tree, var: Var) {
    inner_take_derivative(tree, var, &mut ());
}

/// Replaces the tree by its simplified derivative with respect to `var`, and returns the steps
/// taken to simplify it.
pub fn take_derivative_with_steps(tree: &mut Tree, var: Var) -> Vec<Step> {
    let mut steps = Vec::new();
    inner_take_derivative(tree, var, &mut steps);
    steps
}

/// Replaces the tree by its `n`th simplified derivative with respect to `var`.
pub fn nth_derivative(tree: &mut Tree, var: Var, n: usize) {
    for _ in 0..n {
        take_derivative(tree, var);
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use symdiff_parser::parse;
    use crate::{eval::evaluate, simplify::simplify};
    use super::*;

    /// Returns the rendered, simplified derivative of the input.
    fn derive(input: &str) -> String {
        let mut tree = parse(input).unwrap();
        take_derivative(&mut tree, Var::X);
        tree.to_string()
    }

    /// Checks the derivative of the input against a central finite difference at each point.
    fn check_numerically(input: &str, points: &[f64]) {
        let tree = parse(input).unwrap();
        let mut d_tree = tree.clone();
        take_derivative(&mut d_tree, Var::X);

        let h = 1e-6;
        for &x in points {
            let forward = evaluate(&tree, x + h, 0.0).unwrap();
            let backward = evaluate(&tree, x - h, 0.0).unwrap();
            let expected = (forward - backward) / (2.0 * h);
            let actual = evaluate(&d_tree, x, 0.0).unwrap();
            assert_float_relative_eq!(actual, expected, 1e-5);
        }
    }

    #[test]
    fn known_derivatives() {
        assert_eq!(derive("(x^2)"), "2*x");
        assert_eq!(derive("(sin(x))"), "cos(x)");
        assert_eq!(derive("(3)"), "0");
        assert_eq!(derive("x"), "1");
        assert_eq!(derive("exp(x)"), "exp(x)");
        assert_eq!(derive("ln(x)"), "1/x");
    }

    #[test]
    fn every_variable_counts() {
        // both variables are treated as the differentiation variable
        assert_eq!(derive("y"), "1");
        assert_eq!(derive("x + y"), "2");
    }

    #[test]
    fn constant_power() {
        assert_eq!(derive("2^3"), "0");
        assert_eq!(derive("3*x^4"), "3*(4*x^3)");
    }

    #[test]
    fn unsimplified_shape() {
        let mut tree = parse("x*x").unwrap();
        let root = tree.root();
        let d = derivative(&mut tree, root, Var::X);
        let mut d_tree = Tree::new();
        let d = d_tree.copy_subtree_from(&tree, d);
        d_tree.set_root(d);
        assert_eq!(d_tree.to_string(), "1*x + x*1");

        // the original is untouched
        assert_eq!(tree.to_string(), "x*x");
        assert_eq!(tree.len(), 3 + 7);
    }

    #[test]
    fn unused_derivatives_are_destroyed() {
        for input in ["x^x", "x^(x^x)", "x^2", "2^x", "2^3 + x"] {
            let mut tree = parse(input).unwrap();
            take_derivative(&mut tree, Var::X);
            assert_eq!(tree.len(), tree.post_order(tree.root()).count(), "{}", input);
        }
    }

    #[test]
    fn long_sum() {
        let terms = 100_000;
        let mut tree = parse(&format!("{}x", "x + ".repeat(terms - 1))).unwrap();
        take_derivative(&mut tree, Var::X);
        assert_eq!(tree.to_string(), terms.to_string());
    }

    #[test]
    fn long_difference_shape() {
        let terms = 100_000;
        let mut tree = parse(&format!("{}x", "x - ".repeat(terms - 1))).unwrap();
        let root = tree.root();
        let d = derivative(&mut tree, root, Var::X);
        assert_eq!(tree.post_order(d).count(), 2 * terms - 1);
        assert_eq!(tree.kind(d), NodeKind::Binary(BinOp::Sub));
    }

    #[test]
    fn self_power() {
        // (x^x)' = x^x * (ln(x) + 1)
        let tree = parse("x^x").unwrap();
        let mut d_tree = tree.clone();
        take_derivative(&mut d_tree, Var::X);

        for x in [0.5_f64, 1.0, 2.0, 3.5] {
            let expected = x.powf(x) * (x.ln() + 1.0);
            assert_float_relative_eq!(evaluate(&d_tree, x, 0.0).unwrap(), expected, 1e-9);
        }
    }

    #[test]
    fn linearity() {
        for (a, b) in [("x^3", "sin(x)"), ("ln(x)*x", "exp(2*x)"), ("sqrt(x)", "1/x")] {
            let mut sum = parse(&format!("({}) + ({})", a, b)).unwrap();
            take_derivative(&mut sum, Var::X);

            let mut d_a = parse(a).unwrap();
            take_derivative(&mut d_a, Var::X);
            let mut d_b = parse(b).unwrap();
            take_derivative(&mut d_b, Var::X);
            let mut separate = parse(&format!("({}) + ({})", d_a, d_b)).unwrap();
            simplify(&mut separate);

            assert_eq!(sum, separate, "{} + {}", a, b);
        }
    }

    #[test]
    fn rules_match_finite_differences() {
        check_numerically("x^3 - 2*x + 1", &[-1.5, 0.0, 2.0]);
        check_numerically("x*sin(x)", &[-1.0, 0.3, 2.0]);
        check_numerically("(x^2 + 1)/(x - 3)", &[-1.0, 0.5, 2.0]);
        check_numerically("cos(x^2)", &[-0.7, 0.4, 1.2]);
        check_numerically("tan(x/2)", &[-0.9, 0.2, 1.1]);
        check_numerically("cot(x)", &[-1.0, 0.5, 2.5]);
        check_numerically("sqrt(x^2 + 1)", &[-2.0, 0.5, 3.0]);
        check_numerically("ln(x^2 + 1)", &[-2.0, 0.5, 3.0]);
        check_numerically("exp(sin(x))", &[-1.0, 0.5, 2.0]);
        check_numerically("2^x", &[-1.0, 0.5, 2.0]);
        check_numerically("(x + 2)^(x/3)", &[0.5, 1.0, 2.5]);
    }

    #[test]
    fn higher_order() {
        let mut tree = parse("x^3").unwrap();
        nth_derivative(&mut tree, Var::X, 2);
        assert_float_relative_eq!(evaluate(&tree, 2.0, 0.0).unwrap(), 12.0);

        nth_derivative(&mut tree, Var::X, 2);
        assert_eq!(tree.to_string(), "0");
    }

    #[test]
    fn errors_propagate() {
        let mut tree = parse("1/0 + x").unwrap();
        simplify(&mut tree);
        take_derivative(&mut tree, Var::X);
        assert_eq!(tree.to_string(), "error + 1");
    }
}
