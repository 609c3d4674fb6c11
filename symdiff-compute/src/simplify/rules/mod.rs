//! Implementation of the identity elimination rules.
//!
//! Each rule in this module is a function that inspects a single node of the tree, and returns
//! `Some(rewrite)` with the [`Rewrite`] to apply to that node if the rule applies, or `None` if
//! the rule does not apply. Rules never modify the tree themselves.

pub mod add;
pub mod function;
pub mod multiply;
pub mod power;

use symdiff_tree::{BinOp, NodeId, NodeKind, Tree, UnaryFn};
use crate::step_collector::StepCollector;
use super::step::Step;

/// A local rewrite of a single node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rewrite {
    /// Replace the node by the given child. The other child is destroyed.
    Keep(NodeId),

    /// Replace the node, including its children, by a constant.
    Collapse(f64),
}

impl Rewrite {
    /// Applies the rewrite to the given node. The parent links around the node must be up to
    /// date.
    pub fn apply(self, tree: &mut Tree, id: NodeId) {
        match self {
            Rewrite::Keep(child) => tree.splice(child),
            Rewrite::Collapse(value) => tree.collapse_to_const(id, value),
        }
    }
}

/// Returns true if the node is a constant with exactly the given value.
pub(crate) fn is_const(tree: &Tree, id: NodeId, value: f64) -> bool {
    tree.kind(id).as_const() == Some(value)
}

/// If the node is a binary operation with the given operator, calls the given function with the
/// left and right operands.
///
/// Returns `Some(rewrite)` if the function found a rewrite.
pub(crate) fn do_binary(
    tree: &Tree,
    id: NodeId,
    op: BinOp,
    f: impl Fn(NodeId, NodeId) -> Option<Rewrite>,
) -> Option<Rewrite> {
    if tree.kind(id) == NodeKind::Binary(op) {
        f(tree.left(id), tree.right(id))
    } else {
        None
    }
}

/// If the node is a call to the given function, calls the given function with the operand.
///
/// Returns `Some(rewrite)` if the function found a rewrite.
pub(crate) fn do_call(
    tree: &Tree,
    id: NodeId,
    func: UnaryFn,
    f: impl Fn(NodeId) -> Option<Rewrite>,
) -> Option<Rewrite> {
    if tree.kind(id) == NodeKind::Unary(func) {
        f(tree.right(id))
    } else {
        None
    }
}

/// Applies all rules, in order, and returns the first rewrite found.
pub fn all(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    add::all(tree, id, step_collector)
        .or_else(|| multiply::all(tree, id, step_collector))
        .or_else(|| power::all(tree, id, step_collector))
        .or_else(|| function::all(tree, id, step_collector))
}
