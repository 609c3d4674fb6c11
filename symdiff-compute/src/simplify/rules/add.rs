//! Simplification rules for addition and subtraction.

use symdiff_tree::{BinOp, NodeId, Tree};
use crate::{
    simplify::{rules::{do_binary, is_const, Rewrite}, step::Step},
    step_collector::StepCollector,
};

/// `a+0 = a`
/// `0+a = a`
pub fn add_zero(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    let opt = do_binary(tree, id, BinOp::Add, |lhs, rhs| {
        if is_const(tree, rhs, 0.0) {
            Some(Rewrite::Keep(lhs))
        } else if is_const(tree, lhs, 0.0) {
            Some(Rewrite::Keep(rhs))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `a-0 = a`
///
/// `0-a` is not simplified, since the grammar has no negation.
pub fn subtract_zero(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    let opt = do_binary(tree, id, BinOp::Sub, |lhs, rhs| {
        is_const(tree, rhs, 0.0).then_some(Rewrite::Keep(lhs))
    })?;

    step_collector.push(Step::SubtractZero);
    Some(opt)
}

/// Applies all addition rules.
pub fn all(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    add_zero(tree, id, step_collector)
        .or_else(|| subtract_zero(tree, id, step_collector))
}
