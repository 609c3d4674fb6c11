//! Simplification rules for power expressions.

use symdiff_tree::{BinOp, NodeId, Tree};
use crate::{
    simplify::{rules::{do_binary, is_const, Rewrite}, step::Step},
    step_collector::StepCollector,
};

/// `a^0 = 1`
///
/// `0^0` is defined as `1` by this rule, though it may be undefined in other mathematical
/// contexts.
pub fn power_zero(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    let opt = do_binary(tree, id, BinOp::Pow, |_, rhs| {
        is_const(tree, rhs, 0.0).then_some(Rewrite::Collapse(1.0))
    })?;

    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    let opt = do_binary(tree, id, BinOp::Pow, |lhs, rhs| {
        is_const(tree, rhs, 1.0).then_some(Rewrite::Keep(lhs))
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `0^a = 0`
///
/// `0^0` is handled by the [`power_zero`] rule.
pub fn power_zero_left(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    let opt = do_binary(tree, id, BinOp::Pow, |lhs, _| {
        is_const(tree, lhs, 0.0).then_some(Rewrite::Collapse(0.0))
    })?;

    step_collector.push(Step::PowerZeroLeft);
    Some(opt)
}

/// `1^a = 1`
pub fn power_one_left(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    let opt = do_binary(tree, id, BinOp::Pow, |lhs, _| {
        is_const(tree, lhs, 1.0).then_some(Rewrite::Collapse(1.0))
    })?;

    step_collector.push(Step::PowerOneLeft);
    Some(opt)
}

/// Applies all power rules.
pub fn all(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    power_zero(tree, id, step_collector)
        .or_else(|| power_one(tree, id, step_collector))
        .or_else(|| power_zero_left(tree, id, step_collector))
        .or_else(|| power_one_left(tree, id, step_collector))
}
