//! Simplification rules for multiplication and division.

use symdiff_tree::{BinOp, NodeId, Tree};
use crate::{
    simplify::{rules::{do_binary, is_const, Rewrite}, step::Step},
    step_collector::StepCollector,
};

/// `a*0 = 0`
/// `0*a = 0`
pub fn multiply_zero(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    let opt = do_binary(tree, id, BinOp::Mul, |lhs, rhs| {
        (is_const(tree, lhs, 0.0) || is_const(tree, rhs, 0.0)).then_some(Rewrite::Collapse(0.0))
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `a*1 = a`
/// `1*a = a`
pub fn multiply_one(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    let opt = do_binary(tree, id, BinOp::Mul, |lhs, rhs| {
        if is_const(tree, rhs, 1.0) {
            Some(Rewrite::Keep(lhs))
        } else if is_const(tree, lhs, 1.0) {
            Some(Rewrite::Keep(rhs))
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `0/a = 0`
///
/// `0/0` never reaches this rule, since constant folding turns it into an error first.
pub fn divide_zero(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    let opt = do_binary(tree, id, BinOp::Div, |lhs, _| {
        is_const(tree, lhs, 0.0).then_some(Rewrite::Collapse(0.0))
    })?;

    step_collector.push(Step::DivideZero);
    Some(opt)
}

/// `a/1 = a`
pub fn divide_one(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    let opt = do_binary(tree, id, BinOp::Div, |lhs, rhs| {
        is_const(tree, rhs, 1.0).then_some(Rewrite::Keep(lhs))
    })?;

    step_collector.push(Step::DivideOne);
    Some(opt)
}

/// Applies all multiplication and division rules.
pub fn all(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    multiply_zero(tree, id, step_collector)
        .or_else(|| multiply_one(tree, id, step_collector))
        .or_else(|| divide_zero(tree, id, step_collector))
        .or_else(|| divide_one(tree, id, step_collector))
}
