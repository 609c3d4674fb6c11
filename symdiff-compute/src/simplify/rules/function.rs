//! Simplification rules for function calls.

use symdiff_tree::{NodeId, Tree, UnaryFn};
use crate::{
    simplify::{rules::{do_call, is_const, Rewrite}, step::Step},
    step_collector::StepCollector,
};

/// `ln(1) = 0`
pub fn ln_one(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    let opt = do_call(tree, id, UnaryFn::Ln, |arg| {
        is_const(tree, arg, 1.0).then_some(Rewrite::Collapse(0.0))
    })?;

    step_collector.push(Step::LnOne);
    Some(opt)
}

/// `exp(0) = 1`
pub fn exp_zero(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    let opt = do_call(tree, id, UnaryFn::Exp, |arg| {
        is_const(tree, arg, 0.0).then_some(Rewrite::Collapse(1.0))
    })?;

    step_collector.push(Step::ExpZero);
    Some(opt)
}

/// Applies all function rules.
pub fn all(tree: &Tree, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> Option<Rewrite> {
    ln_one(tree, id, step_collector)
        .or_else(|| exp_zero(tree, id, step_collector))
}
