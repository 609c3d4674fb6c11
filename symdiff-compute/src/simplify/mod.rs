//! Module to simplify expression trees in place.
//!
//! This module provides the [`simplify`] function, which reduces an expression tree to a fixed
//! point by alternating two passes over the tree until neither changes anything:
//!
//! - constant folding, which replaces operations on constants by their value (or by an error
//!   leaf when the operation is undefined, such as `1/0`);
//! - identity elimination, which applies the rules in [`rules`], such as `a*1 = a`.
//!
//! Both passes visit children before their parent, so a single pass folds `(1+2)*3` completely.
//! Every rewrite either removes nodes or turns a node into a leaf, so the loop terminates.

pub mod fold;
pub mod rules;
pub mod step;

use log::{debug, trace};
use symdiff_tree::{NodeId, Tree};
use crate::step_collector::StepCollector;
use fold::Fold;
use step::Step;

/// Runs one constant folding pass. Returns true if the tree changed.
fn fold_pass(tree: &mut Tree, step_collector: &mut dyn StepCollector<Step>) -> bool {
    let order = tree.post_order(tree.root()).collect::<Vec<_>>();
    let mut changed = false;

    for id in order {
        match fold::fold_node(tree, id) {
            Fold::Value(value) => {
                tree.collapse_to_const(id, value);
                step_collector.push(Step::FoldConstant);
            },
            Fold::Undefined => {
                tree.mark_error(id);
                step_collector.push(Step::DomainError);
            },
            Fold::Skip => continue,
        }
        changed = true;
    }

    trace!("fold pass: {}", tree);
    changed
}

/// Runs one identity elimination pass. Returns true if the tree changed.
///
/// Rewrites only ever destroy the rewritten node and nodes below it, which all come earlier in
/// post-order, so the precomputed order stays valid for the rest of the pass.
fn rules_pass(tree: &mut Tree, step_collector: &mut dyn StepCollector<Step>) -> bool {
    let order = tree.post_order(tree.root()).collect::<Vec<NodeId>>();
    let mut changed = false;

    for id in order {
        if let Some(rewrite) = rules::all(tree, id, step_collector) {
            rewrite.apply(tree, id);
            changed = true;
        }
    }

    trace!("identity pass: {}", tree);
    changed
}

/// Base implementation of the simplification algorithm.
pub(crate) fn inner_simplify(tree: &mut Tree, step_collector: &mut dyn StepCollector<Step>) {
    if tree.is_empty() {
        return;
    }

    tree.set_parents();
    let mut iteration = 0;
    loop {
        iteration += 1;
        let mut damaged = fold_pass(tree, step_collector);
        damaged |= rules_pass(tree, step_collector);
        debug!("simplify iteration {}: {} nodes, changed: {}", iteration, tree.len(), damaged);

        if !damaged {
            break;
        }
    }
}

/// Simplifies the given tree in place until no more rules apply.
///
/// ```
/// use symdiff_compute::simplify::simplify;
/// use symdiff_parser::parse;
///
/// let mut tree = parse("(x + 0) * (2 + 3)").unwrap();
/// simplify(&mut tree);
/// assert_eq!(tree.to_string(), "x*5");
/// ```
pub fn simplify(tree: &mut Tree) {
    inner_simplify(tree, &mut ());
}

/// Simplifies the given tree in place, and returns the steps taken, in the order they were
/// applied.
pub fn simplify_with_steps(tree: &mut Tree) -> Vec<Step> {
    let mut steps = Vec::new();
    inner_simplify(tree, &mut steps);
    steps
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use symdiff_parser::parse;
    use symdiff_tree::NodeKind;
    use super::*;

    /// Parses and simplifies the input, returning the rendered result.
    fn simplified(input: &str) -> String {
        let mut tree = parse(input).unwrap();
        simplify(&mut tree);
        tree.to_string()
    }

    #[test]
    fn identities() {
        assert_eq!(simplified("(x+0)"), "x");
        assert_eq!(simplified("0 + x"), "x");
        assert_eq!(simplified("x - 0"), "x");
        assert_eq!(simplified("(x*0)"), "0");
        assert_eq!(simplified("1*sin(x)*1"), "sin(x)");
        assert_eq!(simplified("0/x"), "0");
        assert_eq!(simplified("y/1"), "y");
        assert_eq!(simplified("(x^1)"), "x");
        assert_eq!(simplified("(x^0)"), "1");
        assert_eq!(simplified("0^x"), "0");
        assert_eq!(simplified("1^x"), "1");
        assert_eq!(simplified("ln(1) + x"), "x");
        assert_eq!(simplified("x*exp(0)"), "x");
    }

    #[test]
    fn no_rewrite_without_constants() {
        assert_eq!(simplified("0 - x"), "0 - x");
        assert_eq!(simplified("x/0"), "x/0");
        assert_eq!(simplified("x^y*y"), "x^y*y");
    }

    #[test]
    fn folding_cascades() {
        assert_eq!(simplified("(1 + 2)*3 - 4/8"), "8.5");
        assert_eq!(simplified("sqrt(16)*x^(1 + 1)"), "4*x^2");
        assert_eq!(simplified("cos(0)*x"), "x");
    }

    #[test]
    fn rewrites_enable_folding() {
        // the identity pass exposes 2*3 to the next fold pass
        assert_eq!(simplified("(2*x^0)*3"), "6");
        assert_eq!(simplified("x*0 + ln(1 + 0*y)"), "0");
    }

    #[test]
    fn domain_errors() {
        let mut tree = parse("(1/0)").unwrap();
        simplify(&mut tree);
        assert_eq!(tree.root_view().kind(), NodeKind::Error);
        assert_eq!(tree.len(), 1);

        assert_eq!(simplified("x + sqrt(-4)"), "x + error");
        assert_eq!(simplified("ln(0)*x"), "error*x");
        assert_eq!(simplified("ln(-1)"), "error");
        assert_eq!(simplified("0^-1"), "error");
    }

    #[test]
    fn errors_block_folding() {
        assert_eq!(simplified("1/0 + 2"), "error + 2");
        assert_eq!(simplified("(1/0)^1"), "error");
    }

    #[test]
    fn cotangent_of_zero_is_kept() {
        assert_eq!(simplified("cot(0)"), "cot(0)");
        assert_eq!(simplified("cot(1 - 1)*x"), "cot(0)*x");
    }

    #[test]
    fn idempotence() {
        for input in [
            "x^2*(3 + 0) - y/1",
            "sin(x)^2 + cos(x)^2",
            "(x + 1)*(y - 2)/(x^0*2)",
            "exp(ln(x*1))",
            "1/0*x + 0*y",
        ] {
            let mut tree = parse(input).unwrap();
            simplify(&mut tree);
            let once = tree.clone();
            let steps = simplify_with_steps(&mut tree);
            assert_eq!(tree, once, "{}", input);
            assert_eq!(steps, vec![]);
        }
    }

    #[test]
    fn node_count_matches_reachable_nodes() {
        let mut tree = parse("(x*1 + 0)*(2 + 3) + 0*sin(y) - ln(1)").unwrap();
        simplify(&mut tree);
        assert_eq!(tree.to_string(), "x*5");
        assert_eq!(tree.len(), tree.post_order(tree.root()).count());
    }

    #[test]
    fn parent_links_survive_rewrites() {
        let mut tree = parse("sin((x*1)^1 + 0)").unwrap();
        simplify(&mut tree);
        let root = tree.root_view();
        let x = root.right().unwrap();
        assert_eq!(x.var(), Some(symdiff_tree::Var::X));
        assert_eq!(x.parent().unwrap().id(), root.id());
    }

    #[test]
    fn steps() {
        let mut tree = parse("(x + 0)*(2*3)").unwrap();
        assert_eq!(simplify_with_steps(&mut tree), vec![Step::FoldConstant, Step::AddZero]);
        assert_eq!(tree.to_string(), "x*6");

        let mut tree = parse("x^0 + 1/0").unwrap();
        assert_eq!(
            simplify_with_steps(&mut tree),
            vec![Step::DomainError, Step::PowerZero],
        );
        assert_eq!(tree.to_string(), "1 + error");
    }

    #[test]
    fn empty_tree() {
        let mut tree = Tree::new();
        simplify(&mut tree);
        assert!(tree.is_empty());
    }
}
