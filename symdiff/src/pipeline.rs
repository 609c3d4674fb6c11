//! Runs a [`Command`] on one line of input and renders the result.

use log::{debug, info};
use symdiff_compute::{
    derivative::take_derivative_with_steps,
    simplify::{simplify_with_steps, step::Step},
    taylor::taylor_at,
};
use symdiff_parser::parse;
use symdiff_tree::{fmt::latex::Latex, Tree, Var};
use crate::{cli::{Command, Format}, error::Error};

/// The result of running a command on an expression.
#[derive(Debug)]
pub struct Outcome {
    /// The resulting expression.
    pub tree: Tree,

    /// The simplification steps taken to reach it. Taylor expansions report no steps.
    pub steps: Vec<Step>,
}

/// Parses `input` and runs `command` on it with respect to `var`.
pub fn run(input: &str, command: Command, var: Var) -> Result<Outcome, Error> {
    let mut tree = parse(input)?;
    debug!("parsed `{}` into {} nodes: {}", input, tree.len(), tree);

    let mut steps = Vec::new();
    match command {
        Command::Derive { order } => {
            for _ in 0..order {
                steps.extend(take_derivative_with_steps(&mut tree, var));
            }
        },
        Command::Simplify => steps = simplify_with_steps(&mut tree),
        Command::Taylor { order, at } => {
            tree = taylor_at(&tree, var, at, order)
                .map_err(|err| err.into_error(0..input.chars().count()))?;
        },
    }

    info!("{:?} with respect to {}: {} nodes, {} steps", command, var, tree.len(), steps.len());
    Ok(Outcome { tree, steps })
}

/// Renders the tree in the given format.
pub fn render(tree: &Tree, format: Format, detailed: bool) -> String {
    match format {
        Format::Infix => tree.to_string(),
        Format::Latex => tree.as_display().to_string(),
        Format::Dot => tree.dot(detailed).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use symdiff_compute::taylor::{OrderTooHigh, UndefinedCoefficient, MAX_ORDER};
    use symdiff_parser::error::MissingClosingBracket;
    use super::*;

    fn infix(input: &str, command: Command, var: Var) -> String {
        run(input, command, var).unwrap().tree.to_string()
    }

    #[test]
    fn derive() {
        assert_eq!(infix("x^2", Command::Derive { order: 1 }, Var::X), "2*x");
        assert_eq!(infix("sin(x)", Command::Derive { order: 1 }, Var::X), "cos(x)");
        assert_eq!(infix("3", Command::Derive { order: 1 }, Var::X), "0");
    }

    #[test]
    fn derive_zero_times_only_parses() {
        assert_eq!(infix("x + 0", Command::Derive { order: 0 }, Var::X), "x + 0");
    }

    #[test]
    fn simplify_with_steps() {
        let outcome = run("(x + 0) * (2 + 3)", Command::Simplify, Var::X).unwrap();
        assert_eq!(outcome.tree.to_string(), "x*5");
        assert!(outcome.steps.contains(&Step::FoldConstant));
        assert!(outcome.steps.contains(&Step::AddZero));
    }

    #[test]
    fn taylor() {
        let command = Command::Taylor { order: 1, at: 0.0 };
        assert_eq!(infix("sin(x)", command, Var::X), "x");
    }

    #[test]
    fn syntax_error() {
        let Err(Error::Expr(err)) = run("sin(x", Command::Simplify, Var::X) else {
            panic!("expected a syntax error");
        };
        assert!(err.is::<MissingClosingBracket>());
    }

    #[test]
    fn taylor_error_spans_input() {
        let command = Command::Taylor { order: 2, at: 0.0 };
        let Err(Error::Expr(err)) = run("sqrt(x)", command, Var::X) else {
            panic!("expected a taylor error");
        };
        assert!(err.is::<UndefinedCoefficient>());
        assert_eq!(err.spans, vec![0..7]);
    }

    #[test]
    fn taylor_order_is_capped() {
        let command = Command::Taylor { order: MAX_ORDER + 1, at: 0.0 };
        let Err(Error::Expr(err)) = run("exp(x)", command, Var::X) else {
            panic!("expected a taylor error");
        };
        assert!(err.is::<OrderTooHigh>());
        assert_eq!(err.spans, vec![0..6]);
    }

    #[test]
    fn render_formats() {
        let tree = parse("ln(x)").unwrap();
        assert_eq!(render(&tree, Format::Infix, false), "ln(x)");
        assert_eq!(render(&tree, Format::Latex, false), "\\ln\\left(x\\right)");
        assert_eq!(render(&tree, Format::Dot, false), tree.to_dot());
        assert_eq!(render(&tree, Format::Dot, true), tree.to_dot_detailed());
    }
}
