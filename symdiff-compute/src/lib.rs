//! Symbolic computation on `symdiff` expression trees.
//!
//! - [`derivative`]: structural differentiation, rule by rule.
//! - [`simplify`]: constant folding and identity elimination, run to a fixed point.
//! - [`eval`]: numeric evaluation by substitution.
//! - [`taylor`]: truncated Taylor series.
//!
//! ```
//! use symdiff_compute::derivative::take_derivative;
//! use symdiff_parser::parse;
//! use symdiff_tree::Var;
//!
//! let mut tree = parse("sin(x)*x").unwrap();
//! take_derivative(&mut tree, Var::X);
//! assert_eq!(tree.to_string(), "cos(x)*x + sin(x)");
//! ```

pub mod derivative;
pub mod eval;
pub mod simplify;
pub mod step_collector;
pub mod taylor;
