//! Expression tree for `symdiff`.
//!
//! An expression such as `x^2 + sin(y)` is stored as a binary [`Tree`] of [`Node`]s inside an
//! arena. Nodes are addressed by [`NodeId`] handles, and the handle [`NodeId::NIL`] refers to a
//! shared sentinel that stands in for every missing child and for the parent of the root.
//!
//! The tree provides the primitives used by the differentiator and the simplifier to rewrite it
//! in place, such as [`Tree::splice`] and [`Tree::collapse_to_const`]. Consumers that only read
//! the tree should go through [`NodeView`], [`Tree::post_order`], and [`Tree::in_order`]; the
//! renderers in [`fmt`] are built this way.
//!
//! ```
//! use symdiff_tree::{BinOp, Tree, UnaryFn, Var};
//!
//! // sin(x) * 2
//! let mut tree = Tree::new();
//! let x = tree.var(Var::X);
//! let sin = tree.unary(UnaryFn::Sin, x);
//! let two = tree.constant(2.0);
//! let product = tree.binary(BinOp::Mul, sin, two);
//! tree.set_root(product);
//! tree.set_parents();
//!
//! assert_eq!(tree.to_string(), "sin(x)*2");
//! assert_eq!(tree.len(), 4);
//! ```

pub mod fmt;
pub mod iter;
pub mod node;
mod tree;
mod view;

pub use node::{BinOp, Category, Node, NodeId, NodeKind, Precedence, UnaryFn, Var};
pub use tree::Tree;
pub use view::NodeView;
