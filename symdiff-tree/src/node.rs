//! Node types of the expression tree.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A stable handle to a node inside a [`Tree`](crate::Tree) arena.
///
/// Handle `0` is reserved for the sentinel node, which stands in for every absent child and for
/// the parent of the root. Handles are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The sentinel node.
    pub const NIL: NodeId = NodeId(0);

    /// Returns true if this handle refers to the sentinel node.
    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }

    /// Returns the index of the node in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_nil() {
            write!(f, "nil")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// One of the two named variables of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Var {
    X,
    Y,
}

impl Var {
    /// All variables, in the order they are listed in the grammar.
    pub const ALL: [Var; 2] = [Var::X, Var::Y];

    /// Returns the character used to write the variable.
    pub fn symbol(self) -> char {
        match self {
            Var::X => 'x',
            Var::Y => 'y',
        }
    }

    /// Returns the variable written with the given character, if any.
    pub fn from_char(c: char) -> Option<Var> {
        Self::ALL.into_iter().find(|var| var.symbol() == c)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The precedence of a binary operation, in order from lowest precedence (evaluated last) to
/// highest precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of exponentiation (`^`).
    Exp,
}

impl Precedence {
    /// Returns the next higher precedence level, or [`None`] for the highest binary level.
    pub fn next(self) -> Option<Precedence> {
        match self {
            Precedence::Term => Some(Precedence::Factor),
            Precedence::Factor => Some(Precedence::Exp),
            Precedence::Exp => None,
        }
    }
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    /// Returns the symbol used to write the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        }
    }

    /// Returns the precedence of the operator.
    pub fn precedence(self) -> Precedence {
        match self {
            BinOp::Add | BinOp::Sub => Precedence::Term,
            BinOp::Mul | BinOp::Div => Precedence::Factor,
            BinOp::Pow => Precedence::Exp,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A unary function. Its operand is stored in the right child slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryFn {
    Sin,
    Cos,
    Tan,
    Cot,
    Sqrt,
    Ln,
    Exp,
}

impl UnaryFn {
    /// The function table, in lookup order.
    pub const ALL: [UnaryFn; 7] = [
        UnaryFn::Sin,
        UnaryFn::Cos,
        UnaryFn::Tan,
        UnaryFn::Cot,
        UnaryFn::Sqrt,
        UnaryFn::Ln,
        UnaryFn::Exp,
    ];

    /// Returns the name of the function.
    pub fn name(self) -> &'static str {
        match self {
            UnaryFn::Sin => "sin",
            UnaryFn::Cos => "cos",
            UnaryFn::Tan => "tan",
            UnaryFn::Cot => "cot",
            UnaryFn::Sqrt => "sqrt",
            UnaryFn::Ln => "ln",
            UnaryFn::Exp => "exp",
        }
    }

    /// Returns the function with the given name, if any. `ctg` is accepted for `cot`.
    pub fn from_name(name: &str) -> Option<UnaryFn> {
        match name {
            "ctg" => Some(UnaryFn::Cot),
            _ => Self::ALL.into_iter().find(|f| f.name() == name),
        }
    }
}

impl fmt::Display for UnaryFn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The kind of a node and its payload.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    /// The sentinel node, or a recycled arena slot. Never a live data node.
    Nil,

    /// A numeric constant.
    Const(f64),

    /// A variable.
    Var(Var),

    /// A binary operation with both children present.
    Binary(BinOp),

    /// A unary function, with the operand in the right child slot.
    Unary(UnaryFn),

    /// The result of folding an operation outside of its domain, such as `1/0`.
    Error,
}

impl NodeKind {
    /// Returns the category of the node kind.
    pub fn category(&self) -> Category {
        match self {
            NodeKind::Nil => Category::Nil,
            NodeKind::Const(_) => Category::Const,
            NodeKind::Var(_) => Category::Var,
            NodeKind::Binary(_) => Category::BinaryOp,
            NodeKind::Unary(_) => Category::UnaryOp,
            NodeKind::Error => Category::Error,
        }
    }

    /// Returns the value of a constant node.
    pub fn as_const(&self) -> Option<f64> {
        match self {
            NodeKind::Const(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if nodes of this kind never have children.
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeKind::Const(_) | NodeKind::Var(_) | NodeKind::Error)
    }
}

/// The category of a node, as exposed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Nil,
    Const,
    Var,
    BinaryOp,
    UnaryOp,
    Error,
}

/// A node of the expression tree.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// The kind of the node and its payload.
    pub kind: NodeKind,

    /// The left child, or the sentinel.
    pub left: NodeId,

    /// The right child, or the sentinel. Unary functions keep their operand here.
    pub right: NodeId,

    /// The parent, or the sentinel for the root. This link is non-owning.
    pub parent: NodeId,
}

impl Node {
    /// The contents of the sentinel node, and of every recycled slot.
    pub const SENTINEL: Node = Node {
        kind: NodeKind::Nil,
        left: NodeId::NIL,
        right: NodeId::NIL,
        parent: NodeId::NIL,
    };

    /// Creates a detached node with the given kind and children.
    pub fn new(kind: NodeKind, left: NodeId, right: NodeId) -> Self {
        Self { kind, left, right, parent: NodeId::NIL }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_table_lookup() {
        assert_eq!(UnaryFn::from_name("sqrt"), Some(UnaryFn::Sqrt));
        assert_eq!(UnaryFn::from_name("ctg"), Some(UnaryFn::Cot));
        assert_eq!(UnaryFn::from_name("cot"), Some(UnaryFn::Cot));
        assert_eq!(UnaryFn::from_name("sinh"), None);
    }

    #[test]
    fn precedence_order() {
        assert!(BinOp::Add.precedence() < BinOp::Mul.precedence());
        assert!(BinOp::Div.precedence() < BinOp::Pow.precedence());
        assert_eq!(Precedence::Exp.next(), None);
    }

    #[test]
    fn leaf_kinds() {
        assert!(NodeKind::Const(1.0).is_leaf());
        assert!(NodeKind::Error.is_leaf());
        assert!(!NodeKind::Unary(UnaryFn::Ln).is_leaf());
        assert_eq!(NodeKind::Var(Var::Y).category(), Category::Var);
    }
}
