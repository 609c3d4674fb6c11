//! Graphviz DOT rendering of the tree structure.

use std::fmt::{Display, Formatter, Result};
use crate::{Category, NodeKind, NodeView, Tree};

/// Returns the fill color of a node of the given category.
fn fill_color(category: Category) -> &'static str {
    match category {
        Category::Nil | Category::Error => "#EF4C3A",
        Category::Const => "#9BC3F7",
        Category::Var => "#C6F7DD",
        Category::BinaryOp => "#F6F7C6",
        Category::UnaryOp => "#F6F796",
    }
}

/// Returns the short label of a node.
fn label(kind: NodeKind) -> String {
    match kind {
        NodeKind::Nil => "nil".to_string(),
        NodeKind::Const(value) => value.to_string(),
        NodeKind::Var(var) => var.to_string(),
        NodeKind::Binary(op) => op.to_string(),
        NodeKind::Unary(func) => func.to_string(),
        NodeKind::Error => "error".to_string(),
    }
}

/// A wrapper type that implements [`Display`] by writing the DOT document of a tree.
///
/// This type is created by [`Tree::dot`].
pub struct DotFormatter<'a> {
    tree: &'a Tree,
    detailed: bool,
}

impl DotFormatter<'_> {
    fn fmt_node(&self, f: &mut Formatter, node: NodeView) -> Result {
        let id = node.id();
        let color = fill_color(node.category());
        if self.detailed {
            write!(
                f,
                "    n{} [shape=\"record\", style=\"filled\", fillcolor=\"{}\", fontcolor=\"black\", \
                 label=\"{{{} | {} | parent: {} | {{left: {} | right: {}}}}}\"];\n",
                id.index(),
                color,
                id,
                label(node.kind()),
                self.tree.parent(id),
                self.tree.left(id),
                self.tree.right(id),
            )
        } else {
            write!(
                f,
                "    n{} [style=\"filled\", fillcolor=\"{}\", fontcolor=\"black\", label=\"{}\"];\n",
                id.index(),
                color,
                label(node.kind()),
            )
        }
    }

    fn fmt_edges(&self, f: &mut Formatter, node: NodeView) -> Result {
        for (port, child) in [("sw", node.left()), ("se", node.right())] {
            if let Some(child) = child {
                writeln!(f, "    n{}:{} -> n{};", node.id().index(), port, child.id().index())?;
            }
        }
        Ok(())
    }
}

impl Display for DotFormatter<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        writeln!(f, "digraph G {{")?;
        if !self.detailed {
            writeln!(f, "    node [shape=\"circle\"];")?;
        }

        let nodes = self.tree.post_order(self.tree.root()).collect::<Vec<_>>();
        for &id in nodes.iter().rev() {
            self.fmt_node(f, self.tree.view(id))?;
        }
        for &id in nodes.iter().rev() {
            self.fmt_edges(f, self.tree.view(id))?;
        }

        writeln!(f, "}}")
    }
}

impl Tree {
    /// Returns a [`DotFormatter`] for this tree. Detailed output uses record nodes that also list
    /// the handles of the parent and children of every node.
    pub fn dot(&self, detailed: bool) -> DotFormatter<'_> {
        DotFormatter { tree: self, detailed }
    }

    /// Renders the tree as a Graphviz DOT document, one filled node per tree node. Sentinel
    /// children are omitted.
    pub fn to_dot(&self) -> String {
        self.dot(false).to_string()
    }

    /// Renders the tree as a Graphviz DOT document with record labels holding the parent, left
    /// and right handles of every node. The sentinel is written as `nil`.
    pub fn to_dot_detailed(&self) -> String {
        self.dot(true).to_string()
    }
}
