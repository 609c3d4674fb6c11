use super::{BinOp, Category, NodeId, NodeKind, Tree, UnaryFn, Var};

/// A read-only view of a node, used by renderers and external consumers that should not depend on
/// the arena layout.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl<'a> NodeView<'a> {
    pub(crate) fn new(tree: &'a Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn wrap(&self, id: NodeId) -> Option<NodeView<'a>> {
        (!id.is_nil()).then_some(NodeView::new(self.tree, id))
    }

    /// Returns the handle of the viewed node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.tree.kind(self.id)
    }

    pub fn category(&self) -> Category {
        self.kind().category()
    }

    /// Returns the value of a constant node.
    pub fn value(&self) -> Option<f64> {
        self.kind().as_const()
    }

    /// Returns the variable of a variable node.
    pub fn var(&self) -> Option<Var> {
        match self.kind() {
            NodeKind::Var(var) => Some(var),
            _ => None,
        }
    }

    /// Returns the operator of a binary operation node.
    pub fn binary_op(&self) -> Option<BinOp> {
        match self.kind() {
            NodeKind::Binary(op) => Some(op),
            _ => None,
        }
    }

    /// Returns the function of a unary function node.
    pub fn unary_fn(&self) -> Option<UnaryFn> {
        match self.kind() {
            NodeKind::Unary(func) => Some(func),
            _ => None,
        }
    }

    pub fn has_left(&self) -> bool {
        !self.tree.left(self.id).is_nil()
    }

    pub fn has_right(&self) -> bool {
        !self.tree.right(self.id).is_nil()
    }

    pub fn left(&self) -> Option<NodeView<'a>> {
        self.wrap(self.tree.left(self.id))
    }

    pub fn right(&self) -> Option<NodeView<'a>> {
        self.wrap(self.tree.right(self.id))
    }

    pub fn parent(&self) -> Option<NodeView<'a>> {
        self.wrap(self.tree.parent(self.id))
    }
}
