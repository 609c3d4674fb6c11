use std::collections::HashMap;
use super::{
    iter::{InOrderIter, PostOrderIter},
    view::NodeView,
    BinOp,
    Node,
    NodeId,
    NodeKind,
    UnaryFn,
    Var,
};

/// A binary expression tree stored in an arena.
///
/// Slot `0` of the arena holds the sentinel node ([`NodeId::NIL`]), which is never mutated.
/// Every other live slot holds a node owned by this tree. Slots freed by [`Tree::destroy`] are
/// recycled by later allocations.
///
/// Nodes created with [`Tree::construct`] (and the typed helpers built on it) are detached: their
/// children are linked, but no parent links are written. Call [`Tree::set_parents`] after
/// assembling a new root; the splice primitives keep parent links consistent on their own.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tree {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates an empty tree. Its root is the sentinel.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::SENTINEL],
            free: Vec::new(),
            root: NodeId::NIL,
        }
    }

    /// Returns the root of the tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Makes the given node the root of the tree, and gives it the sentinel as parent.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = id;
        if !id.is_nil() {
            self.nodes[id.index()].parent = NodeId::NIL;
        }
    }

    /// Returns true if the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Returns the number of allocated, non-sentinel nodes.
    ///
    /// For a tree with no detached nodes, this is the number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1 - self.free.len()
    }

    /// Returns the node with the given handle.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the kind of the given node.
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.index()].kind
    }

    /// Returns the left child of the given node.
    pub fn left(&self, id: NodeId) -> NodeId {
        self.nodes[id.index()].left
    }

    /// Returns the right child of the given node.
    pub fn right(&self, id: NodeId) -> NodeId {
        self.nodes[id.index()].right
    }

    /// Returns the parent of the given node.
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.nodes[id.index()].parent
    }

    /// Returns a read-only view of the given node.
    pub fn view(&self, id: NodeId) -> NodeView<'_> {
        NodeView::new(self, id)
    }

    /// Returns a read-only view of the root.
    pub fn root_view(&self) -> NodeView<'_> {
        NodeView::new(self, self.root)
    }

    /// Returns an iterator over the subtree rooted at `id` in post-order.
    pub fn post_order(&self, id: NodeId) -> PostOrderIter<'_> {
        PostOrderIter::new(self, id)
    }

    /// Returns an iterator over the subtree rooted at `id` in-order.
    pub fn in_order(&self, id: NodeId) -> InOrderIter<'_> {
        InOrderIter::new(self, id)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = node;
                id
            },
            None => {
                assert!(self.nodes.len() < u32::MAX as usize, "expression tree arena is full");
                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(node);
                id
            },
        }
    }

    fn release(&mut self, id: NodeId) {
        assert!(!id.is_nil(), "the sentinel node cannot be freed");
        self.nodes[id.index()] = Node::SENTINEL;
        self.free.push(id);
    }

    /// Allocates a detached node with the given kind and children.
    pub fn construct(&mut self, kind: NodeKind, left: NodeId, right: NodeId) -> NodeId {
        assert!(kind != NodeKind::Nil, "cannot construct a sentinel node");
        self.alloc(Node::new(kind, left, right))
    }

    /// Allocates a constant leaf.
    pub fn constant(&mut self, value: f64) -> NodeId {
        self.construct(NodeKind::Const(value), NodeId::NIL, NodeId::NIL)
    }

    /// Allocates a variable leaf.
    pub fn var(&mut self, var: Var) -> NodeId {
        self.construct(NodeKind::Var(var), NodeId::NIL, NodeId::NIL)
    }

    /// Allocates a binary operation over the given operands.
    pub fn binary(&mut self, op: BinOp, left: NodeId, right: NodeId) -> NodeId {
        self.construct(NodeKind::Binary(op), left, right)
    }

    /// Allocates a unary function over the given operand.
    pub fn unary(&mut self, func: UnaryFn, operand: NodeId) -> NodeId {
        self.construct(NodeKind::Unary(func), NodeId::NIL, operand)
    }

    /// Recomputes the parent link of every node reachable from the root.
    pub fn set_parents(&mut self) {
        if self.root.is_nil() {
            return;
        }

        self.nodes[self.root.index()].parent = NodeId::NIL;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Node { left, right, .. } = self.nodes[id.index()];
            for child in [left, right] {
                if !child.is_nil() {
                    self.nodes[child.index()].parent = id;
                    stack.push(child);
                }
            }
        }
    }

    /// Returns true if the subtree rooted at `id` contains a variable node.
    pub fn has_var(&self, id: NodeId) -> bool {
        self.post_order(id).any(|id| matches!(self.kind(id), NodeKind::Var(_)))
    }

    /// Rebuilds the given nodes, listed in post-order, as fresh detached nodes in this arena.
    /// Returns the copy of the last node.
    fn copy_post_order(&mut self, nodes: Vec<(NodeId, Node)>) -> NodeId {
        let mut copies = HashMap::with_capacity(nodes.len());
        let mut last = NodeId::NIL;
        for (old, node) in nodes {
            let left = copies.get(&node.left).copied().unwrap_or(NodeId::NIL);
            let right = copies.get(&node.right).copied().unwrap_or(NodeId::NIL);
            last = self.construct(node.kind, left, right);
            copies.insert(old, last);
        }
        last
    }

    /// Deep-copies the subtree rooted at `id` into new detached nodes of this tree, and returns
    /// the root of the copy. Copying the sentinel yields the sentinel.
    pub fn copy_subtree(&mut self, id: NodeId) -> NodeId {
        let nodes = self.post_order(id).map(|id| (id, *self.node(id))).collect();
        self.copy_post_order(nodes)
    }

    /// Deep-copies the subtree rooted at `id` of `other` into new detached nodes of this tree,
    /// and returns the root of the copy.
    pub fn copy_subtree_from(&mut self, other: &Tree, id: NodeId) -> NodeId {
        let nodes = other.post_order(id).map(|id| (id, *other.node(id))).collect();
        self.copy_post_order(nodes)
    }

    /// Returns a compact deep copy of this tree, with fresh parent links.
    pub fn copy(&self) -> Tree {
        let mut tree = Tree::new();
        let root = tree.copy_subtree_from(self, self.root);
        tree.set_root(root);
        tree.set_parents();
        tree
    }

    /// Frees every node of the subtree rooted at `id`, children before parents. The links that
    /// point at `id` from outside the subtree are left untouched.
    pub fn destroy(&mut self, id: NodeId) {
        let doomed = self.post_order(id).collect::<Vec<_>>();
        for id in doomed {
            self.release(id);
        }
    }

    /// Destroys both children of the given node and replaces them with the sentinel.
    pub fn kill_children(&mut self, id: NodeId) {
        let Node { left, right, .. } = self.nodes[id.index()];
        self.destroy(left);
        self.destroy(right);

        let node = &mut self.nodes[id.index()];
        node.left = NodeId::NIL;
        node.right = NodeId::NIL;
    }

    /// Destroys both children of the given node and turns it into a constant leaf. The node keeps
    /// its position in the tree.
    pub fn collapse_to_const(&mut self, id: NodeId, value: f64) {
        self.kill_children(id);
        self.nodes[id.index()].kind = NodeKind::Const(value);
    }

    /// Destroys both children of the given node and turns it into an error leaf.
    pub fn mark_error(&mut self, id: NodeId) {
        self.kill_children(id);
        self.nodes[id.index()].kind = NodeKind::Error;
    }

    /// Removes the parent of `keep` from the tree, along with the parent's other child, and puts
    /// `keep` in the slot the parent occupied. If the parent was the root, `keep` becomes the
    /// root.
    ///
    /// Requires the parent links of `keep` and of its parent to be up to date.
    ///
    /// ```
    /// use symdiff_tree::{BinOp, Tree, Var};
    ///
    /// // x + 0
    /// let mut tree = Tree::new();
    /// let x = tree.var(Var::X);
    /// let zero = tree.constant(0.0);
    /// let sum = tree.binary(BinOp::Add, x, zero);
    /// tree.set_root(sum);
    /// tree.set_parents();
    ///
    /// tree.splice(x);
    /// assert_eq!(tree.root(), x);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn splice(&mut self, keep: NodeId) {
        let father = self.parent(keep);
        assert!(!father.is_nil(), "cannot splice out the parent of the root");
        let grandfather = self.parent(father);

        // detach `keep` so that destroying the father leaves it alone
        let father_node = &mut self.nodes[father.index()];
        if father_node.right == keep {
            father_node.right = NodeId::NIL;
        } else {
            father_node.left = NodeId::NIL;
        }

        self.nodes[keep.index()].parent = grandfather;
        if grandfather.is_nil() {
            self.root = keep;
        } else {
            let grandfather_node = &mut self.nodes[grandfather.index()];
            if grandfather_node.right == father {
                grandfather_node.right = keep;
            } else {
                grandfather_node.left = keep;
            }
        }

        self.destroy(father);
    }

    /// Replaces every occurrence of the given variable with a constant leaf holding `value`.
    /// Returns the number of occurrences replaced.
    pub fn substitute(&mut self, var: Var, value: f64) -> usize {
        let targets = self.post_order(self.root)
            .filter(|&id| self.kind(id) == NodeKind::Var(var))
            .collect::<Vec<_>>();
        for &id in &targets {
            self.nodes[id.index()].kind = NodeKind::Const(value);
        }
        targets.len()
    }
}

impl Clone for Tree {
    fn clone(&self) -> Self {
        self.copy()
    }
}

/// Two trees are equal if their reachable structure is equal, regardless of how the nodes are
/// laid out in the arenas.
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self.root, other.root)];
        while let Some((a, b)) = stack.pop() {
            if a.is_nil() || b.is_nil() {
                if a.is_nil() != b.is_nil() {
                    return false;
                }
                continue;
            }

            let (node_a, node_b) = (self.node(a), other.node(b));
            if node_a.kind != node_b.kind {
                return false;
            }
            stack.push((node_a.left, node_b.left));
            stack.push((node_a.right, node_b.right));
        }
        true
    }
}
