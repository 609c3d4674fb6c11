use super::{NodeId, Tree};

/// An iterator that iteratively traverses a subtree in left-to-right post-order (children before
/// their parent).
///
/// This iterator is created by [`Tree::post_order`].
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
    last_visited: Option<NodeId>,
}

impl<'a> PostOrderIter<'a> {
    /// Creates a new iterator that traverses the subtree rooted at `start` in post-order. The
    /// iterator is empty if `start` is the sentinel.
    pub fn new(tree: &'a Tree, start: NodeId) -> Self {
        Self {
            tree,
            stack: if start.is_nil() { Vec::new() } else { vec![start] },
            last_visited: None,
        }
    }

    /// Pops the current node in the stack and marks it as the last visited node.
    fn visit(&mut self) -> Option<NodeId> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }
}

impl Iterator for PostOrderIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = *self.stack.last()?;
            let node = self.tree.node(id);

            // the last child to be visited is the right one, if there is one
            let last_child = if node.right.is_nil() { node.left } else { node.right };
            if last_child.is_nil() || self.last_visited == Some(last_child) {
                return self.visit();
            }

            if !node.right.is_nil() {
                self.stack.push(node.right);
            }
            if !node.left.is_nil() {
                self.stack.push(node.left);
            }
        }
    }
}

/// An iterator that iteratively traverses a subtree in-order (left subtree, node, right
/// subtree). Unary functions come before their operand, since the operand is a right child.
///
/// This iterator is created by [`Tree::in_order`].
pub struct InOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
    current: NodeId,
}

impl<'a> InOrderIter<'a> {
    /// Creates a new iterator that traverses the subtree rooted at `start` in-order.
    pub fn new(tree: &'a Tree, start: NodeId) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: start,
        }
    }
}

impl Iterator for InOrderIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.current.is_nil() {
            self.stack.push(self.current);
            self.current = self.tree.left(self.current);
        }

        let id = self.stack.pop()?;
        self.current = self.tree.right(id);
        Some(id)
    }
}
