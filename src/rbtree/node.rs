use std::alloc::Layout;
use std::ptr::NonNull;

use super::source::NodeSource;

// PROVE: any node with height `h` has black height at least `h/2`
// PROVE: the subtree located at any node `x` contains at least `2^bh(x) - 1` nodes (use induction)
// LEMMA: An RBTree with `n` internal nodes has height at most `2*log₂(n+1)`

/// A link to a node in the tree.
///
/// Whether a link owns the node it points to depends on where it is stored:
/// `left` and `right` own their targets, `parent` never does.
pub(crate) type NodePtr<T> = NonNull<Node<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

pub(crate) struct Node<T> {
    pub(crate) color: Color,
    pub(crate) value: T,
    pub(crate) parent: Option<NodePtr<T>>,
    pub(crate) left: Option<NodePtr<T>>,
    pub(crate) right: Option<NodePtr<T>>,
}

impl<T> Node<T> {
    /// A freshly inserted node: red, no children.
    pub(crate) fn new_red(value: T, parent: Option<NodePtr<T>>) -> Self {
        Self {
            color: Color::Red,
            value,
            parent,
            left: None,
            right: None
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodePtr<T>> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodePtr<T>> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Which side of `self` the node `child` hangs from.
    pub(crate) fn side_of(&self, child: NodePtr<T>) -> Side {
        if self.left == Some(child) {
            Side::Left
        } else {
            debug_assert!(self.right == Some(child), "parent link does not match either child");
            Side::Right
        }
    }

    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Moves `node` into memory obtained from `source`.
    ///
    /// If the source has no memory left, the node is handed back untouched.
    pub(crate) fn allocate<S: NodeSource>(source: &S, node: Self) -> Result<NodePtr<T>, Self> {
        let layout = Layout::new::<Self>();
        match source.allocate(layout) {
            Some(ptr) => {
                let ptr = ptr.cast::<Self>();
                debug_assert!(ptr.is_aligned());
                // SAFETY: `source` returned a block fitting `layout`, which is exactly one `Node<T>`.
                unsafe { ptr.write(node) };
                Ok(ptr)
            }
            None => Err(node),
        }
    }

    /// Moves the node out of its allocation and gives the memory back to `source`.
    ///
    /// SAFETY: `ptr` must come from [`Node::allocate`] with the same `source`, and must not be used afterwards.
    pub(crate) unsafe fn release<S: NodeSource>(source: &S, ptr: NodePtr<T>) -> Self {
        // SAFETY: guaranteed by caller, the node is live and nobody reads it again after this.
        let node = unsafe { ptr.read() };
        // SAFETY: the block was allocated by `source` with this exact layout.
        unsafe { source.deallocate(ptr.cast(), Layout::new::<Self>()) };
        node
    }
}

/// NIL leaves count as black.
///
/// SAFETY: `node`, if present, must point to a live node.
pub(crate) unsafe fn is_red<T>(node: Option<NodePtr<T>>) -> bool {
    match node {
        // SAFETY: guaranteed by caller
        Some(node) => unsafe { node.as_ref() }.is_red(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbtree::source::{BoundedSource, GlobalSource};

    #[test]
    fn allocate_and_release_roundtrip() {
        let ptr = Node::allocate(&GlobalSource, Node::new_red(String::from("payload"), None))
            .unwrap_or_else(|_| panic!("global allocator refused a node"));
        assert!(unsafe { is_red(Some(ptr)) });

        let node = unsafe { Node::release(&GlobalSource, ptr) };
        assert_eq!(node.value, "payload");
        assert!(node.left.is_none() && node.right.is_none() && node.parent.is_none());
    }

    #[test]
    fn exhausted_source_hands_the_node_back() {
        let source = BoundedSource::new(0);
        let rejected = match Node::allocate(&source, Node::new_red(vec![1, 2, 3], None)) {
            Ok(_) => panic!("exhausted source produced a node"),
            Err(node) => node,
        };
        assert_eq!(rejected.value, vec![1, 2, 3]);
    }

    #[test]
    fn side_lookup() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert!(!unsafe { is_red::<i32>(None) });

        let mut parent = Node::new_red(0, None);
        let mut child = Node::new_red(1, None);
        let child_ptr = NonNull::from(&mut child);
        *parent.child_mut(Side::Right) = Some(child_ptr);
        assert_eq!(parent.side_of(child_ptr), Side::Right);
        assert_eq!(parent.child(Side::Right), Some(child_ptr));
        assert_eq!(parent.child(Side::Left), None);
    }
}
