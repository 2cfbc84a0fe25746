use std::cmp::Ordering;

use super::error::InvariantViolation;
use super::node::{Node, NodePtr};

/// Walks a whole tree and verifies its structure.
pub(crate) struct Checker<'c, T, C> {
    pub(crate) compare: &'c C,
    /// Also check colors, not just order and links.
    pub(crate) colors: bool,
    pub(crate) counted: usize,
    last: Option<NodePtr<T>>,
}

impl<'c, T, C: Fn(&T, &T) -> Ordering> Checker<'c, T, C> {
    pub(crate) fn new(compare: &'c C, colors: bool) -> Self {
        Self { compare, colors, counted: 0, last: None }
    }

    /// Returns the black height of the subtree (NIL leaves count as zero).
    ///
    /// SAFETY: `node` must be the root of a live subtree whose root's parent link should be `parent`.
    pub(crate) unsafe fn check(
        &mut self,
        node: Option<NodePtr<T>>,
        parent: Option<NodePtr<T>>,
    ) -> Result<usize, InvariantViolation> {
        let Some(ptr) = node else { return Ok(0) };
        // SAFETY: guaranteed by caller
        let node: &Node<T> = unsafe { ptr.as_ref() };

        if node.parent != parent {
            return Err(InvariantViolation::BrokenParentLink)
        }

        // SAFETY: children of a live node are live, and their parent should be this node
        let left = unsafe { self.check(node.left, Some(ptr))? };

        if let Some(last) = self.last {
            // SAFETY: `last` was visited earlier in this walk and is still live
            let last = unsafe { &last.as_ref().value };
            if (self.compare)(last, &node.value) != Ordering::Less {
                return Err(InvariantViolation::OutOfOrder)
            }
        }
        self.last = Some(ptr);
        self.counted += 1;

        let right = unsafe { self.check(node.right, Some(ptr))? };

        if !self.colors {
            return Ok(0)
        }
        if node.is_red() {
            // SAFETY: see above
            let red_child = [node.left, node.right].into_iter()
                .flatten()
                .any(|child| unsafe { child.as_ref() }.is_red());
            if red_child {
                return Err(InvariantViolation::RedChildOfRed)
            }
        }
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { left, right })
        }
        Ok(left + usize::from(!node.is_red()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbtree::node::Color;
    use crate::rbtree::RBTree;

    fn cmp(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn detects_broken_colors() {
        let mut tree = RBTree::ordered();
        for i in [2, 1, 3] {
            tree.insert(i).unwrap();
        }
        assert_eq!(tree.check_invariants(), Ok(1));

        let mut root = tree.root.unwrap();
        unsafe { root.as_mut().color = Color::Red };
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRoot));

        // red root with red children
        let mut checker = Checker::new(&cmp, true);
        assert_eq!(unsafe { checker.check(tree.root, None) }, Err(InvariantViolation::RedChildOfRed));

        unsafe { root.as_mut().color = Color::Black };
        let mut left = unsafe { root.as_ref().left.unwrap() };
        unsafe { left.as_mut().color = Color::Black };
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::BlackHeightMismatch { left: 1, right: 0 })
        );
        unsafe { left.as_mut().color = Color::Red };
        assert_eq!(tree.check_invariants(), Ok(1));
    }

    #[test]
    fn detects_broken_order_and_links() {
        let mut tree = RBTree::ordered();
        for i in [2, 1, 3] {
            tree.insert(i).unwrap();
        }
        let root = tree.root.unwrap();
        let mut left = unsafe { root.as_ref().left.unwrap() };

        unsafe { left.as_mut().value = 5 };
        assert_eq!(tree.check_links(), Err(InvariantViolation::OutOfOrder));
        unsafe { left.as_mut().value = 1 };

        unsafe { left.as_mut().parent = None };
        assert_eq!(tree.check_links(), Err(InvariantViolation::BrokenParentLink));
        unsafe { left.as_mut().parent = Some(root) };

        let mut checker = Checker::new(&cmp, false);
        assert_eq!(unsafe { checker.check(tree.root, None) }, Ok(0));
        assert_eq!(checker.counted, 3);
    }
}
