use log::trace;

use super::node::{NodePtr, Side};

/// Rotates the subtree rooted at `node` towards `side`.
///
/// The child of `node` on the opposite side (the pivot) takes `node`'s place, and `node` becomes the
/// pivot's child on `side`. The pivot's inner subtree moves over to `node`. In-order sequence is unchanged.
///
/// ```text
///     node                 pivot
///    /    \               /     \
///   a    pivot   ==>   node      c        (side = Left)
///       /     \       /    \
///      b       c     a      b
/// ```
///
/// SAFETY: `node` must be a live node of the tree rooted at `*root`, and must have a child on `side.opposite()`.
pub(crate) unsafe fn rotate<T>(root: &mut Option<NodePtr<T>>, mut node: NodePtr<T>, side: Side) {
    trace!("rotating {side:?} at {node:016x?}");

    // SAFETY: all pointers below are reachable from `root`, and so are live nodes owned by the tree.
    //         No reference created here outlives the statement it is created in.
    unsafe {
        let mut pivot = node.as_ref().child(side.opposite())
            .expect("rotation pivot must exist");

        let inner = pivot.as_ref().child(side);
        *node.as_mut().child_mut(side.opposite()) = inner;
        if let Some(mut inner) = inner {
            inner.as_mut().parent = Some(node);
        }

        let parent = node.as_ref().parent;
        pivot.as_mut().parent = parent;
        match parent {
            None => *root = Some(pivot),
            Some(mut parent) => {
                let slot = parent.as_ref().side_of(node);
                *parent.as_mut().child_mut(slot) = Some(pivot);
            }
        }

        *pivot.as_mut().child_mut(side) = Some(node);
        node.as_mut().parent = Some(pivot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbtree::RBTree;

    fn contents(tree: &RBTree<i32, fn(&i32, &i32) -> std::cmp::Ordering, fn(i32)>) -> Vec<i32> {
        let mut out = Vec::new();
        tree.for_each(|&x| { out.push(x); true });
        out
    }

    #[test]
    fn rotations_keep_order_and_links() {
        let mut tree = RBTree::ordered();
        for i in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(i).unwrap();
        }
        let before = contents(&tree);

        let root = tree.root.unwrap();
        unsafe { rotate(&mut tree.root, root, Side::Left) };
        assert_eq!(unsafe { tree.root.unwrap().as_ref().value }, 6);
        assert_eq!(unsafe { root.as_ref().parent }, tree.root);
        tree.check_links().unwrap();
        assert_eq!(contents(&tree), before);

        let root = tree.root.unwrap();
        unsafe { rotate(&mut tree.root, root, Side::Right) };
        assert_eq!(unsafe { tree.root.unwrap().as_ref().value }, 4);
        tree.check_links().unwrap();
        assert_eq!(contents(&tree), before);
    }

    #[test]
    fn rotation_below_the_root_updates_the_parent() {
        let mut tree = RBTree::ordered();
        for i in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(i).unwrap();
        }
        let root = tree.root.unwrap();
        let left = unsafe { root.as_ref().left.unwrap() };
        unsafe { rotate(&mut tree.root, left, Side::Right) };

        assert_eq!(tree.root, Some(root));
        let new_left = unsafe { root.as_ref().left.unwrap() };
        assert_eq!(unsafe { new_left.as_ref().value }, 1);
        assert_eq!(unsafe { new_left.as_ref().parent }, Some(root));
        tree.check_links().unwrap();
        assert_eq!(contents(&tree), vec![1, 2, 3, 4, 5, 6, 7]);
    }
}
