use log::trace;

use super::node::{Color, NodePtr};
use super::rotate::rotate;

/// Restores the red-black invariants after `node` was linked into the tree as a red leaf.
///
/// Only a red node with a red parent breaks anything. A red uncle is fixed by recoloring, which may
/// push the violation two levels up; a black (or missing) uncle is fixed by one or two rotations,
/// after which the tree is valid again.
///
/// SAFETY: `node` must be a live, red node of the tree rooted at `*root`, and the tree must satisfy
/// every invariant except possibly "no red node has a red child" at `node`.
pub(crate) unsafe fn fix_insert<T>(root: &mut Option<NodePtr<T>>, mut node: NodePtr<T>) {
    // SAFETY: every pointer followed here is reachable from `root`, so it is a live node owned by the
    //         tree. References never outlive their statement.
    unsafe {
        loop {
            let Some(mut parent) = node.as_ref().parent else {
                // reached the root
                node.as_mut().color = Color::Black;
                return
            };
            if !parent.as_ref().is_red() {
                return
            }

            // the root is black, so a red parent always has a parent of its own
            let mut grandparent = parent.as_ref().parent
                .expect("red node cannot be the root");
            let parent_side = grandparent.as_ref().side_of(parent);
            let uncle = grandparent.as_ref().child(parent_side.opposite());

            match uncle {
                Some(mut uncle) if uncle.as_ref().is_red() => {
                    trace!("red uncle, recoloring at {grandparent:016x?}");
                    parent.as_mut().color = Color::Black;
                    uncle.as_mut().color = Color::Black;
                    grandparent.as_mut().color = Color::Red;
                    node = grandparent;
                    continue
                }
                _ => {}
            }

            if parent.as_ref().side_of(node) != parent_side {
                // zig-zag: straighten the path at the parent, then rotate the new middle node up.
                // `node` ends up where the grandparent was.
                rotate(root, parent, parent_side);
                rotate(root, grandparent, parent_side.opposite());
                node.as_mut().color = Color::Black;
            } else {
                rotate(root, grandparent, parent_side.opposite());
                parent.as_mut().color = Color::Black;
            }
            grandparent.as_mut().color = Color::Red;
            return
        }
    }
}
