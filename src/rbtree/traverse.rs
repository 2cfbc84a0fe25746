use std::any::Any;
use std::cmp::Ordering;
use std::panic::{catch_unwind, AssertUnwindSafe};

use log::error;

use super::node::{Node, NodePtr};
use super::source::NodeSource;

/// Directed descent: follows the comparator instead of scanning, so this is O(height).
///
/// SAFETY: `cursor` must be the root of a live subtree that outlives `'a`.
pub(crate) unsafe fn find<'a, T, C>(mut cursor: Option<NodePtr<T>>, item: &T, compare: &C) -> Option<&'a T>
where
    C: Fn(&T, &T) -> Ordering,
{
    while let Some(node) = cursor {
        // SAFETY: guaranteed by caller
        let node: &'a Node<T> = unsafe { node.as_ref() };
        cursor = match compare(item, &node.value) {
            Ordering::Less => node.left,
            Ordering::Greater => node.right,
            Ordering::Equal => return Some(&node.value),
        };
    }
    None
}

/// In-order walk that stops at the first `false` from `visit`.
///
/// Returns `true` only if every node was visited and accepted.
///
/// SAFETY: `node` must be the root of a live subtree that outlives `'a`.
pub(crate) unsafe fn walk_in_order<'a, T: 'a, F>(node: Option<NodePtr<T>>, visit: &mut F) -> bool
where
    F: FnMut(&'a T) -> bool,
{
    let Some(node) = node else { return true };
    // SAFETY: guaranteed by caller
    let node: &'a Node<T> = unsafe { node.as_ref() };
    // SAFETY: children of a live node are live
    unsafe {
        walk_in_order(node.left, visit)
            && visit(&node.value)
            && walk_in_order(node.right, visit)
    }
}

/// Number of nodes on the longest root-to-leaf path.
///
/// SAFETY: `node` must be the root of a live subtree.
pub(crate) unsafe fn height<T>(node: Option<NodePtr<T>>) -> usize {
    match node {
        None => 0,
        Some(node) => {
            // SAFETY: guaranteed by caller
            let node = unsafe { node.as_ref() };
            1 + unsafe { height(node.left).max(height(node.right)) }
        }
    }
}

/// Result of tearing a subtree down.
pub(crate) struct Teardown {
    pub(crate) freed: usize,
    /// The first panic raised by the destructor, if any. Later ones are only logged.
    pub(crate) panic: Option<Box<dyn Any + Send>>,
}

/// Post-order teardown: left, right, then the node itself (destructor on the payload, then the memory).
///
/// A panicking destructor doesn't stop the walk, every node is still given back to `source`.
///
/// SAFETY: `node` must be the root of a subtree exclusively owned by the caller, allocated from
/// `source`. None of its nodes may be used afterwards.
pub(crate) unsafe fn tear_down<T, S, D>(node: Option<NodePtr<T>>, source: &S, free: &mut D, out: &mut Teardown)
where
    S: NodeSource,
    D: FnMut(T),
{
    let Some(node) = node else { return };
    // SAFETY: guaranteed by caller; the children are read before the node is released.
    let (left, right) = unsafe { (node.as_ref().left, node.as_ref().right) };
    unsafe {
        tear_down(left, source, free, out);
        tear_down(right, source, free, out);
    }

    // SAFETY: both subtrees are gone, nothing points at this node anymore.
    let Node { value, .. } = unsafe { Node::release(source, node) };
    out.freed += 1;

    if let Err(payload) = catch_unwind(AssertUnwindSafe(|| free(value))) {
        error!("Panic in destructor: {}", panic_message(&*payload));
        out.panic.get_or_insert(payload);
    }
}

// See [`std::panicking::payload_as_str`]
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(&s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "Box<dyn Any>"
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::rbtree::RBTree;

    #[test]
    fn find_follows_the_comparator() {
        let mut tree = RBTree::ordered();
        for i in 0..100 {
            tree.insert(i * 2).unwrap();
        }

        let probes = Cell::new(0);
        let counting = |a: &i32, b: &i32| { probes.set(probes.get() + 1); a.cmp(b) };
        let found = unsafe { find(tree.root, &42, &counting) };
        assert_eq!(found, Some(&42));
        // a full scan would compare against every one of the 100 nodes
        assert!(probes.get() <= tree.height(), "{} comparisons for height {}", probes.get(), tree.height());

        assert_eq!(unsafe { find(tree.root, &43, &|a: &i32, b: &i32| a.cmp(b)) }, None);
        assert_eq!(unsafe { find::<i32, _>(None, &1, &|a: &i32, b: &i32| a.cmp(b)) }, None);
    }

    #[test]
    fn walk_stops_at_the_first_refusal() {
        let mut tree = RBTree::ordered();
        for i in [5, 3, 8, 1, 4, 7, 9] {
            tree.insert(i).unwrap();
        }

        let mut seen = Vec::new();
        let all = unsafe { walk_in_order(tree.root, &mut |&x: &i32| { seen.push(x); x < 5 }) };
        assert!(!all);
        assert_eq!(seen, vec![1, 3, 4, 5]);

        let mut seen = Vec::new();
        let all = unsafe { walk_in_order(tree.root, &mut |&x: &i32| { seen.push(x); true }) };
        assert!(all);
        assert_eq!(seen, vec![1, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn empty_subtrees() {
        assert_eq!(unsafe { height::<u8>(None) }, 0);
        assert!(unsafe { walk_in_order::<u8, _>(None, &mut |_| false) });
    }

    #[test]
    fn panic_messages() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(&*payload), "static");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(&*payload), "owned");
        let payload: Box<dyn Any + Send> = Box::new(3u8);
        assert_eq!(panic_message(&*payload), "Box<dyn Any>");
    }
}
