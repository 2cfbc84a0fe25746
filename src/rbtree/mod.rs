//! A comparator-driven red-black tree that owns its elements.
//!
//! Elements are ordered by a caller-supplied comparator rather than `Ord`, and are given to a
//! caller-supplied destructor exactly once when the tree is torn down. There is no removal: the tree
//! only grows until it is destroyed.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use log::debug;

mod balance;
mod check;
mod error;
mod node;
mod rotate;
mod source;
mod traverse;

pub use error::{InsertError, InvariantViolation, TreeError};
pub use source::{GlobalSource, NodeSource};

use node::{Node, NodePtr, Side};
use traverse::Teardown;

/// A tree over `T: Ord`, ordered by [`Ord::cmp`] and destroyed with [`drop`].
pub type OrdTree<T> = RBTree<T, fn(&T, &T) -> Ordering, fn(T)>;

/// Red-black tree.
///
/// Invariants, holding after every completed insertion:
/// 1. The root, if any, is black
/// 2. A red node does not have a red child
/// 3. Every path from a node down to a leaf has the same number of black nodes
/// 4. The in-order sequence is strictly increasing under `compare`
pub struct RBTree<T, C, D, S = GlobalSource>
where
    D: FnMut(T),
    S: NodeSource,
{
    root: Option<NodePtr<T>>,
    compare: C,
    free: D,
    source: S,
    size: usize,
    // we own a bunch of `Node<T>`s, which drop `T`s
    _owns: PhantomData<Box<Node<T>>>,
}

// SAFETY: the tree exclusively owns every node, so sending the tree sends the `T`s with it.
//         Nothing about the raw pointers is shared with anyone else.
unsafe impl<T: Send, C: Send, D: FnMut(T) + Send, S: NodeSource + Send> Send for RBTree<T, C, D, S> {}

impl<T: Ord> OrdTree<T> {
    /// A tree ordered by `Ord`, which simply drops its elements at the end.
    pub fn ordered() -> Self {
        Self::new(T::cmp, drop)
    }
}

impl<T, C, D> RBTree<T, C, D>
where
    C: Fn(&T, &T) -> Ordering,
    D: FnMut(T),
{
    /// Creates an empty tree.
    ///
    /// `compare` must be a total order, and stay consistent for the lifetime of the tree.
    /// `free` is called exactly once for every element still held when the tree is destroyed.
    pub fn new(compare: C, free: D) -> Self {
        Self::with_source(compare, free, GlobalSource)
    }

    /// Like [`RBTree::new`], but the callbacks may be missing, in which case no tree is built.
    pub fn from_callbacks(compare: Option<C>, free: Option<D>) -> Result<Self, TreeError> {
        let compare = compare.ok_or(TreeError::MissingComparator)?;
        let free = free.ok_or(TreeError::MissingDestructor)?;
        Ok(Self::new(compare, free))
    }
}

impl<T, C, D, S> RBTree<T, C, D, S>
where
    C: Fn(&T, &T) -> Ordering,
    D: FnMut(T),
    S: NodeSource,
{
    /// Creates an empty tree whose nodes are allocated from `source`.
    pub fn with_source(compare: C, free: D, source: S) -> Self {
        Self {
            root: None,
            compare,
            free,
            source,
            size: 0,
            _owns: PhantomData
        }
    }

    /// The amount of elements in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `item` to the tree.
    ///
    /// Fails if an equal element is already stored, or if no node could be allocated. Either way the
    /// item is handed back inside the error and the tree is exactly as it was.
    ///
    /// Complexity: O(log(n))
    pub fn insert(&mut self, item: T) -> Result<(), InsertError<T>> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut cursor = self.root;

        while let Some(ptr) = cursor {
            // SAFETY: everything reachable from `root` is a live node owned by this tree
            let node = unsafe { ptr.as_ref() };
            side = match (self.compare)(&item, &node.value) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    debug!("rejecting duplicate element ({} elements held)", self.size);
                    return Err(InsertError::Duplicate(item))
                }
            };
            parent = Some(ptr);
            cursor = node.child(side);
        }

        let new_node = match Node::allocate(&self.source, Node::new_red(item, parent)) {
            Ok(ptr) => ptr,
            Err(node) => {
                debug!("node allocation failed ({} elements held)", self.size);
                return Err(InsertError::AllocationFailure(node.value))
            }
        };

        match parent {
            None => self.root = Some(new_node),
            // SAFETY: `parent` is a live node, and its `side` slot is empty (that's where the search ended)
            Some(mut parent) => unsafe { *parent.as_mut().child_mut(side) = Some(new_node) },
        }
        self.size += 1;

        // SAFETY: `new_node` is a red leaf that was just linked in, the rest of the tree is valid
        unsafe { balance::fix_insert(&mut self.root, new_node) };
        Ok(())
    }

    /// Whether an element equal to `item` is in the tree.
    ///
    /// Complexity: O(log(n))
    pub fn contains(&self, item: &T) -> bool {
        self.get(item).is_some()
    }

    /// The stored element equal to `item`, if any.
    ///
    /// Complexity: O(log(n))
    pub fn get(&self, item: &T) -> Option<&T> {
        // SAFETY: the nodes live as long as `&self`
        unsafe { traverse::find(self.root, item, &self.compare) }
    }

    /// Calls `visit` on every element in ascending order, stopping as soon as it returns `false`.
    ///
    /// Returns `true` if every element was visited and accepted.
    pub fn for_each<F>(&self, mut visit: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        // SAFETY: the nodes live as long as `&self`, and nobody can insert while we hold it
        unsafe { traverse::walk_in_order(self.root, &mut visit) }
    }

    /// [`RBTree::for_each`], with an extra argument handed to every call.
    pub fn for_each_with<A, F>(&self, mut visit: F, args: &mut A) -> bool
    where
        F: FnMut(&T, &mut A) -> bool,
    {
        self.for_each(|value| visit(value, args))
    }

    /// Number of nodes on the longest root-to-leaf path. At most `2*log₂(n+1)`.
    pub fn height(&self) -> usize {
        // SAFETY: the nodes live as long as `&self`
        unsafe { traverse::height(self.root) }
    }

    /// Number of black nodes on any path from the root down to a leaf.
    pub fn black_height(&self) -> usize {
        let mut black_height = 0;
        let mut cursor = self.root;
        while let Some(ptr) = cursor {
            // SAFETY: the nodes live as long as `&self`
            let node = unsafe { ptr.as_ref() };
            black_height += usize::from(!node.is_red());
            cursor = node.left;
        }
        black_height
    }

    /// Verifies every red-black invariant, the ordering, the parent links and the recorded size.
    ///
    /// Returns the black height on success. Complexity: O(n)
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        // SAFETY: the nodes live as long as `&self`
        if unsafe { node::is_red(self.root) } {
            return Err(InvariantViolation::RedRoot)
        }
        let mut checker = check::Checker::new(&self.compare, true);
        // SAFETY: the root has no parent
        let black_height = unsafe { checker.check(self.root, None)? };
        self.check_size(checker.counted)?;
        Ok(black_height)
    }

    /// Only the parts of [`RBTree::check_invariants`] that rotations must preserve (order and links).
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn check_links(&self) -> Result<(), InvariantViolation> {
        let mut checker = check::Checker::new(&self.compare, false);
        // SAFETY: the root has no parent
        unsafe { checker.check(self.root, None)? };
        self.check_size(checker.counted)
    }

    fn check_size(&self, counted: usize) -> Result<(), InvariantViolation> {
        if counted != self.size {
            return Err(InvariantViolation::SizeMismatch { counted, recorded: self.size })
        }
        Ok(())
    }

    /// Destroys the tree, handing every element to the destructor (in post-order).
    ///
    /// Dropping the tree does the same thing, this just makes it explicit.
    pub fn destroy(self) {
        drop(self)
    }
}

impl<T, C, D, S> fmt::Debug for RBTree<T, C, D, S>
where
    T: fmt::Debug,
    C: Fn(&T, &T) -> Ordering,
    D: FnMut(T),
    S: NodeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        self.for_each(|value| { set.entry(value); true });
        set.finish()
    }
}

impl<T, C, D, S> Drop for RBTree<T, C, D, S>
where
    D: FnMut(T),
    S: NodeSource,
{
    fn drop(&mut self) {
        let root = self.root.take();
        let held = std::mem::replace(&mut self.size, 0);

        let mut teardown = Teardown { freed: 0, panic: None };
        // SAFETY: we just unlinked the root, so the whole structure is ours and unreachable from `self`
        unsafe { traverse::tear_down(root, &self.source, &mut self.free, &mut teardown) };
        debug_assert_eq!(teardown.freed, held);
        debug!("destroyed tree, released {} elements", teardown.freed);

        if let Some(payload) = teardown.panic {
            // panicking again while unwinding would abort
            if !std::thread::panicking() {
                std::panic::resume_unwind(payload)
            }
        }
    }
}
