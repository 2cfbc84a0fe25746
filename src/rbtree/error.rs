use std::{error::Error, fmt};

/// Reasons a tree could not be built from its callbacks.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    MissingComparator,
    MissingDestructor,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TreeError::MissingComparator => write!(f, "TreeError: no comparator was supplied"),
            TreeError::MissingDestructor => write!(f, "TreeError: no destructor was supplied"),
        }
    }
}

impl Error for TreeError {}

/// A rejected insertion. The item is handed back, the tree was not touched.
#[non_exhaustive]
#[derive(PartialEq, Eq)]
pub enum InsertError<T> {
    /// An element comparing equal is already stored.
    Duplicate(T),
    /// The node source had no memory for a new node.
    AllocationFailure(T),
}

impl<T> InsertError<T> {
    /// Gives the rejected item back to the caller.
    pub fn into_inner(self) -> T {
        match self {
            InsertError::Duplicate(item) | InsertError::AllocationFailure(item) => item,
        }
    }

    pub fn item(&self) -> &T {
        match self {
            InsertError::Duplicate(item) | InsertError::AllocationFailure(item) => item,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, InsertError::Duplicate(_))
    }
}

// no `T: Debug` bound, so `unwrap` works for any payload
impl<T> fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::Duplicate(_) => f.write_str("Duplicate(..)"),
            InsertError::AllocationFailure(_) => f.write_str("AllocationFailure(..)"),
        }
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InsertError::Duplicate(_) => write!(f, "InsertError: an equal element is already in the tree"),
            InsertError::AllocationFailure(_) => write!(f, "InsertError: could not allocate a node"),
        }
    }
}

impl<T> Error for InsertError<T> {}

/// A broken red-black invariant, as found by [`RBTree::check_invariants`](super::RBTree::check_invariants).
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    RedRoot,
    RedChildOfRed,
    BlackHeightMismatch { left: usize, right: usize },
    OutOfOrder,
    BrokenParentLink,
    SizeMismatch { counted: usize, recorded: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvariantViolation::RedRoot => write!(f, "the root is red"),
            InvariantViolation::RedChildOfRed => write!(f, "a red node has a red child"),
            InvariantViolation::BlackHeightMismatch { left, right } =>
                write!(f, "black heights differ between subtrees ({left} vs {right})"),
            InvariantViolation::OutOfOrder => write!(f, "in-order sequence is not strictly increasing"),
            InvariantViolation::BrokenParentLink => write!(f, "a parent link does not match its owning child link"),
            InvariantViolation::SizeMismatch { counted, recorded } =>
                write!(f, "tree holds {counted} nodes but records a size of {recorded}"),
        }
    }
}

impl Error for InvariantViolation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_items_come_back() {
        let err = InsertError::Duplicate(String::from("X"));
        assert!(err.is_duplicate());
        assert_eq!(err.item(), "X");
        assert_eq!(err.into_inner(), "X");

        let err = InsertError::AllocationFailure(vec![1.0, 2.0]);
        assert!(!err.is_duplicate());
        assert_eq!(format!("{err:?}"), "AllocationFailure(..)");
        assert_eq!(err.into_inner(), vec![1.0, 2.0]);
    }

    #[test]
    fn messages() {
        assert_eq!(TreeError::MissingComparator.to_string(), "TreeError: no comparator was supplied");
        assert_eq!(
            InsertError::Duplicate(()).to_string(),
            "InsertError: an equal element is already in the tree"
        );
        assert_eq!(
            InvariantViolation::SizeMismatch { counted: 2, recorded: 3 }.to_string(),
            "tree holds 2 nodes but records a size of 3"
        );
    }
}
