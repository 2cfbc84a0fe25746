#![deny(unsafe_op_in_unsafe_fn)]

// the tree itself
pub mod rbtree;

// things to put in it
pub mod samples;

// logger setup for the binaries
pub mod logging;

pub use rbtree::{GlobalSource, InsertError, InvariantViolation, NodeSource, OrdTree, RBTree, TreeError};
