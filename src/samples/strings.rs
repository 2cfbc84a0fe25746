use std::cmp::Ordering;

use crate::rbtree::RBTree;

pub type StringTree = RBTree<String, fn(&String, &String) -> Ordering, fn(String)>;

/// Lexicographic (byte-wise) order.
pub fn string_compare<S: AsRef<str> + ?Sized>(a: &S, b: &S) -> Ordering {
    a.as_ref().cmp(b.as_ref())
}

/// Visitor that appends `word` and a newline to `out`.
pub fn concatenate<S: AsRef<str> + ?Sized>(word: &S, out: &mut String) -> bool {
    out.push_str(word.as_ref());
    out.push('\n');
    true
}

pub fn string_tree() -> StringTree {
    StringTree::new(string_compare, drop)
}
