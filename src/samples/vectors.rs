use std::cmp::Ordering;
use std::fmt;

use crate::rbtree::{NodeSource, RBTree};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    pub coords: Vec<f64>,
}

impl Vector {
    pub fn new(coords: impl Into<Vec<f64>>) -> Self {
        Self { coords: coords.into() }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The squared L2 norm.
    pub fn norm_squared(&self) -> f64 {
        self.coords.iter().map(|x| x * x).sum()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.coords.iter().enumerate() {
            if i > 0 { write!(f, ", ")? }
            write!(f, "{x}")?;
        }
        write!(f, ")")
    }
}

pub type VectorTree = RBTree<Vector, fn(&Vector, &Vector) -> Ordering, fn(Vector)>;

/// Element by element: the first differing coordinate decides. If one vector is a prefix of the
/// other, the shorter one is smaller.
///
/// Coordinates are compared with [`f64::total_cmp`], so this is a total order even with NaNs around
/// (at the cost of telling `-0.0` and `0.0` apart).
pub fn vector_compare_1by1(a: &Vector, b: &Vector) -> Ordering {
    a.coords.iter()
        .zip(&b.coords)
        .map(|(x, y)| x.total_cmp(y))
        .find(|&o| o != Ordering::Equal)
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// Visitor that keeps a copy of the vector with the largest norm seen so far.
///
/// The first vector visited is always copied; after that only a strictly larger norm replaces it.
pub fn copy_if_norm_is_larger(vector: &Vector, max: &mut Option<Vector>) -> bool {
    let larger = match max {
        None => true,
        Some(current) => vector.norm_squared() > current.norm_squared(),
    };
    if larger {
        *max = Some(vector.clone());
    }
    true
}

/// A copy of the vector with the largest L2 norm, or `None` for an empty tree.
///
/// Ties go to the vector that comes first in the tree's order.
pub fn find_max_norm_vector<C, D, S>(tree: &RBTree<Vector, C, D, S>) -> Option<Vector>
where
    C: Fn(&Vector, &Vector) -> Ordering,
    D: FnMut(Vector),
    S: NodeSource,
{
    let mut max = None;
    tree.for_each_with(copy_if_norm_is_larger, &mut max);
    max
}

pub fn vector_tree() -> VectorTree {
    VectorTree::new(vector_compare_1by1, drop)
}
