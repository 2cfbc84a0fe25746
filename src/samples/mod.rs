//! Element types to put in a tree, with their comparators and visitors.

pub mod products;
pub mod strings;
pub mod vectors;

pub use products::{product_compare_by_name, product_tree, sample_products, Product};
pub use strings::{concatenate, string_compare, string_tree, StringTree};
pub use vectors::{copy_if_norm_is_larger, find_max_norm_vector, vector_compare_1by1, vector_tree, Vector, VectorTree};
