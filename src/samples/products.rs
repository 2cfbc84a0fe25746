use std::cmp::Ordering;
use std::fmt;

use crate::rbtree::RBTree;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self { name: name.into(), price }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}.\t\tPrice: {:.2}", self.name, self.price)
    }
}

/// Products are ordered (and deduplicated) by name alone, the price is ignored.
pub fn product_compare_by_name(a: &Product, b: &Product) -> Ordering {
    a.name.cmp(&b.name)
}

/// The six products the demo works with.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new("MacBook Pro", 1499.0),
        Product::new("iPod", 199.0),
        Product::new("iPhone", 599.0),
        Product::new("iPad", 499.0),
        Product::new("Apple Watch", 299.0),
        Product::new("Apple TV", 199.0),
    ]
}

pub fn product_tree<D: FnMut(Product)>(free: D) -> RBTree<Product, fn(&Product, &Product) -> Ordering, D> {
    RBTree::new(product_compare_by_name as fn(&Product, &Product) -> Ordering, free)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_selection() {
        let products = sample_products();
        let mut freed = Vec::new();
        {
            let mut tree = product_tree(|p: Product| freed.push(p.name));
            for i in [2, 3, 4, 0] {
                tree.insert(products[i].clone()).unwrap();
            }

            for (i, product) in products.iter().enumerate() {
                assert_eq!(tree.contains(product), i != 1 && i != 5, "{}", product.name);
            }
            assert_eq!(tree.len(), 4);

            let mut lines = Vec::new();
            tree.for_each(|p| { lines.push(p.to_string()); true });
            assert_eq!(lines, vec![
                "Name: Apple Watch.\t\tPrice: 299.00",
                "Name: MacBook Pro.\t\tPrice: 1499.00",
                "Name: iPad.\t\tPrice: 499.00",
                "Name: iPhone.\t\tPrice: 599.00",
            ]);
            tree.destroy();
        }
        freed.sort();
        assert_eq!(freed, vec!["Apple Watch", "MacBook Pro", "iPad", "iPhone"]);
    }

    #[test]
    fn same_name_different_price_is_a_duplicate() {
        let mut tree = product_tree(drop);
        tree.insert(Product::new("iPod", 199.0)).unwrap();
        let rejected = tree.insert(Product::new("iPod", 249.0)).unwrap_err().into_inner();
        assert_eq!(rejected.price, 249.0);
        assert_eq!(tree.get(&Product::new("iPod", 0.0)).map(|p| p.price), Some(199.0));
    }
}
