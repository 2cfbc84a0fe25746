use std::process::ExitCode;

use log::{debug, error};
use redblack::logging::initialize_logging;
use redblack::samples::{product_tree, sample_products, Product};

fn main() -> ExitCode {
    if let Err(e) = initialize_logging() {
        eprintln!("{e}");
    }

    let products = sample_products();
    let mut tree = product_tree(|p: Product| debug!("freeing {}", p.name));
    for i in [2, 3, 4, 0] {
        if let Err(e) = tree.insert(products[i].clone()) {
            error!("could not insert {}: {e}", products[i].name);
        }
    }

    for (i, product) in products.iter().enumerate() {
        let should_be_in = i != 1 && i != 5;
        if tree.contains(product) {
            println!("\"{}\" is in the tree.", product.name);
            if !should_be_in {
                println!(" This product should not be in the tree!\nTest failed, aborting");
                return ExitCode::from(1)
            }
        } else {
            println!("\"{}\" is not in the tree.", product.name);
            if should_be_in {
                println!(" This product should be in the tree!\nTest failed, aborting");
                return ExitCode::from(2)
            }
        }
    }

    println!("\nThe number of products in the tree is {}.\n", tree.len());
    tree.for_each(|p| { println!("{p}"); true });
    tree.destroy();
    println!("test passed");
    ExitCode::SUCCESS
}
