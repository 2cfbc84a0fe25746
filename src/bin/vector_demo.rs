use log::warn;
use redblack::logging::initialize_logging;
use redblack::samples::{concatenate, find_max_norm_vector, string_tree, vector_tree, Vector};

fn main() {
    if let Err(e) = initialize_logging() {
        eprintln!("{e}");
    }

    let mut vectors = vector_tree();
    let samples = [
        vec![1.0, 2.0, 3.0],
        vec![-4.0, 0.5],
        vec![1.0, 2.0],
        vec![0.0, 0.0, 0.0, 5.0],
        vec![1.0, 2.0, 3.0], // duplicate
    ];
    for coords in samples {
        if let Err(e) = vectors.insert(Vector::new(coords)) {
            warn!("skipping {}: {e}", e.item());
        }
    }

    println!("{} vectors, in order:", vectors.len());
    vectors.for_each(|v| { println!("  {v}"); true });
    match find_max_norm_vector(&vectors) {
        Some(v) => println!("largest norm: {v} (|v|² = {})", v.norm_squared()),
        None => println!("no vectors"),
    }

    let mut words = string_tree();
    for word in "the quick brown fox jumps over the lazy dog".split_whitespace() {
        // "the" shows up twice, the second one bounces off
        let _ = words.insert(word.to_string());
    }
    let mut text = String::new();
    words.for_each_with(concatenate, &mut text);
    print!("{text}");
}
