//! Walks an `AvlTree` through inserts, lookups, removals and iteration, printing
//! the tree's shape along the way.
//!
//! Run with `cargo run --example driver`.

use avl_tree::{AvlTree, Error};

fn print_section(title: &str, tree: &AvlTree<i32>) {
    println!("{title}:");
    tree.print_tree();
    println!();
}

fn main() -> Result<(), Error> {
    let mut tree = AvlTree::new();

    tree.extend([5, 4, 1, 2]);
    print_section("AVL tree", &tree);

    // The second 3 is a duplicate and is ignored.
    tree.extend([3, 7, 3, 8]);
    print_section("AVL tree", &tree);

    // So is the second 5.
    tree.extend([20, 5, 15]);
    print_section("AVL tree", &tree);

    println!("Looking up key 4:");
    match tree.find(&4) {
        Some(node) => println!("Key found (balance factor {})", node.balance_factor()),
        None => println!("Key not found"),
    }

    for key in [4, 5, 15] {
        println!("balance_factor({key}) = {}", tree.balance_factor(&key)?);
    }
    if let Err(err) = tree.balance_factor(&42) {
        println!("balance_factor(42): {err}");
    }

    tree.remove(&4);
    print_section("AVL tree after removing key 4", &tree);
    println!("in order: {tree}");

    let mut it = tree.iter();
    while let Some(key) = it.current() {
        print!("{key} ");
        it.advance()?;
    }
    println!();
    if let Err(err) = it.advance() {
        println!("advancing past the end: {err}");
    }

    tree.clear();
    print_section("AVL tree after clear", &tree);
    assert_eq!(tree.iter(), tree.end());

    Ok(())
}
