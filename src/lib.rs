//! An arena-backed AVL tree set for Rust.
//!
//! This crate provides [`AvlTree`], an ordered set of keys kept height-balanced by
//! single and double rotations. Every node stores its balance factor
//! (`height(left) - height(right)`), which stays within `-1..=1` after every
//! completed insert or remove and can be queried per key.
//!
//! - [`insert`](AvlTree::insert) / [`remove`](AvlTree::remove) - O(log n), duplicates are ignored
//! - [`find`](AvlTree::find) - a [`NodeRef`] into the tree exposing the stored balance factor
//! - [`balance_factor`](AvlTree::balance_factor) - fails with [`Error::NotFound`] for absent keys
//! - [`iter`](AvlTree::iter) - an explicit-stack in-order cursor; advancing past the end fails
//!   with [`Error::OutOfRange`]
//!
//! # Example
//!
//! ```
//! use avl_tree::{AvlTree, Error};
//!
//! let mut tree = AvlTree::new();
//! for key in [5, 4, 1, 2] {
//!     tree.insert(key);
//! }
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 4, 5]);
//! assert_eq!(tree.to_string(), "1 2 4 5");
//!
//! // Balance factors are always within -1..=1.
//! for key in &tree {
//!     assert!(tree.balance_factor(key).unwrap().abs() <= 1);
//! }
//! assert_eq!(tree.balance_factor(&42), Err(Error::NotFound));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`; the default `std` feature adds
//!   [`print_tree`](AvlTree::print_tree)
//! - **Arena storage** - Nodes live in one contiguous slot vector, freed slots are reused
//! - **Cached heights** - Rebalancing never walks a subtree to measure it

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod error;
mod raw;

pub mod avl;

pub use avl::{AvlTree, NodeRef};
pub use error::Error;
