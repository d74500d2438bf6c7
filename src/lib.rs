//! Red-black tree collections for Rust.
//!
//! This crate provides [`RBTreeMap`], [`RBTreeSet`], and [`RBTreeMultiset`]:
//! ordered collections backed by a single red-black tree engine with
//! O(log n) insertion, removal, and lookup.
//!
//! - [`RBTreeMap`] - unique keys mapped to values, sorted by key
//! - [`RBTreeSet`] - unique values, sorted
//! - [`RBTreeMultiset`] - duplicate values, sorted, with
//!   [`count`](RBTreeMultiset::count) and
//!   [`equal_range`](RBTreeMultiset::equal_range)
//!
//! # Example
//!
//! ```
//! use ruby_tree::{RBTreeMap, RBTreeMultiset};
//!
//! let mut scores = RBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//!
//! // Keys come back in sorted order.
//! let names: Vec<_> = scores.keys().copied().collect();
//! assert_eq!(names, ["Alice", "Bob"]);
//!
//! let mut rolls = RBTreeMultiset::new();
//! rolls.insert_many([3, 1, 3, 3, 6]);
//! assert_eq!(rolls.count(&3), 3);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - only requires `alloc`
//! - **First-wins unique insertion** - a duplicate key never overwrites the
//!   stored element (use [`RBTreeMap::insert_or_assign`] to overwrite)
//! - **Arena storage** - nodes live in a slot arena addressed by niche-packed
//!   handles, so parent back-references are plain indices rather than owning
//!   pointers
//!
//! # Implementation
//!
//! All three collections share one engine: a red-black tree whose nodes hold
//! a key, a color tag, and parent/left/right links. Rebalancing keeps the
//! height at most 2·log2(n + 1), which bounds every operation above.
//! Iteration follows the in-order successor/predecessor rules over the
//! parent links and needs no auxiliary stack.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod raw;

pub mod rbtree_map;
pub mod rbtree_multiset;
pub mod rbtree_set;

pub use rbtree_map::RBTreeMap;
pub use rbtree_multiset::RBTreeMultiset;
pub use rbtree_set::RBTreeSet;
