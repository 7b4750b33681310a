//! Order-statistic AVL tree collections for Rust.
//!
//! This crate provides [`OSTreeMap`] and [`OSTreeSet`], sorted collections backed by a
//! height-balanced binary search tree in which every node also records the size of its
//! subtree. Besides the usual ordered-collection operations they answer order-statistic
//! queries in O(log n):
//!
//! - [`get_by_rank`](OSTreeMap::get_by_rank) - Get the element at a given sorted position
//! - [`rank_of`](OSTreeMap::rank_of) - Get the sorted position of a key
//! - [`at_most`](OSTreeMap::at_most) / [`at_least`](OSTreeMap::at_least) - Nearest key on
//!   either side of a probe
//! - [`count_at_most`](OSTreeMap::count_at_most) / [`count_at_least`](OSTreeMap::count_at_least) -
//!   Number of keys on either side of a probe
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first element
//!
//! # Example
//!
//! ```
//! use avl_ostree::{OSTreeMap, Rank};
//!
//! let mut scores = OSTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Median entry, keys sort alphabetically.
//! let (name, _) = scores.get_by_rank(1).unwrap();
//! assert_eq!(*name, "Bob");
//!
//! assert_eq!(scores.rank_of(&"Carol"), Some(2));
//! assert_eq!(scores.count_at_most(&"Bz"), 2);
//! assert_eq!(scores[Rank(0)], 100);
//! ```
//!
//! # Comparators
//!
//! Keys are ordered by a [`Comparator`]. The default, [`NaturalOrder`], uses [`Ord`] and
//! cannot fail, so the plain methods (`insert`, `get`, ...) return their results directly.
//! Any comparator, including fallible ones such as [`PartialOrder`] or a closure wrapped in
//! [`FnComparator`], is available through the `try_*` methods. When a comparison fails the
//! operation returns the comparator's error and the collection is left exactly as it was.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **No unsafe code** - Nodes live in an arena and link to each other through handles
//! - **O(log n) rank operations** - Subtree sizes are maintained through every rotation

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
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

mod order_statistic;
mod raw;

pub mod compare;
pub mod ostree_map;
pub mod ostree_set;

pub use compare::{Comparator, FnComparator, Incomparable, NaturalOrder, PartialOrder};
pub use order_statistic::Rank;
pub use ostree_map::OSTreeMap;
pub use ostree_set::OSTreeSet;
