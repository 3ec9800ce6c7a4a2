#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bucket;

/// Errors reported by the fallible table operations.
pub mod error;

/// A hash table using separate chaining.
///
/// This module provides [`HashTable`], its entry API and the bucket
/// introspection helpers.
pub mod hash_table;

/// Iterators over the entries, keys and values of a [`HashTable`].
pub mod iter;

/// Bucket distribution statistics.
///
/// Only available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
pub mod stats;

pub use error::Error;
pub use hash_table::Entry;
pub use hash_table::HashTable;
