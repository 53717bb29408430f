#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A key-value map built on the Robin Hood HashTable.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a key-value interface with configurable hashers and idempotent insertion.
pub mod hash_map;

pub mod hash_table;

pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_map::KeyNotFound;
pub use hash_table::HashTable;

/// The hasher builder used by [`HashMap`] when none is supplied.
#[cfg(feature = "foldhash")]
pub type DefaultHashBuilder = foldhash::fast::RandomState;

/// Placeholder hasher builder used when the `foldhash` feature is disabled.
///
/// This type is uninhabited; without `foldhash`, maps must be constructed
/// with an explicit hasher builder via [`HashMap::with_hasher`].
#[cfg(not(feature = "foldhash"))]
#[derive(Clone)]
pub enum DefaultHashBuilder {}
