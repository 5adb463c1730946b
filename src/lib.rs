#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

//! Memory-dense hash maps specialized for 64-bit integer keys.
//!
//! This crate provides two implementations of the same mapping contract,
//! differing only in how they resolve hash collisions:
//!
//! - [`probed::ProbedMap`] stores every entry directly in one flat slot
//!   array and resolves collisions by linear probing. Entries need no
//!   per-node allocation, which favors cache locality and a small
//!   footprint at moderate load.
//! - [`chained::ChainedMap`] gives each bucket its own singly linked chain
//!   of entries. Every entry costs a node allocation, but removal never
//!   disturbs neighboring entries and heavy collisions degrade one bucket
//!   at a time.
//!
//! Both maps share the same hashing and resize policy: the key is folded
//! to 32 bits and avalanche-mixed before being reduced to a slot index,
//! capacity doubles when an insertion finds the table filled to its load
//! factor, and capacity halves when a removal leaves at most one eighth of
//! the slots occupied. Resizes are synchronous full rehashes; the call
//! that triggers one occasionally costs O(capacity).
//!
//! The maps are single-threaded by design. All mutating operations take
//! `&mut self`, so a caller needing shared access must provide its own
//! synchronization.
//!
//! # Examples
//!
//! ```rust
//! use longmap::probed::ProbedMap;
//!
//! let mut map = ProbedMap::new();
//! map.insert(1, "person");
//! map.insert(2, "car");
//!
//! assert_eq!(map.get(1), Some(&"person"));
//! assert_eq!(map.get(3), None);
//!
//! map.remove(1);
//! assert_eq!(map.len(), 1);
//! ```
//!
//! Choosing parameters up front goes through the per-module builders:
//!
//! ```rust
//! use longmap::chained::{ChainedMap, MapBuilder};
//!
//! let mut map: ChainedMap<String> = MapBuilder::new()
//!     .initial_capacity(64)
//!     .load_factor(0.5)
//!     .build()?;
//! map.insert(7, "seven".to_string());
//! # Ok::<(), longmap::ConfigError>(())
//! ```

pub mod chained;
pub(crate) mod common;
pub mod probed;

pub use common::error::ConfigError;
