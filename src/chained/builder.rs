use super::ChainedMap;
use crate::common::{self, error::ConfigError};

use std::marker::PhantomData;

/// Builds a [`ChainedMap`] with custom initial capacity and load factor.
///
/// # Examples
///
/// ```rust
/// use longmap::chained::{ChainedMap, MapBuilder};
///
/// let mut map: ChainedMap<&str> = MapBuilder::new()
///     .initial_capacity(32)
///     .load_factor(0.5)
///     .build()?;
///
/// map.insert(7, "seven");
/// assert_eq!(map.capacity(), 32);
/// # Ok::<(), longmap::ConfigError>(())
/// ```
pub struct MapBuilder<V> {
    initial_capacity: usize,
    load_factor: f64,
    value_type: PhantomData<V>,
}

impl<V> Default for MapBuilder<V> {
    fn default() -> Self {
        Self {
            initial_capacity: common::DEFAULT_CAPACITY,
            load_factor: common::DEFAULT_LOAD_FACTOR,
            value_type: PhantomData,
        }
    }
}

impl<V> MapBuilder<V> {
    /// Constructs a builder preloaded with the default capacity (8
    /// buckets) and the default load factor (0.75).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial number of buckets. Zero is coerced to one at
    /// build time.
    pub fn initial_capacity(self, capacity: usize) -> Self {
        Self {
            initial_capacity: capacity,
            ..self
        }
    }

    /// Sets the fill ratio at which the bucket array doubles.
    ///
    /// Must be within `(0, 1]`; [`build`][Self::build] rejects anything
    /// else. Values near one trade longer chains for fewer buckets.
    pub fn load_factor(self, load_factor: f64) -> Self {
        Self {
            load_factor,
            ..self
        }
    }

    /// Builds a `ChainedMap<V>`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLoadFactor`] when the configured load
    /// factor is outside `(0, 1]`.
    pub fn build(self) -> Result<ChainedMap<V>, ConfigError> {
        let (capacity, load_factor) =
            common::validated_config(self.initial_capacity, self.load_factor)?;
        Ok(ChainedMap::with_buckets(capacity, load_factor))
    }
}
