use super::ProbedMap;
use crate::common::{self, error::ConfigError};

use std::marker::PhantomData;

/// Builds a [`ProbedMap`] with custom initial capacity and load factor.
///
/// # Examples
///
/// ```rust
/// use longmap::probed::{MapBuilder, ProbedMap};
///
/// let mut map: ProbedMap<&str> = MapBuilder::new()
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
    /// Constructs a builder preloaded with the default capacity (8 slots)
    /// and the default load factor (0.75).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial number of slots. Zero is coerced to one at build
    /// time.
    pub fn initial_capacity(self, capacity: usize) -> Self {
        Self {
            initial_capacity: capacity,
            ..self
        }
    }

    /// Sets the fill ratio at which the slot array doubles.
    ///
    /// Must be within `(0, 1]`; [`build`][Self::build] rejects anything
    /// else. Lower values keep probe runs short at the cost of memory.
    pub fn load_factor(self, load_factor: f64) -> Self {
        Self {
            load_factor,
            ..self
        }
    }

    /// Builds a `ProbedMap<V>`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLoadFactor`] when the configured load
    /// factor is outside `(0, 1]`.
    pub fn build(self) -> Result<ProbedMap<V>, ConfigError> {
        let (capacity, load_factor) =
            common::validated_config(self.initial_capacity, self.load_factor)?;
        Ok(ProbedMap::with_slots(capacity, load_factor))
    }
}

#[cfg(test)]
mod tests {
    use super::MapBuilder;
    use crate::ConfigError;

    #[test]
    fn build_with_defaults() {
        let mut map = MapBuilder::new().build().unwrap();

        assert_eq!(map.capacity(), 8);
        assert_eq!(map.load_factor(), 0.75);

        map.insert(1, "alice");
        assert_eq!(map.get(1), Some(&"alice"));
    }

    #[test]
    fn build_rejects_out_of_range_load_factor() {
        for bad in [0.0, -1.0, 1.01, f64::NAN] {
            let result = MapBuilder::<()>::new().load_factor(bad).build();
            assert!(matches!(result, Err(ConfigError::InvalidLoadFactor(_))));
        }
    }

    #[test]
    fn build_coerces_zero_capacity() {
        let map = MapBuilder::<()>::new().initial_capacity(0).build().unwrap();
        assert_eq!(map.capacity(), 1);
    }
}
