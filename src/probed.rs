//! Open addressing with linear probing: all entries live directly in one
//! flat slot array.

mod builder;
pub(crate) mod map;

pub use builder::MapBuilder;
pub use map::ProbedMap;

/// An occupied slot. The slot state itself is carried by the surrounding
/// `Option`: `None` is an empty slot, so any value of `V` can be stored
/// without reserving a sentinel.
pub(crate) struct Slot<V> {
    pub(crate) key: i64,
    pub(crate) value: V,
}
