use super::{Chain, MapBuilder, Node};
use crate::common::{self, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, SHRINK_DIVISOR};

use std::{fmt, mem};

/// A hash map for `i64` keys that resolves collisions by chaining: each
/// bucket owns a singly linked list of the entries that hash to it.
///
/// Compared to [`ProbedMap`][probed-map], every entry costs one node
/// allocation, but removal never disturbs neighboring entries and a
/// collision-heavy workload degrades one bucket at a time instead of
/// forming probe clusters. Shrinking only relinks surviving nodes; no
/// entry is copied or reallocated.
///
/// [probed-map]: ../probed/struct.ProbedMap.html
///
/// # Examples
///
/// ```rust
/// use longmap::chained::ChainedMap;
///
/// let mut map = ChainedMap::new();
/// map.insert(1, "person");
/// map.insert(2, "car");
///
/// assert_eq!(map.get(1), Some(&"person"));
/// assert_eq!(map.get(3), None);
///
/// map.remove(1);
/// assert_eq!(map.get(1), None);
/// assert_eq!(map.len(), 1);
/// ```
///
/// # Resizing
///
/// The bucket array doubles when an insertion finds the table filled to
/// its load factor, and halves when a removal leaves at most one eighth
/// of the buckets' worth of entries. Both rebucket every node
/// synchronously, so the triggering call occasionally costs O(capacity).
pub struct ChainedMap<V> {
    buckets: Box<[Chain<V>]>,
    len: usize,
    load_factor: f64,
}

//
// public
//
impl<V> ChainedMap<V> {
    /// Constructs an empty map with the default capacity (8 buckets) and
    /// the default load factor (0.75).
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// Constructs an empty map with the given capacity and the default
    /// load factor. A `capacity` of zero is coerced to one bucket.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_buckets(capacity.max(1), DEFAULT_LOAD_FACTOR)
    }

    /// Returns a [`MapBuilder`] for configuring the initial capacity and
    /// the load factor.
    pub fn builder() -> MapBuilder<V> {
        MapBuilder::default()
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the fill ratio at which the bucket array grows.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get(&self, key: i64) -> Option<&V> {
        let mut node = self.buckets[self.bucket_index(key)].as_deref();
        while let Some(n) = node {
            if n.key == key {
                return Some(&n.value);
            }
            node = n.next.as_deref();
        }
        None
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        let index = self.bucket_index(key);
        let mut node = self.buckets[index].as_deref_mut();
        while let Some(n) = node {
            if n.key == key {
                return Some(&mut n.value);
            }
            node = n.next.as_deref_mut();
        }
        None
    }

    /// Returns `true` if the map holds an entry for `key`.
    pub fn contains_key(&self, key: i64) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if some key maps to a value equal to `value`.
    ///
    /// This walks every chain and is therefore more expensive than
    /// [`contains_key`][Self::contains_key]. Matching uses `PartialEq` on
    /// the stored values; [`ProbedMap`][probed-map] follows the same
    /// contract.
    ///
    /// [probed-map]: ../probed/struct.ProbedMap.html#method.contains_value
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.buckets.iter().any(|bucket| {
            let mut node = bucket.as_deref();
            while let Some(n) = node {
                if n.value == *value {
                    return true;
                }
                node = n.next.as_deref();
            }
            false
        })
    }

    /// Inserts a key-value pair, returning the value previously stored
    /// under `key` if there was one.
    ///
    /// When the table is already filled to its load factor, the capacity
    /// is doubled before the entry is placed. A new entry is prepended, so
    /// it becomes the head of its bucket's chain.
    pub fn insert(&mut self, key: i64, value: V) -> Option<V> {
        if self.at_load_limit() {
            self.rebucket(self.buckets.len() * 2);
        }

        let index = self.bucket_index(key);
        let mut node = self.buckets[index].as_deref_mut();
        while let Some(n) = node {
            if n.key == key {
                return Some(mem::replace(&mut n.value, value));
            }
            node = n.next.as_deref_mut();
        }

        let head = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Node { key, value, next: head }));
        self.len += 1;
        None
    }

    /// Removes the entry stored under `key`, returning its value. Absent
    /// keys are a no-op returning `None`.
    ///
    /// The node is unlinked at its predecessor (or the bucket head when it
    /// is first in the chain); no other entry moves.
    pub fn remove(&mut self, key: i64) -> Option<V> {
        let index = self.bucket_index(key);

        let mut cursor = &mut self.buckets[index];
        while cursor.as_ref().map_or(false, |node| node.key != key) {
            cursor = &mut cursor.as_mut().unwrap().next;
        }
        let mut node = cursor.take()?;
        *cursor = node.next.take();
        self.len -= 1;

        if self.len != 0 && self.len <= self.buckets.len() / SHRINK_DIVISOR {
            self.rebucket(self.buckets.len() / 2);
        }
        Some(node.value)
    }
}

//
// private
//
impl<V> ChainedMap<V> {
    pub(crate) fn with_buckets(capacity: usize, load_factor: f64) -> Self {
        Self {
            buckets: Self::alloc_buckets(capacity),
            len: 0,
            load_factor,
        }
    }

    fn alloc_buckets(capacity: usize) -> Box<[Chain<V>]> {
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        buckets.into_boxed_slice()
    }

    #[inline]
    fn bucket_index(&self, key: i64) -> usize {
        common::index_for(key, self.buckets.len())
    }

    #[inline]
    fn at_load_limit(&self) -> bool {
        self.len as f64 >= self.buckets.len() as f64 * self.load_factor
    }

    /// Rebuilds the bucket array at `new_capacity`, relinking every node
    /// into the bucket its key selects under the new capacity. Nodes move;
    /// keys and values are never copied.
    fn rebucket(&mut self, new_capacity: usize) {
        #[cfg(feature = "logging")]
        log::trace!(
            "chained table resize: {} -> {} buckets ({} entries)",
            self.buckets.len(),
            new_capacity,
            self.len
        );

        let old = mem::replace(&mut self.buckets, Self::alloc_buckets(new_capacity));
        for head in old.into_vec() {
            let mut next = head;
            while let Some(mut node) = next {
                next = node.next.take();
                let index = common::index_for(node.key, new_capacity);
                node.next = self.buckets[index].take();
                self.buckets[index] = Some(node);
            }
        }
    }
}

impl<V> Drop for ChainedMap<V> {
    fn drop(&mut self) {
        // Unlink each chain iteratively; dropping a long chain through the
        // default recursive path would consume stack per node.
        for bucket in self.buckets.iter_mut() {
            let mut next = bucket.take();
            while let Some(mut node) = next {
                next = node.next.take();
            }
        }
    }
}

impl<V> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for ChainedMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedMap")
            .field("len", &self.len)
            .field("capacity", &self.buckets.len())
            .field("load_factor", &self.load_factor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::ChainedMap;
    use crate::common;

    use std::collections::HashMap;
    use std::rc::Rc;

    /// Keys that select the same bucket at the given capacity.
    fn colliding_keys(capacity: usize, count: usize) -> Vec<i64> {
        let bucket = common::index_for(0, capacity);
        (0..100_000)
            .filter(|&key| common::index_for(key, capacity) == bucket)
            .take(count)
            .collect()
    }

    #[test]
    fn basic_insert_and_get() {
        let mut map = ChainedMap::new();
        map.insert(1, "person");
        map.insert(2, "car");

        assert_eq!(map.get(1), Some(&"person"));
        assert_eq!(map.get(2), Some(&"car"));
        assert_eq!(map.get(3), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn reinsert_overwrites_without_duplicating() {
        let mut map = ChainedMap::new();
        assert_eq!(map.insert(1, "person"), None);
        assert_eq!(map.insert(2, "car"), None);
        assert_eq!(map.insert(1, "animal"), Some("person"));

        assert_eq!(map.get(1), Some(&"animal"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn same_value_under_two_keys_is_shared() {
        let mut map = ChainedMap::new();
        let value = Rc::new("shared");
        map.insert(1, Rc::clone(&value));
        map.insert(2, Rc::clone(&value));

        let first = map.get(1).unwrap();
        let second = map.get(2).unwrap();
        assert!(Rc::ptr_eq(first, second));
    }

    #[test]
    fn contains_key() {
        let mut map = ChainedMap::new();
        map.insert(1, "person");

        assert!(map.contains_key(1));
        assert!(!map.contains_key(2));
    }

    #[test]
    fn contains_value_uses_equality() {
        let mut map = ChainedMap::new();
        map.insert(1, String::from("person"));

        // An equal but distinct value is found. Both map variants agree on
        // this contract.
        assert!(map.contains_value(&String::from("person")));
        assert!(!map.contains_value(&String::from("car")));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut map = ChainedMap::new();
        map.insert(1, 10);
        *map.get_mut(1).unwrap() += 5;

        assert_eq!(map.get(1), Some(&15));
        assert_eq!(map.get_mut(2), None);
    }

    #[test]
    fn remove_existing_key() {
        let mut map = ChainedMap::new();
        map.insert(1, "person");
        map.insert(2, "car");

        assert_eq!(map.remove(1), Some("person"));
        assert_eq!(map.get(1), None);
        assert_eq!(map.get(2), Some(&"car"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn remove_absent_key_is_a_noop() {
        let mut map = ChainedMap::new();
        map.insert(1, "person");

        assert_eq!(map.remove(9), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(1), Some(&"person"));
    }

    #[test]
    fn removal_at_every_chain_position() {
        let capacity = 16;
        let keys = colliding_keys(capacity, 4);
        assert_eq!(keys.len(), 4);

        // Unlink the head, an interior node, and the tail of one chain.
        for &victim in &keys {
            let mut map = ChainedMap::with_capacity(capacity);
            for &key in &keys {
                map.insert(key, key);
            }

            assert_eq!(map.remove(victim), Some(victim));
            assert_eq!(map.get(victim), None);
            for &key in keys.iter().filter(|&&key| key != victim) {
                assert_eq!(map.get(key), Some(&key));
            }
        }
    }

    #[test]
    fn grows_when_load_factor_is_reached() {
        let mut map = ChainedMap::new();
        for key in 0..6 {
            map.insert(key, key);
        }
        // 6 entries over 8 buckets; the default load factor 0.75 is
        // reached, so the next insertion grows the table first.
        assert_eq!(map.capacity(), 8);

        map.insert(6, 6);
        assert_eq!(map.capacity(), 16);
        for key in 0..7 {
            assert_eq!(map.get(key), Some(&key));
        }
    }

    #[test]
    fn shrinks_at_one_eighth_occupancy() {
        let mut map = ChainedMap::with_capacity(32);
        for key in 0..5 {
            map.insert(key, key);
        }
        assert_eq!(map.capacity(), 32);

        // Dropping to 4 entries hits the 32 / 8 threshold.
        map.remove(4);
        assert_eq!(map.capacity(), 16);
        assert_eq!(map.len(), 4);
        for key in 0..4 {
            assert_eq!(map.get(key), Some(&key));
        }
    }

    #[test]
    fn removing_last_entry_does_not_shrink() {
        let mut map = ChainedMap::with_capacity(32);
        map.insert(1, "person");

        map.remove(1);
        assert_eq!(map.capacity(), 32);
        assert!(map.is_empty());
    }

    #[test]
    fn zero_capacity_is_coerced_to_one() {
        let mut map = ChainedMap::with_capacity(0);
        assert_eq!(map.capacity(), 1);

        map.insert(1, "person");
        map.insert(2, "car");
        assert_eq!(map.get(1), Some(&"person"));
        assert_eq!(map.get(2), Some(&"car"));
    }

    #[test]
    fn single_bucket_holds_a_whole_chain() {
        // Load factor 1.0 with one bucket: every entry chains in place
        // until growth is due.
        let mut map: ChainedMap<i64> = ChainedMap::builder()
            .initial_capacity(1)
            .load_factor(1.0)
            .build()
            .unwrap();
        map.insert(1, 1);
        assert_eq!(map.capacity(), 1);

        map.insert(2, 2);
        assert_eq!(map.capacity(), 2);
        assert_eq!(map.get(1), Some(&1));
        assert_eq!(map.get(2), Some(&2));
    }

    #[test]
    fn churn_matches_std_hashmap() {
        let mut map = ChainedMap::new();
        let mut oracle = HashMap::new();

        // Deterministic multiplicative sequence; the odd multiplier keeps
        // it from collapsing to zero. A small key space forces overwrites,
        // collisions, and both resize directions.
        let mut x: i64 = 0x9E37_79B9_7F4A_7C15_u64 as i64;
        for step in 0..10_000i64 {
            x = x.wrapping_mul(0x2545_F491_4F6C_DD1D);
            let key = x % 64;
            if step % 3 == 2 {
                assert_eq!(map.remove(key), oracle.remove(&key));
            } else {
                assert_eq!(map.insert(key, step), oracle.insert(key, step));
            }
            assert_eq!(map.len(), oracle.len());
        }

        for key in -64..=64 {
            assert_eq!(map.get(key), oracle.get(&key));
        }
    }
}
