use super::{MapBuilder, Slot};
use crate::common::{self, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, SHRINK_DIVISOR};

use std::{fmt, mem};

/// A hash map for `i64` keys that keeps every entry directly in one flat
/// slot array, resolving collisions by scanning forward to the next free
/// slot (linear probing).
///
/// Compared to [`ChainedMap`][chained-map], entries need no per-node
/// allocation and lookups touch contiguous memory. The price is probe
/// clusters under high load and a repair pass after each removal.
///
/// [chained-map]: ../chained/struct.ChainedMap.html
///
/// # Examples
///
/// ```rust
/// use longmap::probed::ProbedMap;
///
/// let mut map = ProbedMap::new();
/// map.insert(1, "person");
/// map.insert(2, "car");
///
/// assert_eq!(map.get(1), Some(&"person"));
/// assert_eq!(map.get(3), None);
///
/// // Re-inserting a key overwrites in place.
/// map.insert(1, "animal");
/// assert_eq!(map.get(1), Some(&"animal"));
/// assert_eq!(map.len(), 2);
///
/// map.remove(1);
/// assert_eq!(map.get(1), None);
/// assert_eq!(map.len(), 1);
/// ```
///
/// # Resizing
///
/// The slot array doubles when an insertion finds the table filled to its
/// load factor, and halves when a removal leaves at most one eighth of the
/// slots occupied. Both are synchronous full rehashes, so the triggering
/// call occasionally costs O(capacity).
pub struct ProbedMap<V> {
    slots: Box<[Option<Slot<V>>]>,
    len: usize,
    load_factor: f64,
}

//
// public
//
impl<V> ProbedMap<V> {
    /// Constructs an empty map with the default capacity (8 slots) and the
    /// default load factor (0.75).
    pub fn new() -> Self {
        Self::with_slots(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// Constructs an empty map with the given capacity and the default
    /// load factor. A `capacity` of zero is coerced to one slot.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_slots(capacity.max(1), DEFAULT_LOAD_FACTOR)
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

    /// Returns the current number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the fill ratio at which the slot array grows.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get(&self, key: i64) -> Option<&V> {
        let index = self.find(key)?;
        self.slots[index].as_ref().map(|slot| &slot.value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        let index = self.find(key)?;
        self.slots[index].as_mut().map(|slot| &mut slot.value)
    }

    /// Returns `true` if the map holds an entry for `key`.
    pub fn contains_key(&self, key: i64) -> bool {
        self.find(key).is_some()
    }

    /// Returns `true` if some key maps to a value equal to `value`.
    ///
    /// This scans every slot and is therefore more expensive than
    /// [`contains_key`][Self::contains_key]. Matching uses `PartialEq` on
    /// the stored values; [`ChainedMap`][chained-map] follows the same
    /// contract.
    ///
    /// [chained-map]: ../chained/struct.ChainedMap.html#method.contains_value
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.slots.iter().flatten().any(|slot| slot.value == *value)
    }

    /// Inserts a key-value pair, returning the value previously stored
    /// under `key` if there was one.
    ///
    /// When the table is already filled to its load factor, the capacity
    /// is doubled before the entry is placed, so the load-factor bound
    /// holds again by the time the call returns.
    pub fn insert(&mut self, key: i64, value: V) -> Option<V> {
        if self.at_load_limit() {
            self.resize(self.slots.len() * 2);
        }

        let capacity = self.slots.len();
        let mut index = self.home_index(key);
        while let Some(slot) = &mut self.slots[index] {
            if slot.key == key {
                return Some(mem::replace(&mut slot.value, value));
            }
            index = (index + 1) % capacity;
        }
        self.slots[index] = Some(Slot { key, value });
        self.len += 1;
        None
    }

    /// Removes the entry stored under `key`, returning its value. Absent
    /// keys are a no-op returning `None`.
    ///
    /// Emptying a slot in the middle of a probe cluster would strand every
    /// entry whose probe path ran through it, so unless the removal
    /// triggers a shrink, the remainder of the cluster is rehashed in
    /// place.
    pub fn remove(&mut self, key: i64) -> Option<V> {
        let index = self.find(key)?;
        let slot = self.slots[index].take()?;
        self.len -= 1;

        if self.len != 0 && self.len <= self.slots.len() / SHRINK_DIVISOR {
            self.resize(self.slots.len() / 2);
        } else {
            self.repair_cluster(index);
        }
        Some(slot.value)
    }
}

//
// private
//
impl<V> ProbedMap<V> {
    pub(crate) fn with_slots(capacity: usize, load_factor: f64) -> Self {
        Self {
            slots: Self::alloc_slots(capacity),
            len: 0,
            load_factor,
        }
    }

    fn alloc_slots(capacity: usize) -> Box<[Option<Slot<V>>]> {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        slots.into_boxed_slice()
    }

    #[inline]
    fn home_index(&self, key: i64) -> usize {
        common::index_for(key, self.slots.len())
    }

    #[inline]
    fn at_load_limit(&self) -> bool {
        self.len as f64 >= self.slots.len() as f64 * self.load_factor
    }

    /// Returns the index of the slot holding `key`, probing forward from
    /// its home index. The scan is capped at one full pass: with a load
    /// factor of exactly one the table can be completely full, leaving no
    /// empty slot to stop at.
    fn find(&self, key: i64) -> Option<usize> {
        let capacity = self.slots.len();
        let mut index = self.home_index(key);
        for _ in 0..capacity {
            match &self.slots[index] {
                Some(slot) if slot.key == key => return Some(index),
                Some(_) => index = (index + 1) % capacity,
                None => return None,
            }
        }
        None
    }

    /// Places `slot` into the first empty position along its probe
    /// sequence. The caller must guarantee that an empty slot exists and
    /// that the key is not already present.
    fn fill_first_empty(&mut self, slot: Slot<V>) {
        let capacity = self.slots.len();
        let mut index = self.home_index(slot.key);
        while self.slots[index].is_some() {
            index = (index + 1) % capacity;
        }
        self.slots[index] = Some(slot);
    }

    /// Rebuilds the slot array at `new_capacity`, reinserting every entry
    /// under its new home index.
    fn resize(&mut self, new_capacity: usize) {
        #[cfg(feature = "logging")]
        log::trace!(
            "probed table resize: {} -> {} slots ({} entries)",
            self.slots.len(),
            new_capacity,
            self.len
        );

        let old = mem::replace(&mut self.slots, Self::alloc_slots(new_capacity));
        for slot in old.into_vec().into_iter().flatten() {
            self.fill_first_empty(slot);
        }
    }

    /// Walks the contiguous occupied run that follows a freed slot and
    /// reinserts each entry. Linear probing depends on an unbroken run
    /// between an entry's home index and its slot, and reinsertion
    /// recomputes each probe position rather than shifting entries back.
    ///
    /// The walk is capped at one full pass. The run present at removal
    /// time is never longer than the table, but with a load factor of one
    /// a reinsertion can refill a slot just behind the walk and keep the
    /// run ahead of it occupied.
    fn repair_cluster(&mut self, freed: usize) {
        let capacity = self.slots.len();
        let mut index = (freed + 1) % capacity;
        for _ in 0..capacity {
            match self.slots[index].take() {
                Some(slot) => self.fill_first_empty(slot),
                None => break,
            }
            index = (index + 1) % capacity;
        }
    }
}

impl<V> Default for ProbedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for ProbedMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbedMap")
            .field("len", &self.len)
            .field("capacity", &self.slots.len())
            .field("load_factor", &self.load_factor)
            .finish_non_exhaustive()
    }
}
