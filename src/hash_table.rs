//! The raw Robin Hood hash table.
//!
//! [`HashTable<V>`] stores values of type `V` in a single open-addressed slot
//! array and resolves collisions with linear probing plus Robin Hood
//! displacement. It does not hash anything itself: every operation takes a
//! precomputed `u64` hash and an equality predicate, which is what lets the
//! [`HashMap`](crate::HashMap) wrapper layer arbitrary hasher builders on
//! top of it.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::mem;

/// Number of slots in a freshly constructed table. Capacity only ever grows
/// from here (by doubling), so it stays a power of two and the ideal slot for
/// a hash can be computed with a mask instead of a modulo.
const DEFAULT_CAPACITY: usize = 16;

/// A single slot in the open-addressed array.
///
/// The state is an explicit tag rather than a sentinel value so that an empty
/// slot can never be confused with a zero-valued resident. `Occupied` caches
/// the full 64-bit hash so growth can re-place every entry without touching
/// the stored values, and `dist` records how many probe steps the entry sits
/// from its ideal slot (its probe sequence length). A lower `dist` is
/// "richer" in Robin Hood terms.
#[derive(Clone)]
enum Slot<V> {
    Empty,
    Occupied { hash: u64, dist: usize, value: V },
    Tombstone,
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    core::iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

/// An open-addressed hash table using Robin Hood displacement.
///
/// `HashTable<V>` provides insertion (through the [`entry`] API), lookup,
/// and removal keyed by a caller-supplied `u64` hash and equality predicate.
/// The table only ever grows: removal leaves a tombstone behind so that probe
/// chains stay intact, and tombstones are discarded the next time the table
/// doubles its capacity (or on [`clear`], which resets the table to its
/// default capacity).
///
/// Growth triggers when occupied-plus-tombstone slots exceed half the
/// capacity, so at least half of the array is always truly empty and every
/// probe chain is guaranteed to terminate.
///
/// [`entry`]: HashTable::entry
/// [`clear`]: HashTable::clear
///
/// # Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use robin_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # fn hash_key(key: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     key.hash(&mut hasher);
/// #     hasher.finish()
/// # }
/// #
/// let mut table: HashTable<(u64, &str)> = HashTable::new();
///
/// let hash = hash_key(7);
/// table.entry(hash, |&(k, _)| k == 7).or_insert((7, "seven"));
///
/// assert_eq!(table.find(hash, |&(k, _)| k == 7), Some(&(7, "seven")));
/// assert_eq!(table.len(), 1);
/// ```
pub struct HashTable<V> {
    slots: Vec<Slot<V>>,
    /// Occupied plus tombstone slots. This is what the growth threshold is
    /// measured against: tombstones keep consuming capacity until a growth
    /// event drops them.
    live: usize,
    /// Tombstone slots only.
    dead: usize,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("tombstones", &self.dead)
            .finish_non_exhaustive()
    }
}

impl<V: Clone> Clone for HashTable<V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            live: self.live,
            dead: self.dead,
        }
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with the default capacity of 16 slots.
    pub fn new() -> Self {
        Self {
            slots: empty_slots(DEFAULT_CAPACITY),
            live: 0,
            dead: 0,
        }
    }

    /// Returns the number of values in the table.
    ///
    /// Tombstones left behind by [`remove`](HashTable::remove) are not
    /// counted here, even though they still consume capacity.
    pub fn len(&self) -> usize {
        self.live - self.dead
    }

    /// Returns `true` if the table contains no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Removes all values and resets the table to its default capacity.
    ///
    /// Unlike the standard library collections, this drops any capacity
    /// gained by prior growth: the result is indistinguishable from a freshly
    /// constructed table.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns a reference to the value matching `eq` on the probe chain of
    /// `hash`, or `None` if there is no such value.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use robin_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_key(key: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     key.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table: HashTable<u64> = HashTable::new();
    /// table.entry(hash_key(3), |&v| v == 3).or_insert(3);
    ///
    /// assert_eq!(table.find(hash_key(3), |&v| v == 3), Some(&3));
    /// assert_eq!(table.find(hash_key(9), |&v| v == 9), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let index = self.find_index(hash, eq)?;
        match &self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value matching `eq` on the probe
    /// chain of `hash`, or `None` if there is no such value.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let index = self.find_index(hash, eq)?;
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Removes the value matching `eq` on the probe chain of `hash` and
    /// returns it, or returns `None` if there is no such value.
    ///
    /// The vacated slot becomes a tombstone rather than an empty slot, so
    /// lookups for values placed further along the same probe chain keep
    /// working. Tombstones are never reused by insertion; they are discarded
    /// wholesale by the next growth event or [`clear`](HashTable::clear).
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let index = self.find_index(hash, eq)?;
        self.dead += 1;
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Looks up the value matching `eq` on the probe chain of `hash`,
    /// returning an [`Entry`] that is either occupied or vacant.
    ///
    /// This is the only insertion path: a vacant entry inserts with the Robin
    /// Hood placement routine, while an occupied entry gives access to the
    /// resident value without disturbing it.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use robin_hash::hash_table::Entry;
    /// # use robin_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_key(key: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     key.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table: HashTable<(u64, u64)> = HashTable::new();
    /// let hash = hash_key(1);
    ///
    /// match table.entry(hash, |&(k, _)| k == 1) {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert((1, 100));
    ///     }
    ///     Entry::Occupied(_) => unreachable!(),
    /// }
    ///
    /// match table.entry(hash, |&(k, _)| k == 1) {
    ///     Entry::Occupied(entry) => assert_eq!(entry.get(), &(1, 100)),
    ///     Entry::Vacant(_) => unreachable!(),
    /// }
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        match self.find_index(hash, eq) {
            Some(index) => Entry::Occupied(OccupiedEntry { table: self, index }),
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    /// Returns an iterator over the values in the table, in slot-array order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Returns an iterator over mutable references to the values in the
    /// table, in slot-array order.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            slots: self.slots.iter_mut(),
        }
    }

    /// Index of the slot holding the value matching `eq` on the probe chain
    /// of `hash`.
    ///
    /// An empty slot is a hard stop: insertion always fills the first empty
    /// slot it reaches (or displaces an entry before that), so nothing
    /// matching can exist beyond one. Tombstones are neither a match nor a
    /// stop. The scan is bounded by one full wrap of the array.
    fn find_index(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<usize> {
        let mask = self.mask();
        let mut index = (hash as usize) & mask;

        for _ in 0..self.slots.len() {
            match &self.slots[index] {
                Slot::Occupied { value, .. } if eq(value) => return Some(index),
                Slot::Empty => return None,
                _ => {}
            }
            index = (index + 1) & mask;
        }

        None
    }

    /// Places a value whose key is known to be absent, using Robin Hood
    /// displacement, and returns the index where the originally carried value
    /// ended up.
    ///
    /// The routine walks the probe chain carrying `(hash, dist, value)`.
    /// Whenever the carried entry is poorer (has probed further) than the
    /// resident of the current slot, the two are swapped and the walk
    /// continues with the displaced resident. The first swap position is
    /// remembered as the caller-visible location of the inserted value. The
    /// walk always terminates: the growth check keeps at least half of the
    /// slots empty.
    ///
    /// Tombstones are stepped over like occupied slots. Reusing them here
    /// would break the chains of entries placed past them before the removal.
    fn place(&mut self, mut hash: u64, mut value: V) -> usize {
        let mask = self.mask();
        let mut index = (hash as usize) & mask;
        let mut dist = 0usize;
        let mut placed_at = None;

        loop {
            match &mut self.slots[index] {
                Slot::Empty => {
                    self.slots[index] = Slot::Occupied { hash, dist, value };
                    self.live += 1;
                    return placed_at.unwrap_or(index);
                }
                Slot::Occupied {
                    hash: resident_hash,
                    dist: resident_dist,
                    value: resident_value,
                } if *resident_dist < dist => {
                    mem::swap(resident_hash, &mut hash);
                    mem::swap(resident_dist, &mut dist);
                    mem::swap(resident_value, &mut value);
                    placed_at.get_or_insert(index);
                }
                _ => {}
            }

            index = (index + 1) & mask;
            dist += 1;
        }
    }

    /// Doubles the capacity once occupied-plus-tombstone slots exceed half of
    /// it. Every occupied entry is re-placed into the fresh array in slot
    /// order using its cached hash; tombstones are simply not carried over.
    fn grow_if_needed(&mut self) {
        if self.live * 2 <= self.slots.len() {
            return;
        }

        let new_len = self.slots.len() * 2;
        let old = mem::replace(&mut self.slots, empty_slots(new_len));
        self.live = 0;
        self.dead = 0;
        for slot in old {
            if let Slot::Occupied { hash, value, .. } = slot {
                self.place(hash, value);
            }
        }
    }

    fn mask(&self) -> usize {
        self.slots.len() - 1
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut HashTable<V> {
    type Item = &'a mut V;
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<V> IntoIterator for HashTable<V> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots.into_iter(),
        }
    }
}

/// A view into a single position of a [`HashTable`], which is either occupied
/// or vacant.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// The position holds a value matching the lookup.
    Occupied(OccupiedEntry<'a, V>),
    /// No matching value exists; one can be inserted here.
    Vacant(VacantEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the value produced by `default` if the entry is vacant and
    /// returns a mutable reference to the value in the entry.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }
}

impl<'a, V> Entry<'a, V>
where
    V: Default,
{
    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

/// A view into a vacant position of a [`HashTable`].
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value and returns a mutable reference to it.
    ///
    /// This runs the growth check first, so any previously issued iterators
    /// or references into the table must already have been dropped (the
    /// borrow checker enforces this).
    pub fn insert(self, value: V) -> &'a mut V {
        self.table.grow_if_needed();
        let index = self.table.place(self.hash, value);
        match &mut self.table.slots[index] {
            Slot::Occupied { value, .. } => value,
            // `place` always leaves the carried value in an occupied slot at
            // the index it returns.
            _ => unreachable!(),
        }
    }
}

/// A view into an occupied position of a [`HashTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Returns a reference to the resident value.
    pub fn get(&self) -> &V {
        match &self.table.slots[self.index] {
            Slot::Occupied { value, .. } => value,
            // The entry is only constructed for an occupied index, and holds
            // the table borrowed for its whole lifetime.
            _ => unreachable!(),
        }
    }

    /// Returns a mutable reference to the resident value.
    pub fn get_mut(&mut self) -> &mut V {
        match &mut self.table.slots[self.index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!(),
        }
    }

    /// Converts the entry into a mutable reference to the resident value,
    /// with the lifetime of the table borrow.
    pub fn into_mut(self) -> &'a mut V {
        match &mut self.table.slots[self.index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!(),
        }
    }

    /// Removes the resident value and returns it, leaving a tombstone.
    pub fn remove(self) -> V {
        self.table.dead += 1;
        match mem::replace(&mut self.table.slots[self.index], Slot::Tombstone) {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!(),
        }
    }
}

/// An iterator over the values of a [`HashTable`].
///
/// Created by [`iter`](HashTable::iter). Yields every resident value exactly
/// once, in slot-array order; empty slots and tombstones are skipped.
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        })
    }
}

/// An iterator over mutable references to the values of a [`HashTable`].
///
/// Created by [`iter_mut`](HashTable::iter_mut).
pub struct IterMut<'a, V> {
    slots: core::slice::IterMut<'a, Slot<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        })
    }
}

/// An owning iterator over the values of a [`HashTable`].
///
/// Created by the `IntoIterator` implementation for `HashTable`.
pub struct IntoIter<V> {
    slots: alloc::vec::IntoIter<Slot<V>>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use core::hash::Hasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    struct HashState {
        k0: u64,
        k1: u64,
    }

    impl HashState {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap(),
                k1: rng.try_next_u64().unwrap(),
            }
        }

        fn hash_key(&self, key: u64) -> u64 {
            let mut h = SipHasher::new_with_keys(self.k0, self.k1);
            h.write_u64(key);
            h.finish()
        }
    }

    #[derive(Debug, PartialEq, Eq, Clone)]
    struct Item {
        key: u64,
        value: i32,
    }

    fn insert_item(table: &mut HashTable<Item>, hash: u64, item: Item) {
        let key = item.key;
        match table.entry(hash, |v| v.key == key) {
            Entry::Vacant(entry) => {
                entry.insert(item);
            }
            Entry::Occupied(_) => panic!("unexpected occupied entry for key {key}"),
        }
    }

    /// Walks the slot array and checks the table invariants directly:
    /// `dist` matches the actual offset from the ideal slot, and the chain
    /// from the ideal slot up to the entry contains no empty slot.
    fn assert_invariants(table: &HashTable<Item>) {
        let capacity = table.capacity();
        let mask = capacity - 1;
        for (index, slot) in table.slots.iter().enumerate() {
            let &Slot::Occupied { hash, dist, .. } = slot else {
                continue;
            };
            let ideal = (hash as usize) & mask;
            assert_eq!(
                (index.wrapping_sub(ideal)) & mask,
                dist,
                "dist out of sync at slot {index}"
            );
            for step in 0..dist {
                let probe = (ideal + step) & mask;
                assert!(
                    !matches!(table.slots[probe], Slot::Empty),
                    "empty slot inside the probe chain ending at {index}"
                );
            }
        }
    }

    #[test]
    fn insert_and_find() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..32u64 {
            let hash = state.hash_key(k);
            insert_item(
                &mut table,
                hash,
                Item {
                    key: k,
                    value: (k as i32) * 2,
                },
            );
        }
        assert_eq!(table.len(), 32);
        assert_invariants(&table);

        for k in 0..32u64 {
            let hash = state.hash_key(k);
            assert_eq!(
                table.find(hash, |v| v.key == k),
                Some(&Item {
                    key: k,
                    value: (k as i32) * 2
                })
            );
        }

        let miss_hash = state.hash_key(999);
        assert!(table.find(miss_hash, |v| v.key == 999).is_none());
    }

    #[test]
    fn duplicate_entry_is_occupied() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        let k = 42u64;
        let hash = state.hash_key(k);

        insert_item(&mut table, hash, Item { key: k, value: 7 });

        match table.entry(hash, |v| v.key == k) {
            Entry::Occupied(entry) => {
                assert_eq!(entry.get().value, 7);
            }
            Entry::Vacant(_) => panic!("should be occupied"),
        }
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn find_mut_and_modify() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..5u64 {
            let hash = state.hash_key(k);
            insert_item(&mut table, hash, Item { key: k, value: 1 });
        }

        for k in 0..5u64 {
            let hash = state.hash_key(k);
            if let Some(v) = table.find_mut(hash, |v| v.key == k) {
                v.value += 9;
            }
        }
        for k in 0..5u64 {
            let hash = state.hash_key(k);
            let v = table.find(hash, |v| v.key == k).unwrap();
            assert_eq!(v.value, 10);
        }
    }

    #[test]
    fn remove_items() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..8u64 {
            let hash = state.hash_key(k);
            insert_item(
                &mut table,
                hash,
                Item {
                    key: k,
                    value: k as i32,
                },
            );
        }
        assert_eq!(table.len(), 8);

        for k in [0u64, 3, 7] {
            let hash = state.hash_key(k);
            let removed = table.remove(hash, |v| v.key == k).expect("should remove");
            assert_eq!(removed.key, k);
        }
        assert_eq!(table.len(), 5);

        // Removing an absent value is a no-op, on either a fresh chain or one
        // already ending in a tombstone.
        let hash = state.hash_key(1000);
        assert!(table.remove(hash, |v| v.key == 1000).is_none());
        let hash = state.hash_key(3);
        assert!(table.remove(hash, |v| v.key == 3).is_none());
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn tombstone_keeps_chain_alive() {
        // All entries collide on slot 0, forming one linear chain. Removing
        // an entry from the middle must not hide the entries placed after it.
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..6u64 {
            insert_item(
                &mut table,
                0,
                Item {
                    key: k,
                    value: k as i32,
                },
            );
        }

        assert!(table.remove(0, |v| v.key == 2).is_some());

        for k in [0u64, 1, 3, 4, 5] {
            assert!(
                table.find(0, |v| v.key == k).is_some(),
                "key {k} lost after tombstoning"
            );
        }
        assert!(table.find(0, |v| v.key == 2).is_none());
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn tombstones_count_toward_growth() {
        // Churning insert/remove on a single key must still trigger growth:
        // tombstones pile up on the load factor even though len stays at 1.
        let mut table: HashTable<Item> = HashTable::new();
        let initial_capacity = table.capacity();
        for k in 0..32u64 {
            insert_item(
                &mut table,
                k,
                Item {
                    key: k,
                    value: 0,
                },
            );
            if k > 0 {
                assert!(table.remove(k - 1, |v| v.key == k - 1).is_some());
            }
        }
        assert_eq!(table.len(), 1);
        assert!(table.capacity() > initial_capacity);
    }

    #[test]
    fn growth_discards_tombstones_and_rehashes() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..64u64 {
            let hash = state.hash_key(k);
            insert_item(
                &mut table,
                hash,
                Item {
                    key: k,
                    value: k as i32,
                },
            );
        }
        for k in 0..32u64 {
            let hash = state.hash_key(k);
            assert!(table.remove(hash, |v| v.key == k).is_some());
        }

        // Force enough growth to flush the tombstones out.
        for k in 100..300u64 {
            let hash = state.hash_key(k);
            insert_item(
                &mut table,
                hash,
                Item {
                    key: k,
                    value: k as i32,
                },
            );
        }

        assert_eq!(table.dead, 0);
        assert_eq!(table.len(), 232);
        assert_invariants(&table);
        for k in 32..64u64 {
            let hash = state.hash_key(k);
            assert!(table.find(hash, |v| v.key == k).is_some());
        }
        for k in 0..32u64 {
            let hash = state.hash_key(k);
            assert!(table.find(hash, |v| v.key == k).is_none());
        }
    }

    #[test]
    fn full_collision_chain() {
        // A constant hash degrades the table to pure linear probing; every
        // entry must still be independently reachable.
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..1000u64 {
            insert_item(
                &mut table,
                0,
                Item {
                    key: k,
                    value: k as i32,
                },
            );
        }
        assert_eq!(table.len(), 1000);
        assert_invariants(&table);
        for k in 0..1000u64 {
            let found = table.find(0, |v| v.key == k).unwrap();
            assert_eq!(found.value, k as i32);
        }
    }

    #[test]
    fn clear_resets_capacity() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        let initial_capacity = table.capacity();
        for k in 0..500u64 {
            let hash = state.hash_key(k);
            insert_item(
                &mut table,
                hash,
                Item {
                    key: k,
                    value: 0,
                },
            );
        }
        assert!(table.capacity() > initial_capacity);

        table.clear();
        assert_eq!(table.capacity(), initial_capacity);
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        let hash = state.hash_key(1);
        assert!(table.find(hash, |v| v.key == 1).is_none());
    }

    #[test]
    fn iter_visits_each_value_once() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..40u64 {
            let hash = state.hash_key(k);
            insert_item(
                &mut table,
                hash,
                Item {
                    key: k,
                    value: 0,
                },
            );
        }
        for k in (0..40u64).step_by(3) {
            let hash = state.hash_key(k);
            table.remove(hash, |v| v.key == k);
        }

        let mut seen: Vec<u64> = table.iter().map(|v| v.key).collect();
        seen.sort_unstable();
        let expected: Vec<u64> = (0..40).filter(|k| k % 3 != 0).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn iter_mut_and_into_iter() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..10u64 {
            let hash = state.hash_key(k);
            insert_item(
                &mut table,
                hash,
                Item {
                    key: k,
                    value: 1,
                },
            );
        }

        for item in table.iter_mut() {
            item.value *= -1;
        }

        let mut values: Vec<i32> = table.into_iter().map(|v| v.value).collect();
        values.sort_unstable();
        assert_eq!(values, [-1; 10]);
    }

    #[test]
    fn clone_is_independent() {
        let state = HashState::default();
        let mut first: HashTable<Item> = HashTable::new();
        for k in 0..16u64 {
            let hash = state.hash_key(k);
            insert_item(
                &mut first,
                hash,
                Item {
                    key: k,
                    value: k as i32,
                },
            );
        }

        let mut second = first.clone();
        let hash = state.hash_key(3);
        second.remove(hash, |v| v.key == 3);
        if let Some(v) = second.find_mut(state.hash_key(4), |v| v.key == 4) {
            v.value = -1;
        }

        assert!(first.find(hash, |v| v.key == 3).is_some());
        assert_eq!(first.find(state.hash_key(4), |v| v.key == 4).unwrap().value, 4);
        assert_eq!(first.len(), 16);
        assert_eq!(second.len(), 15);
    }
}
