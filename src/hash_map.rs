//! A key-value map over the raw Robin Hood [`HashTable`].
//!
//! [`HashMap<K, V, S>`] stores `(K, V)` pairs in the table and hashes keys
//! with a configurable [`BuildHasher`]. Its contract differs from the
//! standard library map in one deliberate way: [`insert`](HashMap::insert) is
//! idempotent — the first value stored for a key wins, and later inserts of
//! the same key are no-ops. Overwriting goes through [`entry`](HashMap::entry)
//! or [`get_mut`](HashMap::get_mut) instead.

use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;

/// Error returned by [`HashMap::at`] when the key is absent.
///
/// This is the only error the map ever reports: every other operation signals
/// absence with `None` or by doing nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotFound;

impl core::fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("key not found")
    }
}

impl core::error::Error for KeyNotFound {}

/// A hash map implemented on Robin Hood open addressing.
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement
/// `Hash + Eq` and uses a hasher builder `S` to hash keys. Storage is the
/// [`HashTable`] slot array: linear probing with Robin Hood displacement on
/// insert, tombstones on removal, capacity doubling at a load factor of one
/// half (counting tombstones).
///
/// Key properties:
///
/// - [`insert`](HashMap::insert) never overwrites: the first value stored
///   for a key is kept until the key is removed.
/// - Removal tombstones the slot; capacity is only reclaimed by
///   [`clear`](HashMap::clear), which resets the map to its initial capacity.
/// - Iteration order is slot-array order: arbitrary, and it may change after
///   any growth or clear. Every live key is yielded exactly once.
/// - Keys are never reachable mutably; only values are, through
///   [`get_mut`](HashMap::get_mut), [`entry`](HashMap::entry), and
///   [`iter_mut`](HashMap::iter_mut).
///
/// # Examples
///
/// ```rust
/// use robin_hash::HashMap;
///
/// let mut map = HashMap::new();
/// map.insert("a", 1);
/// map.insert("a", 2); // no-op, "a" keeps 1
///
/// assert_eq!(map.get(&"a"), Some(&1));
/// *map.entry("a").or_default() = 2; // overwrite goes through entry
/// assert_eq!(map.get(&"a"), Some(&2));
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = crate::DefaultHashBuilder> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

#[cfg(feature = "foldhash")]
impl<K, V> HashMap<K, V>
where
    K: Hash + Eq,
{
    /// Creates an empty map using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashMap;
    ///
    /// let map: HashMap<i32, &str> = HashMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(crate::DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty map with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use robin_hash::HashMap;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let map: HashMap<i32, String, _> = HashMap::with_hasher(SimpleHasher);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
        }
    }

    /// Returns the number of key-value pairs in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no pairs.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the current slot count of the backing table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all pairs and resets the map to its initial capacity,
    /// keeping the hasher builder.
    ///
    /// Any capacity gained by prior growth is dropped: after `clear` the map
    /// behaves exactly like a freshly constructed one, hitting the same
    /// growth thresholds at the same element counts.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Inserts a key-value pair and returns a mutable reference to the value
    /// now stored for the key.
    ///
    /// If the key is already present, the supplied pair is dropped and the
    /// existing value is kept: insertion is idempotent, the first value wins.
    ///
    /// The returned reference is only valid until the next structural change
    /// (the borrow checker enforces this).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(*map.insert(37, "a"), "a");
    /// assert_eq!(*map.insert(37, "b"), "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> &mut V {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(entry) => &mut entry.into_mut().1,
            TableEntry::Vacant(entry) => &mut entry.insert((key, value)).1,
        }
    }

    /// Returns a reference to the value corresponding to the key, or `None`
    /// if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.find(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value corresponding to the key, or
    /// `None` if the key is absent.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.find_mut(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Bounds-checked access: returns a reference to the value for the key,
    /// or [`KeyNotFound`] if the key is absent.
    ///
    /// There is no mutable counterpart; values can never be modified through
    /// `at`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashMap;
    /// use robin_hash::KeyNotFound;
    ///
    /// let map = HashMap::from([(2, 3), (-7, -13), (0, 8)]);
    /// assert_eq!(map.at(&-7), Ok(&-13));
    /// assert_eq!(map.at(&8), Err(KeyNotFound));
    /// ```
    pub fn at(&self, key: &K) -> Result<&V, KeyNotFound> {
        self.get(key).ok_or(KeyNotFound)
    }

    /// Returns `true` if the map contains a value for the key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// The freed slot becomes a tombstone: it keeps later entries on the same
    /// probe chain reachable and keeps counting against the load factor until
    /// the next growth event or [`clear`](HashMap::clear) discards it.
    /// Removing an absent key is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Gets the given key's entry in the map for in-place manipulation.
    ///
    /// `map.entry(key).or_default()` is the find-or-insert-default idiom: it
    /// returns a mutable reference to the value for `key`, inserting
    /// `V::default()` first if the key was absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashMap;
    ///
    /// let mut map: HashMap<i32, i32> = HashMap::new();
    /// *map.entry(3).or_default() = 4;
    /// *map.entry(3).or_default() = 7;
    ///
    /// assert_eq!(map.get(&3), Some(&7));
    /// assert_eq!(map.entry(0).or_default(), &0);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry }),
            TableEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        }
    }

    /// Returns an iterator over the key-value pairs of the map, as
    /// `(&K, &V)`, in an arbitrary order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the pairs of the map with mutable access to
    /// the values, as `(&K, &mut V)`.
    ///
    /// Keys stay immutable through this iterator; mutating a key would
    /// silently break the probe chains.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values of the map.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }
}

#[cfg(feature = "foldhash")]
impl<K, V> Default for HashMap<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Replays [`insert`](HashMap::insert) for each pair in sequence order;
    /// for duplicate keys the first occurrence wins.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

#[cfg(feature = "foldhash")]
impl<K, V, const N: usize> From<[(K, V); N]> for HashMap<K, V>
where
    K: Hash + Eq,
{
    /// Builds a map from a literal list of pairs, replaying
    /// [`insert`](HashMap::insert) in list order (first occurrence of a key
    /// wins).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashMap;
    ///
    /// let map = HashMap::from([(1, 5), (3, 4), (2, 1)]);
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.get(&3), Some(&4));
    /// ```
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference to the value.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V> {
    entry: crate::hash_table::VacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V> {
    entry: crate::hash_table::OccupiedEntry<'a, (K, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Removes the entry from the map and returns the value, leaving a
    /// tombstone in the backing table.
    pub fn remove(self) -> V {
        self.entry.remove().1
    }
}

/// An iterator over the key-value pairs of a [`HashMap`].
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}

/// An iterator over the pairs of a [`HashMap`] with mutable value access.
///
/// Keys are only reachable by shared reference; the value side is mutable.
pub struct IterMut<'a, K, V> {
    inner: crate::hash_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }
}

/// An iterator over the keys of a [`HashMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a [`HashMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// An iterator over mutable references to the values of a [`HashMap`].
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// An owning iterator over the key-value pairs of a [`HashMap`].
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
