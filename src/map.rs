use core::borrow::Borrow;
use core::fmt::{self, Debug};
use core::iter::FromIterator;
use core::ops::{Index, RangeBounds};

use crate::entry::Entry;
use crate::map_types::{
    IntoIter, IntoKeys, IntoValues, Iter, IterMut, Keys, Range, RangeMut, Values, ValuesMut,
};
use crate::tier::{TierError, TierVec};

/// Ordered map.
/// A wrapper interface for the three-region engine (sorted storage, sorted
/// insertion buffer, sorted tombstone list).
/// API examples and descriptions are all adapted or directly copied from the
/// standard library's
/// [`BTreeMap`](https://doc.rust-lang.org/std/collections/struct.BTreeMap.html).
pub struct TierMap<K: Ord, V> {
    vec: TierVec<K, V>,
}

impl<K: Ord, V> TierMap<K, V> {
    /// Makes a new, empty `TierMap`. Allocates nothing until the first
    /// insert.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    ///
    /// map.insert(1, "a");
    /// ```
    pub fn new() -> Self {
        TierMap { vec: TierVec::new() }
    }

    /// Makes a new, empty `TierMap` whose storage holds at least `capacity`
    /// entries before the next growth pass; the insertion buffer and
    /// tombstone list are sized to roughly the square root of that.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let map: TierMap<usize, &str> = TierMap::with_capacity(1024);
    /// assert!(map.capacity() >= 1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        TierMap {
            vec: TierVec::with_capacity(capacity),
        }
    }

    /// Storage capacity, e.g. how many entries fit before the next growth
    /// pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// assert_eq!(map.capacity(), 0);
    ///
    /// map.insert(1, "a");
    /// assert!(map.capacity() > 0);
    /// ```
    pub fn capacity(&self) -> usize {
        self.vec.capacity()
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut a = TierMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut a = TierMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form *must* match the ordering on the key
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.vec.get(key)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.vec.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.vec.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.contains_key(&1), true);
    /// assert_eq!(map.contains_key(&2), false);
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.vec.contains_key(key)
    }

    /// Insert a key-value pair into the map.
    /// If the map did not have this key present, `None` is returned.
    /// If the map did have this key present, the value is updated, the old
    /// value is returned, and the key is updated. This accommodates types
    /// that can be `==` without being identical.
    ///
    /// Keys inserted in strictly increasing order take an `O(1)` append path
    /// and never touch the insertion buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.vec.insert(key, value)
    }

    /// Insert a key-value pair into the map, reporting allocation failure
    /// instead of panicking.
    ///
    /// On `Err` the map is unchanged: every block a growth pass needs is
    /// acquired before any element moves.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// assert_eq!(map.try_insert(37, "a"), Ok(None));
    /// assert_eq!(map.try_insert(37, "b"), Ok(Some("a")));
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, TierError> {
        self.vec.try_insert(key, value)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// Removal away from the storage tail is deferred: the entry's value is
    /// moved out immediately, but the slot is only tombstoned, and the gap
    /// closes in bulk when the tombstone list fills.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.vec.remove(key)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// Unlike [`remove`](Self::remove), this cannot defer the removal (the
    /// key must be returned by move), so a hit away from the storage tail
    /// closes the gap eagerly, linear in the number of displaced entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.vec.remove_entry(key)
    }

    /// Gets the given key's corresponding entry in the map for in-place
    /// manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut count: TierMap<&str, usize> = TierMap::new();
    ///
    /// for s in ["a", "b", "a", "c", "a", "b"] {
    ///     *count.entry(s).or_insert(0) += 1;
    /// }
    ///
    /// assert_eq!(count["a"], 3);
    /// assert_eq!(count["b"], 2);
    /// assert_eq!(count["c"], 1);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        Entry::new(&mut self.vec, key)
    }

    /// Returns a reference to the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.vec.first_key_value()
    }

    /// Returns a reference to the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.vec.last_key_value()
    }

    /// Removes and returns the first element in the map.
    /// The key of this element is the minimum key that was in the map.
    ///
    /// # Examples
    ///
    /// Draining elements in ascending order, while keeping a usable map each
    /// iteration.
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_first() {
    ///     assert!(map.iter().all(|(k, _v)| *k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.vec.pop_first()
    }

    /// Removes and returns the last element in the map.
    /// The key of this element is the maximum key that was in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_last() {
    ///     assert!(map.iter().all(|(k, _v)| *k < key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.vec.pop_last()
    }

    /// Clears the map, removing all elements. Keeps the allocated capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut a = TierMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.vec.clear()
    }

    /// Grows storage to hold at least `capacity` entries; no-op if it
    /// already does. Growth flattens: afterwards every entry lives in sorted
    /// storage, and the buffer and tombstone list are empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert(1, "a");
    /// map.reserve(100);
    /// assert!(map.capacity() >= 100);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn reserve(&mut self, capacity: usize) {
        self.vec.reserve(capacity)
    }

    /// Fallible [`reserve`](Self::reserve): allocation failure is reported
    /// with the map unchanged.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), TierError> {
        self.vec.try_reserve(capacity)
    }

    /// Flattens the map: merges the insertion buffer into storage and
    /// compacts tombstones out, so every entry lives in one sorted array.
    /// Observable contents never change, and the operation is idempotent.
    ///
    /// Maintenance normally runs by itself when a side region fills; this
    /// hook exists for benchmark-controlled compaction and tests.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<i32, i32> = (0..64).rev().map(|x| (x, x)).collect();
    /// let before: Vec<_> = map.iter().map(|(k, _)| *k).collect();
    ///
    /// map.compact();
    ///
    /// let after: Vec<_> = map.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(before, after);
    /// ```
    pub fn compact(&mut self) {
        self.vec.compact()
    }

    /// How many times the insertion buffer has been bulk-merged into storage
    /// (for testing and/or performance engineering).
    pub fn merge_cnt(&self) -> usize {
        self.vec.merge_cnt()
    }

    /// How many times the tombstone list has been compacted out of storage
    /// (for testing and/or performance engineering).
    pub fn compact_cnt(&self) -> usize {
        self.vec.compact_cnt()
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all pairs `(k, v)` such that `f(&k, &mut v)`
    /// returns `false`. Each element is visited exactly once, in unspecified
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// // Keep only the elements with even-numbered keys.
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.vec.retain(f)
    }

    /// Moves all elements from `other` into `self`, leaving `other` empty.
    /// If a key from `other` is already present in `self`, the respective
    /// value from `other` wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut a = TierMap::new();
    /// a.insert(1, "a");
    /// a.insert(2, "b");
    /// a.insert(3, "c");
    ///
    /// let mut b = TierMap::new();
    /// b.insert(3, "d");
    /// b.insert(4, "e");
    /// b.insert(5, "f");
    ///
    /// a.append(&mut b);
    ///
    /// assert_eq!(a.len(), 5);
    /// assert_eq!(b.len(), 0);
    ///
    /// assert_eq!(a[&1], "a");
    /// assert_eq!(a[&2], "b");
    /// assert_eq!(a[&3], "d");
    /// assert_eq!(a[&4], "e");
    /// assert_eq!(a[&5], "f");
    /// ```
    pub fn append(&mut self, other: &mut TierMap<K, V>) {
        self.vec.append(&mut other.vec);
    }

    /// Splits the collection into two at the given key. Returns everything
    /// after the given key, including the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut a = TierMap::new();
    /// a.insert(1, "a");
    /// a.insert(2, "b");
    /// a.insert(3, "c");
    /// a.insert(17, "d");
    /// a.insert(41, "e");
    ///
    /// let b = a.split_off(&3);
    ///
    /// assert_eq!(a.len(), 2);
    /// assert_eq!(b.len(), 3);
    ///
    /// assert_eq!(a[&1], "a");
    /// assert_eq!(a[&2], "b");
    ///
    /// assert_eq!(b[&3], "c");
    /// assert_eq!(b[&17], "d");
    /// assert_eq!(b[&41], "e");
    /// ```
    pub fn split_off<Q>(&mut self, key: &Q) -> TierMap<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        TierMap {
            vec: self.vec.split_off(key),
        }
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    ///
    /// // Add 10 to the value if the key isn't "a"
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    ///
    /// let (second_key, second_value) = map.iter().skip(1).next().unwrap();
    /// assert_eq!((*second_key, *second_value), ("b", 12));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self)
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut a = TierMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<_> = a.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut a = TierMap::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut a = TierMap::new();
    /// a.insert(1, String::from("hello"));
    /// a.insert(2, String::from("goodbye"));
    ///
    /// for value in a.values_mut() {
    ///     value.push_str("!");
    /// }
    ///
    /// let values: Vec<String> = a.values().cloned().collect();
    /// assert_eq!(values, [String::from("hello!"), String::from("goodbye!")]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut a = TierMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<i32> = a.into_keys().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut a = TierMap::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.into_values().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }

    /// Constructs a double-ended iterator over a sub-range of elements in
    /// the map.
    ///
    /// The simplest way is to use the range syntax `min..max`, thus
    /// `range(min..max)` will yield elements from min (inclusive) to max
    /// (exclusive). The range may also be entered as
    /// `(Bound<T>, Bound<T>)`.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`. Panics if range `start == end` and
    /// both bounds are `Excluded`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::Included;
    /// use tiervec::TierMap;
    ///
    /// let mut map = TierMap::new();
    /// map.insert(3, "a");
    /// map.insert(5, "b");
    /// map.insert(8, "c");
    ///
    /// for (&key, &value) in map.range((Included(&4), Included(&8))) {
    ///     println!("{key}: {value}");
    /// }
    /// assert_eq!(Some((&5, &"b")), map.range(4..).next());
    /// ```
    pub fn range<T, R>(&self, range: R) -> Range<'_, K, V>
    where
        T: Ord + ?Sized,
        K: Borrow<T>,
        R: RangeBounds<T>,
    {
        Range::new(self, range)
    }

    /// Constructs a mutable double-ended iterator over a sub-range of
    /// elements in the map.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`. Panics if range `start == end` and
    /// both bounds are `Excluded`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<&str, i32> =
    ///     [("Alice", 0), ("Bob", 0), ("Carol", 0), ("Cheryl", 0)].into();
    ///
    /// for (_, balance) in map.range_mut("B".."Cheryl") {
    ///     *balance += 100;
    /// }
    ///
    /// for (name, balance) in &map {
    ///     println!("{name} => {balance}");
    /// }
    /// assert_eq!(map["Alice"], 0);
    /// assert_eq!(map["Bob"], 100);
    /// assert_eq!(map["Carol"], 100);
    /// assert_eq!(map["Cheryl"], 0);
    /// ```
    pub fn range_mut<T, R>(&mut self, range: R) -> RangeMut<'_, K, V>
    where
        T: Ord + ?Sized,
        K: Borrow<T>,
        R: RangeBounds<T>,
    {
        RangeMut::new(self, range)
    }

    pub(crate) fn tier(&self) -> &TierVec<K, V> {
        &self.vec
    }

    pub(crate) fn tier_mut(&mut self) -> &mut TierVec<K, V> {
        &mut self.vec
    }

    pub(crate) fn into_tier(self) -> TierVec<K, V> {
        self.vec
    }
}

// Convenience Traits --------------------------------------------------------------------------------------------------

// Default constructor.
impl<K: Ord, V> Default for TierMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Debug
impl<K: Ord + Debug, V: Debug> Debug for TierMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Clone
impl<K: Ord + Clone, V: Clone> Clone for TierMap<K, V> {
    fn clone(&self) -> Self {
        TierMap {
            vec: self.vec.clone(),
        }
    }
}

// Equality is observational: same logical sequence, whatever the regions
// look like internally.
impl<K: Ord, V: PartialEq> PartialEq for TierMap<K, V> {
    fn eq(&self, other: &TierMap<K, V>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V: Eq> Eq for TierMap<K, V> {}

// Construct from array.
impl<K: Ord, V, const N: usize> From<[(K, V); N]> for TierMap<K, V> {
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let map1 = TierMap::from([(1, 2), (3, 4)]);
    /// let map2: TierMap<_, _> = [(1, 2), (3, 4)].into();
    /// assert_eq!(map1, map2);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

// Indexing
impl<K: Ord, V, Q> Index<&Q> for TierMap<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("No value found for key")
    }
}

// Construct from iterator.
impl<K: Ord, V> FromIterator<(K, V)> for TierMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TierMap::new();
        map.extend(iter);
        map
    }
}

// Extension from iterator.
impl<K: Ord, V> Extend<(K, V)> for TierMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

// Extension from reference iterator.
impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for TierMap<K, V> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

// Iterators -----------------------------------------------------------------------------------------------------------

// Reference iterator
impl<'a, K: Ord, V> IntoIterator for &'a TierMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Mutable reference iterator
impl<'a, K: Ord, V> IntoIterator for &'a mut TierMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// Consuming iterator
impl<K: Ord, V> IntoIterator for TierMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
