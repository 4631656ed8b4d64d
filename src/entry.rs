use core::fmt::{self, Debug};

use crate::tier::{Slot, TierVec};

/// A view into a single entry in a map, which may either be vacant or
/// occupied.
///
/// This `enum` is constructed from the [`entry`][crate::TierMap::entry]
/// method on [`TierMap`][crate::TierMap].
pub enum Entry<'a, K: Ord, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K: Ord, V> Entry<'a, K, V> {
    pub(crate) fn new(vec: &'a mut TierVec<K, V>, key: K) -> Self {
        match vec.find_slot(&key) {
            Some(slot) => Entry::Occupied(OccupiedEntry { vec, slot }),
            None => Entry::Vacant(VacantEntry { vec, key }),
        }
    }

    /// Ensures a value is in the entry by inserting the default if empty, and
    /// returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<&str, usize> = TierMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// assert_eq!(map["poneyland"], 12);
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default
    /// function if empty, and returns a mutable reference to the value in the
    /// entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<&str, String> = TierMap::new();
    /// let s = "hoho".to_string();
    ///
    /// map.entry("poneyland").or_insert_with(|| s);
    ///
    /// assert_eq!(map["poneyland"], "hoho".to_string());
    /// ```
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting, if empty, the result of
    /// the default function. This method allows for generating key-derived
    /// values for insertion by providing the default function a reference to
    /// the key that was moved during the `.entry(key)` method call.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<&str, usize> = TierMap::new();
    ///
    /// map.entry("poneyland")
    ///     .or_insert_with_key(|key| key.chars().count());
    ///
    /// assert_eq!(map["poneyland"], 9);
    /// ```
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Returns a reference to this entry's key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<&str, usize> = TierMap::new();
    /// assert_eq!(map.entry("poneyland").key(), &"poneyland");
    /// ```
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<&str, usize> = TierMap::new();
    ///
    /// map.entry("poneyland").and_modify(|e| *e += 1).or_insert(42);
    /// assert_eq!(map["poneyland"], 42);
    ///
    /// map.entry("poneyland").and_modify(|e| *e += 1).or_insert(42);
    /// assert_eq!(map["poneyland"], 43);
    /// ```
    pub fn and_modify<F: FnOnce(&mut V)>(self, f: F) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }
}

impl<'a, K: Ord, V: Default> Entry<'a, K, V> {
    /// Ensures a value is in the entry by inserting the default value if
    /// empty, and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<&str, Option<usize>> = TierMap::new();
    /// map.entry("poneyland").or_default();
    ///
    /// assert_eq!(map["poneyland"], None);
    /// ```
    pub fn or_default(self) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(V::default()),
        }
    }
}

impl<K: Ord + Debug, V: Debug> Debug for Entry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Vacant(entry) => f.debug_tuple("Entry").field(entry).finish(),
            Entry::Occupied(entry) => f.debug_tuple("Entry").field(entry).finish(),
        }
    }
}

/// A view into an occupied entry in a [`TierMap`][crate::TierMap]. It is
/// part of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K: Ord, V> {
    vec: &'a mut TierVec<K, V>,
    slot: Slot,
}

impl<'a, K: Ord, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<&str, usize> = TierMap::new();
    /// map.entry("poneyland").or_insert(12);
    /// assert_eq!(map.entry("poneyland").key(), &"poneyland");
    /// ```
    pub fn key(&self) -> &K {
        self.vec.slot_ref(self.slot).0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        self.vec.slot_ref(self.slot).1
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// If you need a reference to the `OccupiedEntry` that may outlive the
    /// destruction of the `Entry` value, see [`into_mut`](Self::into_mut).
    pub fn get_mut(&mut self) -> &mut V {
        self.vec.slot_val_mut(self.slot)
    }

    /// Converts the entry into a mutable reference to its value.
    ///
    /// If you need multiple references to the `OccupiedEntry`, see
    /// [`get_mut`](Self::get_mut).
    pub fn into_mut(self) -> &'a mut V {
        self.vec.slot_val_mut(self.slot)
    }

    /// Sets the value of the entry and returns the entry's old value.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::map_types::Entry;
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<&str, usize> = TierMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(mut o) = map.entry("poneyland") {
    ///     assert_eq!(o.insert(15), 12);
    /// }
    /// assert_eq!(map["poneyland"], 15);
    /// ```
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Takes the value of the entry out of the map and returns it.
    ///
    /// Mid-storage entries are tombstoned, like
    /// [`remove`][crate::TierMap::remove].
    pub fn remove(self) -> V {
        self.vec.take_slot_value(self.slot)
    }

    /// Takes the key and value of the entry out of the map and returns them.
    ///
    /// Mid-storage entries are erased eagerly, like
    /// [`remove_entry`][crate::TierMap::remove_entry].
    pub fn remove_entry(self) -> (K, V) {
        self.vec.take_slot_entry(self.slot)
    }
}

impl<K: Ord + Debug, V: Debug> Debug for OccupiedEntry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry")
            .field("key", self.key())
            .field("value", self.get())
            .finish()
    }
}

/// A view into a vacant entry in a [`TierMap`][crate::TierMap]. It is part
/// of the [`Entry`] enum.
pub struct VacantEntry<'a, K: Ord, V> {
    vec: &'a mut TierVec<K, V>,
    key: K,
}

impl<'a, K: Ord, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value
    /// through the `VacantEntry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<&str, usize> = TierMap::new();
    /// assert_eq!(map.entry("poneyland").key(), &"poneyland");
    /// ```
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry with the `VacantEntry`'s key, and returns
    /// a mutable reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiervec::map_types::Entry;
    /// use tiervec::TierMap;
    ///
    /// let mut map: TierMap<&str, usize> = TierMap::new();
    ///
    /// if let Entry::Vacant(o) = map.entry("poneyland") {
    ///     o.insert(37);
    /// }
    /// assert_eq!(map["poneyland"], 37);
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        let vec = self.vec;
        let (slot, prev) = match vec.try_insert_slot(self.key, value) {
            Ok(done) => done,
            Err(e) => panic!("tiervec: {}", e),
        };
        debug_assert!(prev.is_none());
        vec.slot_val_mut(slot)
    }
}

impl<K: Ord + Debug, V> Debug for VacantEntry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VacantEntry").field(self.key()).finish()
    }
}
