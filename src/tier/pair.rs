use core::mem::MaybeUninit;

// Storage cell.
//
// `val` is live for every buffer slot and for every storage slot whose index
// is not on the tombstone list. A tombstoned slot keeps only `key` live: the
// value was moved out and handed to the caller when the entry was erased, but
// the key must stay valid so binary search over the full storage prefix
// remains well-defined until the next compaction.
//
// `Pair` has no `Drop` impl, so dropping one in place releases exactly the
// key. Sites that own a live pair drop the value slot first.
pub(crate) struct Pair<K, V> {
    pub(crate) key: K,
    pub(crate) val: MaybeUninit<V>,
}

impl<K, V> Pair<K, V> {
    pub(crate) fn new(key: K, val: V) -> Self {
        Pair {
            key,
            val: MaybeUninit::new(val),
        }
    }

    /// Move the value out, dropping the key.
    ///
    /// # Safety
    ///
    /// `self.val` must be live.
    pub(crate) unsafe fn into_val(self) -> V {
        let Pair { key, val } = self;
        drop(key);
        unsafe { val.assume_init() }
    }

    /// Move both halves out.
    ///
    /// # Safety
    ///
    /// `self.val` must be live.
    pub(crate) unsafe fn into_pair(self) -> (K, V) {
        let Pair { key, val } = self;
        (key, unsafe { val.assume_init() })
    }
}
