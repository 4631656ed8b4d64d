use core::borrow::Borrow;
use core::mem;
use core::ops::RangeBounds;
use core::ptr;

use smallvec::SmallVec;
use tracing::trace;

use super::error::TierError;
use super::iter::{IntoIter, Iter, IterMut, Range, RangeMut};
use super::pair::Pair;
use super::raw::{insert_at, remove_at, RawBuf};

/// Storage capacity adopted by the first growth of an unallocated container.
pub(crate) const DEFAULT_CAPACITY: usize = 8;

// Tombstone list: sorted storage indices. Inline space covers the side
// capacity of storage up to 64 entries before spilling to the heap.
type DeadList = SmallVec<[usize; 8]>;

// Side-region capacity for a given storage capacity. The sqrt sizing is what
// bounds amortized mutation cost at O(sqrt n); the floor keeps the side
// regions usable whenever storage has any capacity at all.
fn side_capacity(cap: usize) -> usize {
    if cap == 0 {
        0
    } else {
        cap.isqrt().max(1)
    }
}

/// Position of a live element in one of the two pair regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Store(usize),
    Buf(usize),
}

/// The three-region engine: a large sorted storage array, a sqrt-sized
/// sorted insertion buffer, and a sqrt-sized sorted tombstone list of
/// storage indices. Observable contents are always
/// `(storage minus tombstones) union buffer`.
pub(crate) struct TierVec<K: Ord, V> {
    pub(crate) store: RawBuf<Pair<K, V>>,
    pub(crate) store_len: usize,
    pub(crate) buf: RawBuf<Pair<K, V>>,
    pub(crate) buf_len: usize,
    pub(crate) dead: DeadList,
    dead_cap: usize,
    merge_cnt: usize,
    compact_cnt: usize,
}

// SAFETY: the raw-pointer fields are uniquely owned handles to heap blocks;
// the container is an owner of `K` and `V` like `Vec<(K, V)>` is.
unsafe impl<K: Ord + Send, V: Send> Send for TierVec<K, V> {}
unsafe impl<K: Ord + Sync, V: Sync> Sync for TierVec<K, V> {}

impl<K: Ord, V> TierVec<K, V> {
    // Public API ------------------------------------------------------------------------------------------------------

    /// Constructor. Allocates nothing until the first insert.
    pub fn new() -> Self {
        TierVec {
            store: RawBuf::dangling(),
            store_len: 0,
            buf: RawBuf::dangling(),
            buf_len: 0,
            dead: SmallVec::new(),
            dead_cap: 0,
            merge_cnt: 0,
            compact_cnt: 0,
        }
    }

    /// Constructor with a pre-sized storage region (side regions follow).
    pub fn with_capacity(capacity: usize) -> Self {
        let mut vec = Self::new();
        vec.reserve(capacity);
        vec
    }

    /// Number of live entries across all three regions.
    pub fn len(&self) -> usize {
        self.store_len + self.buf_len - self.dead.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage capacity. The buffer and tombstone list hold roughly the
    /// square root of this many entries each.
    pub fn capacity(&self) -> usize {
        self.store.cap()
    }

    /// How many times the insertion buffer has been bulk-merged into storage.
    pub fn merge_cnt(&self) -> usize {
        self.merge_cnt
    }

    /// How many times the tombstone list has been compacted out of storage.
    pub fn compact_cnt(&self) -> usize {
        self.compact_cnt
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_slot(key).map(|slot| self.slot_ref(slot))
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let slot = self.find_slot(key)?;
        Some(self.slot_val_mut(slot))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_slot(key).is_some()
    }

    /// Insert a key-value pair. On a live duplicate, both the key and the
    /// value are replaced and the old value returned.
    ///
    /// Panics on allocation failure; see [`try_insert`](Self::try_insert).
    pub fn insert(&mut self, key: K, val: V) -> Option<V> {
        match self.try_insert(key, val) {
            Ok(prev) => prev,
            Err(e) => panic!("tiervec: {}", e),
        }
    }

    /// Fallible insert: an allocation failure in a growth or merge pass is
    /// reported with the container unchanged.
    pub fn try_insert(&mut self, key: K, val: V) -> Result<Option<V>, TierError> {
        self.try_insert_slot(key, val).map(|(_, prev)| prev)
    }

    /// Remove a key, returning its value.
    ///
    /// Mid-storage hits are tombstoned: the value moves out, the slot's key
    /// stays behind for binary search until the next compaction.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search_store(key) {
            Ok(at) => {
                if self.is_dead(at) {
                    if at + 1 == self.store_len {
                        self.pop_store_tail();
                    }
                    None
                } else if at + 1 == self.store_len {
                    self.pop_store_tail()
                } else {
                    Some(self.take_slot_value(Slot::Store(at)))
                }
            }
            Err(_) => {
                let at = self.search_buf(key).ok()?;
                Some(self.take_slot_value(Slot::Buf(at)))
            }
        }
    }

    /// Remove a key, returning the stored key and value.
    ///
    /// Unlike [`remove`](Self::remove) this cannot defer the removal: the
    /// key must be returned by move while tombstoned slots must keep a
    /// searchable key, so mid-storage hits close the gap eagerly (linear in
    /// the number of displaced entries).
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search_store(key) {
            Ok(at) => {
                if self.is_dead(at) {
                    if at + 1 == self.store_len {
                        self.pop_store_tail();
                    }
                    None
                } else {
                    Some(self.take_slot_entry(Slot::Store(at)))
                }
            }
            Err(_) => {
                let at = self.search_buf(key).ok()?;
                Some(self.take_slot_entry(Slot::Buf(at)))
            }
        }
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.edge_slot(true).map(|slot| self.slot_ref(slot))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.edge_slot(false).map(|slot| self.slot_ref(slot))
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let slot = self.edge_slot(true)?;
        Some(self.take_slot_entry(slot))
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let slot = self.edge_slot(false)?;
        Some(self.take_slot_entry(slot))
    }

    /// Destroy every live entry (and every tombstoned slot's key). Keeps the
    /// allocated capacity.
    pub fn clear(&mut self) {
        // Buffer slots are fully live.
        let b = self.buf.ptr();
        let m = self.buf_len;
        self.buf_len = 0;
        unsafe {
            for at in 0..m {
                let p = b.add(at);
                ptr::drop_in_place((*p).val.as_mut_ptr());
                ptr::drop_in_place(p);
            }
        }

        // Storage: tombstoned slots hold a key only.
        let s = self.store.ptr();
        let n = self.store_len;
        self.store_len = 0;
        let mut di = 0;
        unsafe {
            for at in 0..n {
                let p = s.add(at);
                if di < self.dead.len() && self.dead[di] == at {
                    di += 1;
                } else {
                    ptr::drop_in_place((*p).val.as_mut_ptr());
                }
                ptr::drop_in_place(p);
            }
        }
        self.dead.clear();
    }

    /// Grow storage to hold at least `capacity` entries; no-op if it already
    /// does. Growth flattens: the buffer and the tombstone list come out
    /// empty.
    ///
    /// Panics on allocation failure; see [`try_reserve`](Self::try_reserve).
    pub fn reserve(&mut self, capacity: usize) {
        if let Err(e) = self.try_reserve(capacity) {
            panic!("tiervec: {}", e);
        }
    }

    /// Fallible [`reserve`](Self::reserve). All blocks are acquired before
    /// any element moves, so failure leaves the container untouched.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), TierError> {
        self.try_grow(capacity)
    }

    /// Flatten: compact tombstones out of storage and merge the buffer in.
    /// Post-state: everything lives in sorted storage. Idempotent, and the
    /// observable contents never change.
    pub fn compact(&mut self) {
        if let Err(e) = self.try_flatten() {
            panic!("tiervec: {}", e);
        }
    }

    /// Retain entries matching the predicate. Entries are visited once each,
    /// in unspecified order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        // Storage pass: reject by tombstoning, one slot at a time, so the
        // region stays consistent even if the predicate panics.
        let mut di = 0;
        let mut at = 0;
        while at < self.store_len {
            if di < self.dead.len() && self.dead[di] == at {
                di += 1;
                at += 1;
                continue;
            }
            let keep = unsafe {
                let p = &mut *self.store.ptr().add(at);
                f(&p.key, p.val.assume_init_mut())
            };
            if !keep {
                unsafe {
                    ptr::drop_in_place((*self.store.ptr().add(at)).val.as_mut_ptr());
                }
                self.dead.insert(di, at);
                di += 1;
            }
            at += 1;
        }
        if !self.dead.is_empty() && self.dead.len() >= self.dead_cap {
            self.compact_dead();
        }

        // Buffer pass: in-place sweep. The length stays zeroed while the
        // predicate runs, so a panic leaks the remainder instead of
        // double-dropping.
        let b = self.buf.ptr();
        let m = self.buf_len;
        self.buf_len = 0;
        let mut w = 0;
        unsafe {
            for r in 0..m {
                let p = &mut *b.add(r);
                if f(&p.key, p.val.assume_init_mut()) {
                    if r != w {
                        ptr::copy_nonoverlapping(b.add(r), b.add(w), 1);
                    }
                    w += 1;
                } else {
                    ptr::drop_in_place(p.val.as_mut_ptr());
                    ptr::drop_in_place(b.add(r));
                }
            }
        }
        self.buf_len = w;
    }

    /// Move all entries of `other` into `self`; `other`'s value wins on a
    /// key collision.
    pub fn append(&mut self, other: &mut Self) {
        // Nothing to append!
        if other.is_empty() {
            return;
        }

        // Nothing to append to!
        if self.is_empty() {
            mem::swap(self, other);
            return;
        }

        for (key, val) in mem::take(other) {
            self.insert(key, val);
        }
    }

    /// Split at `key`: everything at or above it moves to the returned
    /// container.
    pub fn split_off<Q>(&mut self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if self.is_empty() {
            return Self::new();
        }
        self.compact();

        let at = self.store_pairs().partition_point(|p| p.key.borrow() < key);
        let tail = self.store_len - at;
        let mut other = Self::with_capacity(self.store.cap());
        unsafe {
            ptr::copy_nonoverlapping(self.store.ptr().add(at), other.store.ptr(), tail);
        }
        self.store_len = at;
        other.store_len = tail;
        other
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self)
    }

    pub fn range<T, R>(&self, range: R) -> Range<'_, K, V>
    where
        T: Ord + ?Sized,
        K: Borrow<T>,
        R: RangeBounds<T>,
    {
        Range::new(self, range)
    }

    pub fn range_mut<T, R>(&mut self, range: R) -> RangeMut<'_, K, V>
    where
        T: Ord + ?Sized,
        K: Borrow<T>,
        R: RangeBounds<T>,
    {
        RangeMut::new(self, range)
    }

    // Crate-internal API ----------------------------------------------------------------------------------------------

    // Locate a live element. A storage hit that is tombstoned is absent:
    // resurrection precedes buffer insertion in the insert path, so a buffer
    // key never has a physically-present storage twin.
    pub(crate) fn find_slot<Q>(&self, key: &Q) -> Option<Slot>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search_store(key) {
            Ok(at) if !self.is_dead(at) => Some(Slot::Store(at)),
            Ok(_) => None,
            Err(_) => self.search_buf(key).ok().map(Slot::Buf),
        }
    }

    pub(crate) fn slot_ref(&self, slot: Slot) -> (&K, &V) {
        // SAFETY: `slot` refers to a live element, whose value slot is live.
        unsafe {
            let p = match slot {
                Slot::Store(at) => &self.store_pairs()[at],
                Slot::Buf(at) => &self.buf_pairs()[at],
            };
            (&p.key, p.val.assume_init_ref())
        }
    }

    pub(crate) fn slot_val_mut(&mut self, slot: Slot) -> &mut V {
        // SAFETY: `slot` refers to a live element, whose value slot is live.
        unsafe {
            match slot {
                Slot::Store(at) => {
                    debug_assert!(!self.is_dead(at));
                    (*self.store.ptr().add(at)).val.assume_init_mut()
                }
                Slot::Buf(at) => (*self.buf.ptr().add(at)).val.assume_init_mut(),
            }
        }
    }

    // Insert returning the landing slot, for the entry API.
    pub(crate) fn try_insert_slot(
        &mut self,
        key: K,
        val: V,
    ) -> Result<(Slot, Option<V>), TierError> {
        // Tail fast path: strictly increasing keys never touch the buffer.
        if self.tail_admits(&key) {
            if self.store_len == self.store.cap() {
                self.try_grow(self.grow_target())?;
            }
            unsafe {
                ptr::write(self.store.ptr().add(self.store_len), Pair::new(key, val));
            }
            self.store_len += 1;
            return Ok((Slot::Store(self.store_len - 1), None));
        }

        match self.search_store(&key) {
            Ok(at) => match self.dead.binary_search(&at) {
                // Live twin: replace both halves (`Eq` may not consider all
                // of `K`).
                Err(_) => unsafe {
                    let p = &mut *self.store.ptr().add(at);
                    p.key = key;
                    let prev = mem::replace(p.val.assume_init_mut(), val);
                    Ok((Slot::Store(at), Some(prev)))
                },
                // Tombstoned twin: revive the slot in place. The old value
                // slot is raw, so this is a write, not an assignment.
                Ok(d) => unsafe {
                    self.dead.remove(d);
                    let p = &mut *self.store.ptr().add(at);
                    p.key = key;
                    p.val.write(val);
                    Ok((Slot::Store(at), None))
                },
            },
            Err(_) => self.try_insert_buf(key, val),
        }
    }

    // Positional erase returning the value; mid-storage slots are
    // tombstoned. Backs `OccupiedEntry::remove`.
    pub(crate) fn take_slot_value(&mut self, slot: Slot) -> V {
        match slot {
            Slot::Buf(at) => {
                // SAFETY: buffer slots are fully live; `at < buf_len`.
                let pair = unsafe { remove_at(self.buf.ptr(), self.buf_len, at) };
                self.buf_len -= 1;
                unsafe { pair.into_val() }
            }
            Slot::Store(at) => {
                debug_assert!(!self.is_dead(at));
                if at + 1 == self.store_len {
                    self.store_len -= 1;
                    let pair = unsafe { ptr::read(self.store.ptr().add(at)) };
                    return unsafe { pair.into_val() };
                }
                // Move the value out and tombstone the slot; the key stays
                // live so storage remains binary-searchable until the next
                // compaction.
                let val = unsafe { (*self.store.ptr().add(at)).val.as_ptr().read() };
                let d = self.dead.partition_point(|&x| x < at);
                self.dead.insert(d, at);
                if self.dead.len() >= self.dead_cap {
                    self.compact_dead();
                }
                val
            }
        }
    }

    // Positional erase returning both halves; mid-storage slots are closed
    // eagerly. Backs `remove_entry`, `pop_first`/`pop_last` and
    // `OccupiedEntry::remove_entry`.
    pub(crate) fn take_slot_entry(&mut self, slot: Slot) -> (K, V) {
        match slot {
            Slot::Buf(at) => {
                // SAFETY: buffer slots are fully live; `at < buf_len`.
                let pair = unsafe { remove_at(self.buf.ptr(), self.buf_len, at) };
                self.buf_len -= 1;
                unsafe { pair.into_pair() }
            }
            Slot::Store(at) => {
                debug_assert!(!self.is_dead(at));
                if at + 1 == self.store_len {
                    self.store_len -= 1;
                    let pair = unsafe { ptr::read(self.store.ptr().add(at)) };
                    return unsafe { pair.into_pair() };
                }
                // SAFETY: the shift is bitwise over mixed live/tombstoned
                // slots, which preserves each slot's liveness.
                let pair = unsafe { remove_at(self.store.ptr(), self.store_len, at) };
                self.store_len -= 1;
                // Tombstones above the gap slide down with it.
                let split = self.dead.partition_point(|&d| d < at);
                for d in &mut self.dead[split..] {
                    *d -= 1;
                }
                unsafe { pair.into_pair() }
            }
        }
    }

    // Drop tombstoned keys and close the gaps. `IntoIter` relies on the
    // post-state: every storage slot fully live.
    pub(crate) fn compact_dead(&mut self) {
        if self.dead.is_empty() {
            return;
        }
        self.compact_cnt += 1;
        trace!(
            storage = self.store_len,
            tombstones = self.dead.len(),
            "compacting tombstones out of storage"
        );

        let base = self.store.ptr();
        let len = self.store_len;
        let first = self.dead[0];
        // Only the intact prefix stays reachable while keys drop; a
        // panicking `Drop` leaks the rest instead of double-dropping.
        self.store_len = first;
        let mut write = first;
        let mut di = 0;
        unsafe {
            for read in first..len {
                if di < self.dead.len() && self.dead[di] == read {
                    ptr::drop_in_place(&mut (*base.add(read)).key);
                    di += 1;
                } else {
                    ptr::copy_nonoverlapping(base.add(read), base.add(write), 1);
                    write += 1;
                }
            }
        }
        self.store_len = write;
        self.dead.clear();
    }

    pub(crate) fn store_pairs(&self) -> &[Pair<K, V>] {
        // SAFETY: keys in `[0, store_len)` are always live; value slots are
        // `MaybeUninit` and carry no validity requirement.
        unsafe { core::slice::from_raw_parts(self.store.ptr(), self.store_len) }
    }

    pub(crate) fn buf_pairs(&self) -> &[Pair<K, V>] {
        // SAFETY: as above; buffer slots are fully live besides.
        unsafe { core::slice::from_raw_parts(self.buf.ptr(), self.buf_len) }
    }

    // Private API -----------------------------------------------------------------------------------------------------

    fn search_store<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.store_pairs()
            .binary_search_by(|p| p.key.borrow().cmp(key))
    }

    fn search_buf<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.buf_pairs()
            .binary_search_by(|p| p.key.borrow().cmp(key))
    }

    fn is_dead(&self, at: usize) -> bool {
        self.dead.binary_search(&at).is_ok()
    }

    // True when `key` is strictly above both region tails (or the regions
    // are empty), i.e. an O(1) storage append preserves every invariant.
    fn tail_admits(&self, key: &K) -> bool {
        let above_store = match self.store_pairs().last() {
            Some(p) => p.key < *key,
            None => true,
        };
        let above_buf = match self.buf_pairs().last() {
            Some(p) => p.key < *key,
            None => true,
        };
        above_store && above_buf
    }

    fn grow_target(&self) -> usize {
        self.store.cap().saturating_mul(2).max(DEFAULT_CAPACITY)
    }

    fn try_insert_buf(&mut self, key: K, val: V) -> Result<(Slot, Option<V>), TierError> {
        match self.search_buf(&key) {
            Ok(at) => unsafe {
                let p = &mut *self.buf.ptr().add(at);
                p.key = key;
                let prev = mem::replace(p.val.assume_init_mut(), val);
                Ok((Slot::Buf(at), Some(prev)))
            },
            Err(at) => {
                if self.buf_len == self.buf.cap() {
                    self.try_flatten()?;
                    debug_assert_eq!(self.buf_len, 0);
                    unsafe {
                        insert_at(self.buf.ptr(), 0, 0, Pair::new(key, val));
                    }
                    self.buf_len = 1;
                    Ok((Slot::Buf(0), None))
                } else {
                    unsafe {
                        insert_at(self.buf.ptr(), self.buf_len, at, Pair::new(key, val));
                    }
                    self.buf_len += 1;
                    Ok((Slot::Buf(at), None))
                }
            }
        }
    }

    fn try_flatten(&mut self) -> Result<(), TierError> {
        if self.len() > self.store.cap() {
            // Growth absorbs the buffer and the tombstones in one pass.
            return self.try_grow(self.grow_target());
        }
        self.compact_dead();
        self.merge_buf();
        Ok(())
    }

    // In-place two-way merge of the buffer into storage, right to left.
    // Writes land only in raw tail slots or slots already vacated by the
    // walk, so every move is a plain bitwise copy.
    fn merge_buf(&mut self) {
        if self.buf_len == 0 {
            return;
        }
        debug_assert!(self.dead.is_empty());
        debug_assert!(self.store_len + self.buf_len <= self.store.cap());
        self.merge_cnt += 1;
        trace!(
            storage = self.store_len,
            buffered = self.buf_len,
            "merging insertion buffer into storage"
        );

        let s = self.store.ptr();
        let b = self.buf.ptr();
        let (n, m) = (self.store_len, self.buf_len);
        // Lengths stay zeroed while the comparator runs (leak amnesty).
        self.store_len = 0;
        self.buf_len = 0;
        let (mut i, mut j, mut w) = (n, m, n + m);
        unsafe {
            while j > 0 {
                w -= 1;
                if i > 0 && (*s.add(i - 1)).key > (*b.add(j - 1)).key {
                    i -= 1;
                    ptr::copy_nonoverlapping(s.add(i), s.add(w), 1);
                } else {
                    j -= 1;
                    ptr::copy_nonoverlapping(b.add(j), s.add(w), 1);
                }
            }
        }
        self.store_len = n + m;
    }

    fn try_grow(&mut self, new_cap: usize) -> Result<(), TierError> {
        if new_cap <= self.store.cap() {
            return Ok(());
        }
        let side = side_capacity(new_cap);

        // Acquire every block up front: failure must leave the container
        // untouched.
        let new_store: RawBuf<Pair<K, V>> = RawBuf::try_allocate(new_cap)?;
        let new_buf: RawBuf<Pair<K, V>> = RawBuf::try_allocate(side)?;
        self.dead.try_reserve(side).map_err(|_| TierError::Alloc {
            bytes: side * mem::size_of::<usize>(),
        })?;
        trace!(
            capacity = self.store.cap(),
            new_capacity = new_cap,
            "growing storage"
        );

        self.compact_dead();

        // Forward move-merge of storage and buffer into the fresh block.
        let s = self.store.ptr();
        let b = self.buf.ptr();
        let d = new_store.ptr();
        let (n, m) = (self.store_len, self.buf_len);
        self.store_len = 0;
        self.buf_len = 0;
        let (mut i, mut j, mut w) = (0, 0, 0);
        unsafe {
            while i < n && j < m {
                if (*s.add(i)).key < (*b.add(j)).key {
                    ptr::copy_nonoverlapping(s.add(i), d.add(w), 1);
                    i += 1;
                } else {
                    ptr::copy_nonoverlapping(b.add(j), d.add(w), 1);
                    j += 1;
                }
                w += 1;
            }
            ptr::copy_nonoverlapping(s.add(i), d.add(w), n - i);
            ptr::copy_nonoverlapping(b.add(j), d.add(w + (n - i)), m - j);
        }
        self.store = new_store;
        self.buf = new_buf;
        self.store_len = n + m;
        self.dead_cap = side;
        Ok(())
    }

    // Physically pop the storage tail. Returns `None` when the tail slot was
    // itself a tombstone (the entry was already logically gone, and both the
    // slot and its tombstone can be retired).
    fn pop_store_tail(&mut self) -> Option<V> {
        debug_assert!(self.store_len > 0);
        self.store_len -= 1;
        // SAFETY: the former tail is never read through the region again.
        let pair = unsafe { ptr::read(self.store.ptr().add(self.store_len)) };
        if self.dead.last() == Some(&self.store_len) {
            self.dead.pop();
            drop(pair); // key only; the value slot was vacated at erase time
            return None;
        }
        Some(unsafe { pair.into_val() })
    }

    // First (`front == true`) or last live slot in logical order.
    fn edge_slot(&self, front: bool) -> Option<Slot> {
        let s = if front {
            self.first_live_store()
        } else {
            self.last_live_store()
        };
        let b = if self.buf_len == 0 {
            None
        } else if front {
            Some(0)
        } else {
            Some(self.buf_len - 1)
        };
        match (s, b) {
            (None, None) => None,
            (Some(si), None) => Some(Slot::Store(si)),
            (None, Some(bi)) => Some(Slot::Buf(bi)),
            (Some(si), Some(bi)) => {
                let s_key = &self.store_pairs()[si].key;
                let b_key = &self.buf_pairs()[bi].key;
                let store_wins = if front { s_key < b_key } else { s_key > b_key };
                if store_wins {
                    Some(Slot::Store(si))
                } else {
                    Some(Slot::Buf(bi))
                }
            }
        }
    }

    // Skip the tombstone run at the front of storage.
    fn first_live_store(&self) -> Option<usize> {
        let mut at = 0;
        for &d in &self.dead {
            if d == at {
                at += 1;
            } else {
                break;
            }
        }
        if at < self.store_len {
            Some(at)
        } else {
            None
        }
    }

    // Skip the tombstone run at the back of storage (the greatest index not
    // covered by a trailing tombstone run).
    fn last_live_store(&self) -> Option<usize> {
        let mut end = self.store_len;
        let mut k = self.dead.len();
        while k > 0 && self.dead[k - 1] + 1 == end {
            k -= 1;
            end -= 1;
        }
        if end > 0 {
            Some(end - 1)
        } else {
            None
        }
    }
}

// Convenience Traits --------------------------------------------------------------------------------------------------

// Default constructor
impl<K: Ord, V> Default for TierVec<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Drop for TierVec<K, V> {
    fn drop(&mut self) {
        self.clear();
        // The three `RawBuf`s release their blocks.
    }
}

impl<K: Ord + Clone, V: Clone> Clone for TierVec<K, V> {
    fn clone(&self) -> Self {
        // Clone into flattened form: the logical sequence is already sorted,
        // so every pair lands in storage via direct appends.
        let mut out = Self::with_capacity(self.store.cap().max(self.len()));
        for (k, v) in self.iter() {
            unsafe {
                ptr::write(
                    out.store.ptr().add(out.store_len),
                    Pair::new(k.clone(), v.clone()),
                );
            }
            out.store_len += 1;
        }
        out
    }
}

// Iterators -----------------------------------------------------------------------------------------------------------

// Consuming iterator
impl<K: Ord, V> IntoIterator for TierVec<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

// Reference iterator, immutable
impl<'a, K: Ord, V> IntoIterator for &'a TierVec<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Reference iterator, mutable
impl<'a, K: Ord, V> IntoIterator for &'a mut TierVec<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// Test hooks ----------------------------------------------------------------------------------------------------------

#[cfg(test)]
impl<K: Ord, V> TierVec<K, V> {
    pub(crate) fn buf_len(&self) -> usize {
        self.buf_len
    }

    pub(crate) fn dead_len(&self) -> usize {
        self.dead.len()
    }

    pub(crate) fn dead_cap(&self) -> usize {
        self.dead_cap
    }

    pub(crate) fn buf_cap(&self) -> usize {
        self.buf.cap()
    }

    // Verify the structural invariants:
    // 1. Storage keys strictly increasing.
    // 2. Buffer keys strictly increasing.
    // 3. Tombstones strictly increasing and in bounds.
    // 4. Region sizes within their caps (the tombstone list strictly, since
    //    reaching its cap triggers immediate compaction).
    // 5. Buffer keys disjoint from all physically-present storage keys.
    // 6. Logical size consistent with the three region sizes.
    // 7. Side capacities derived from the storage capacity.
    pub(crate) fn assert_invariants(&self) {
        let store = self.store_pairs();
        assert!(
            store.windows(2).all(|w| w[0].key < w[1].key),
            "Internal invariant failed: storage out of order!"
        );

        let buf = self.buf_pairs();
        assert!(
            buf.windows(2).all(|w| w[0].key < w[1].key),
            "Internal invariant failed: buffer out of order!"
        );

        assert!(
            self.dead.windows(2).all(|w| w[0] < w[1]),
            "Internal invariant failed: tombstone list out of order!"
        );
        assert!(
            self.dead.iter().all(|&d| d < self.store_len),
            "Internal invariant failed: tombstone out of bounds!"
        );

        assert!(self.dead.len() <= self.store_len);
        assert!(self.buf_len <= self.buf.cap());
        assert!(
            self.dead.is_empty() || self.dead.len() < self.dead_cap,
            "Internal invariant failed: tombstone list at cap without compaction!"
        );

        assert!(
            buf.iter()
                .all(|p| store.binary_search_by(|s| s.key.cmp(&p.key)).is_err()),
            "Internal invariant failed: buffer key shadows a storage key!"
        );

        let mut visited = 0;
        let mut prev: Option<&K> = None;
        for (k, _) in self.iter() {
            if let Some(p) = prev {
                assert!(p < k, "Internal invariant failed: iteration out of order!");
            }
            prev = Some(k);
            visited += 1;
        }
        assert_eq!(
            visited,
            self.len(),
            "Internal invariant failed: iteration count differs from len!"
        );

        if self.store.cap() == 0 {
            assert_eq!(self.buf.cap(), 0);
            assert_eq!(self.dead_cap, 0);
        } else {
            assert_eq!(self.buf.cap(), side_capacity(self.store.cap()));
            assert_eq!(self.dead_cap, self.buf.cap());
        }
    }
}
