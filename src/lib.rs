/*!
Ordered map over tiered sorted arrays (a cache-friendly alternative to a node-based tree).

* Contiguous: every element lives in one of two flat, sorted arrays.
* Sub-linear mutation: inserts land in a small staging buffer, erases in a
  small tombstone list; both are merged back in bulk, for amortized `O(sqrt n)`
  cost per mutation instead of the sorted-`Vec` `O(n)`.
* Validated against the standard library's `BTreeMap` via differential testing.

### About

One API:

* Ordered Map API ([`TierMap`](crate::TierMap)) - subset of
  [`BTreeMap`](https://doc.rust-lang.org/std/collections/struct.BTreeMap.html).

Three regions cooperate behind it:

* **Storage** - a large sorted array of key/value pairs, the primary residence.
* **Buffer** - a `sqrt(capacity)`-sized sorted array of pairs awaiting merge.
* **Tombstones** - a `sqrt(capacity)`-sized sorted list of storage indices
  marked as logically removed but still physically present.

The observable contents are always `(storage minus tombstones) union buffer`.
Lookups run a binary search per region (`O(log n)`). An insert either appends
to the storage tail in `O(1)` (strictly increasing keys never touch the
buffer), revives a tombstoned slot, or lands in the buffer; a full buffer is
bulk-merged into storage in one in-place pass. An erase pops the storage tail,
shrinks the buffer, or records a tombstone; a full tombstone list is compacted
out in one sweep.

### Usage

`TierMap` in place of `BTreeMap`:

```rust
use tiervec::TierMap;

let mut movies = TierMap::new();

movies.insert(1972, "The Godfather");
movies.insert(1999, "The Matrix");
movies.insert(1994, "Leon");

assert_eq!(movies.len(), 3);
assert_eq!(movies.get(&1994), Some(&"Leon"));

// Keys iterate in order regardless of insertion order.
let years: Vec<_> = movies.keys().copied().collect();
assert_eq!(years, [1972, 1994, 1999]);

// Erase is lazy (tombstoned), but observably immediate.
movies.remove(&1972);
assert_eq!(movies.len(), 2);
assert!(!movies.contains_key(&1972));
```

### Complexity

Space is always `O(n)`. Time:

| Operation | Average Case | Worst Case |
| --- | --- | --- |
| `get` | `O(log n)` | `O(log n)` |
| `insert` | Amortized `O(sqrt n)` | `O(n)` (merge or growth pass) |
| `remove` | Amortized `O(sqrt n)` | `O(n)` (compaction pass) |
| iteration | `O(n)` total | `O(n)` total |

The `O(1)` tail fast path makes bulk loading from sorted input linear overall.

### Safety

The engine manipulates partially-initialized arrays directly (`MaybeUninit`
value slots, bitwise move merges), so the core module uses `unsafe`. Every
`unsafe` block is local to the `tier` module and documents the initialization
contract it relies on; the public API is safe. The crate is differentially
fuzzed against `BTreeMap` with internal invariant checks after every
operation.
*/

#![deny(missing_docs)]

mod tier;
pub use crate::tier::TierError;

mod map;
pub use crate::map::TierMap;

mod entry;

/// [`TierMap`][crate::map::TierMap]'s iterator and view return types.
pub mod map_types;
