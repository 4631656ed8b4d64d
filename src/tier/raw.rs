use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};
use std::alloc::{alloc, dealloc};

use super::error::TierError;

// Allocation-owning handle for one region: a pointer plus a capacity and
// nothing else. Element lifecycle (construction, drops, length tracking)
// belongs to the owner; `Drop` here only returns the block to the allocator.
// Dropping a `RawBuf` whose slots still hold live elements leaks them.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuf<T> {
    pub(crate) const fn dangling() -> Self {
        RawBuf {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) fn try_allocate(cap: usize) -> Result<Self, TierError> {
        if cap == 0 || mem::size_of::<T>() == 0 {
            // ZSTs and empty regions never touch the allocator; capacity is
            // bookkeeping only.
            return Ok(RawBuf {
                ptr: NonNull::dangling(),
                cap,
                _marker: PhantomData,
            });
        }

        let layout = Layout::array::<T>(cap).map_err(|_| TierError::CapacityOverflow)?;
        if layout.size() > isize::MAX as usize {
            return Err(TierError::CapacityOverflow);
        }

        // SAFETY: `layout` has non-zero size (`cap > 0`, `T` is not a ZST).
        let raw = unsafe { alloc(layout) };
        match NonNull::new(raw as *mut T) {
            Some(ptr) => Ok(RawBuf {
                ptr,
                cap,
                _marker: PhantomData,
            }),
            None => Err(TierError::Alloc {
                bytes: layout.size(),
            }),
        }
    }

    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    pub(crate) fn cap(&self) -> usize {
        self.cap
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.cap > 0 && mem::size_of::<T>() > 0 {
            // SAFETY: allocated in `try_allocate` with this exact layout.
            unsafe {
                dealloc(
                    self.ptr.as_ptr() as *mut u8,
                    Layout::array::<T>(self.cap).unwrap(),
                );
            }
        }
    }
}

// Sorted-array shift primitives. Both use `ptr::copy`, which picks the
// iteration direction for overlapping ranges so no slot is overwritten
// before it is read.

/// Open a gap at `at` in the initialized prefix `[0, len)` and write `item`
/// into it.
///
/// # Safety
///
/// `at <= len` and `len < capacity`. The shift is bitwise and preserves
/// whatever per-slot liveness contract the owner maintains.
pub(crate) unsafe fn insert_at<T>(base: *mut T, len: usize, at: usize, item: T) {
    debug_assert!(at <= len);
    unsafe {
        ptr::copy(base.add(at), base.add(at + 1), len - at);
        ptr::write(base.add(at), item);
    }
}

/// Close the gap at `at`, returning the element that occupied it.
///
/// # Safety
///
/// `at < len`, as above.
pub(crate) unsafe fn remove_at<T>(base: *mut T, len: usize, at: usize) -> T {
    debug_assert!(at < len);
    unsafe {
        let item = ptr::read(base.add(at));
        ptr::copy(base.add(at + 1), base.add(at), len - at - 1);
        item
    }
}
