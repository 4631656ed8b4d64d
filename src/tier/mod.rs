mod error;
pub use error::TierError;

mod pair;
mod raw;

mod iter;
pub(crate) use iter::{IntoIter, Iter, IterMut, Range, RangeMut};


#[allow(clippy::module_inception)]
mod tier;
pub(crate) use tier::{Slot, TierVec};
