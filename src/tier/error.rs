use thiserror::Error;

/// Errors for the fallible (`try_*`) operations.
///
/// The infallible twins of the same operations panic with the rendered
/// message instead. Either way, a failed operation leaves the container
/// exactly as it was before the call.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum TierError {
    /// The allocator refused a block of this many bytes.
    #[error("memory allocation of {bytes} bytes failed")]
    Alloc {
        /// Size of the refused request.
        bytes: usize,
    },

    /// The requested capacity exceeds what a single allocation can address.
    #[error("capacity overflow")]
    CapacityOverflow,
}
