use std::collections::TryReserveError;

use thiserror::Error;

use crate::arena::AllocError;

/// Errors reported by the fallible (`try_*`) operations of a [`Tree`](crate::Tree).
///
/// Apart from the allocation variants these are all misuse of the API. The non-`try` methods
/// panic with the same message instead of returning them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The cursor was produced by a different tree.
    #[error("cursor belongs to a different tree")]
    ForeignCursor,
    /// The cursor is `end()`, which holds no element.
    #[error("cursor is at the end position")]
    EndCursor,
    /// The element the cursor referred to has been removed.
    #[error("cursor refers to a removed element")]
    StaleCursor,
    /// Tried to step forward from `end()`.
    #[error("cannot advance past the end")]
    PastEnd,
    /// Tried to step backward from `begin()`.
    #[error("cannot step back before the first element")]
    BeforeBegin,
    /// An element comparing equal to the inserted one is already stored.
    #[error("an equal element is already stored")]
    DuplicateKey,
    /// No more node handles can be issued.
    #[error("tree is at maximum capacity ({0} elements)")]
    CapacityExceeded(usize),
    /// Node storage could not grow.
    #[error("failed to allocate a node: {0}")]
    AllocFailed(#[from] TryReserveError),
}

impl From<AllocError> for TreeError {
    fn from(err: AllocError) -> Self {
        match err {
            AllocError::Full => TreeError::CapacityExceeded(crate::arena::Handle::MAX),
            AllocError::Reserve(err) => TreeError::AllocFailed(err),
        }
    }
}
