//! Error types for fixring operations.

use thiserror::Error;

/// Returned by [`Ring::try_push_back`](crate::Ring::try_push_back) when the
/// ring has no free slot. Carries the rejected item.
#[derive(Clone, Copy, PartialEq, Eq, Error)]
#[error("ring buffer is full")]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Recovers the item that could not be stored.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

// Manual impl so `Full<T>` is an `Error` for any `T`, not just `T: Debug`.
impl<T> std::fmt::Debug for Full<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Full").finish_non_exhaustive()
    }
}
