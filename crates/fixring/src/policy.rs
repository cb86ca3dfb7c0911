//! What `push_back` does when the ring is full.
//!
//! The policy is a type parameter of [`Ring`](crate::Ring). Rings that do not
//! name one get [`DefaultPolicy`], which is [`Discard`] unless the crate is
//! built with the `evict-oldest` feature, in which case it is [`Evict`].

mod sealed {
    pub trait Sealed {}
}

/// Full-buffer behavior for `push_back`.
pub trait FullPolicy: sealed::Sealed {
    /// `true` to drop the oldest element and admit the new one,
    /// `false` to hand the new one back untouched.
    const EVICTS: bool;

    /// Short name used in benchmark and log labels.
    const NAME: &'static str;
}

/// Reject the incoming element; the ring is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {}

/// Remove the oldest element to make room for the incoming one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evict {}

impl sealed::Sealed for Discard {}
impl sealed::Sealed for Evict {}

impl FullPolicy for Discard {
    const EVICTS: bool = false;
    const NAME: &'static str = "discard";
}

impl FullPolicy for Evict {
    const EVICTS: bool = true;
    const NAME: &'static str = "evict";
}

/// Policy used when a ring type does not name one.
#[cfg(not(feature = "evict-oldest"))]
pub type DefaultPolicy = Discard;

/// Policy used when a ring type does not name one.
#[cfg(feature = "evict-oldest")]
pub type DefaultPolicy = Evict;

/// Result of [`Ring::push_back`](crate::Ring::push_back).
///
/// A push always succeeds in the sense that the ring stays consistent; this
/// only reports what happened to the element that did not end up stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pushed<T> {
    /// The item was written at the tail.
    Stored,
    /// The ring was full under [`Discard`]; the item is returned unstored.
    Discarded(T),
    /// The ring was full under [`Evict`]; this is the evicted oldest element.
    /// The new item was stored.
    Evicted(T),
}

impl<T> Pushed<T> {
    /// Returns `true` if the pushed item is now in the ring.
    #[inline]
    pub fn is_stored(&self) -> bool {
        !matches!(self, Self::Discarded(_))
    }

    /// Returns the element that left (or never entered) the ring, if any.
    #[inline]
    pub fn into_displaced(self) -> Option<T> {
        match self {
            Self::Stored => None,
            Self::Discarded(item) | Self::Evicted(item) => Some(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pushed_is_stored() {
        assert!(Pushed::<u8>::Stored.is_stored());
        assert!(Pushed::Evicted(1u8).is_stored());
        assert!(!Pushed::Discarded(1u8).is_stored());
    }

    #[test]
    fn test_pushed_into_displaced() {
        assert_eq!(Pushed::<u8>::Stored.into_displaced(), None);
        assert_eq!(Pushed::Discarded(3u8).into_displaced(), Some(3));
        assert_eq!(Pushed::Evicted(4u8).into_displaced(), Some(4));
    }

    #[test]
    fn test_policy_labels() {
        assert_eq!(Discard::NAME, "discard");
        assert_eq!(Evict::NAME, "evict");
    }

    #[test]
    fn test_default_policy_follows_feature() {
        assert_eq!(
            <DefaultPolicy as FullPolicy>::EVICTS,
            cfg!(feature = "evict-oldest")
        );
    }
}
