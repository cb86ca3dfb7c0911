//! Index-advance strategies.
//!
//! A [`Ring`](crate::Ring) never stores a sequence number: `head` and `tail`
//! are physical slot indices in `0..N` and are wrapped on every advance. How
//! that wrap is computed is chosen at the type level, so the choice costs
//! nothing at runtime.
//!
//! | Strategy   | Valid `N`          | Advance                            |
//! |------------|--------------------|------------------------------------|
//! | [`Modulo`] | any `N ≥ 2`        | `idx + 1`, reset to 0 when it hits `N` |
//! | [`Mask`]   | powers of two ≥ 2  | `(idx + 1) & (N - 1)`              |
//!
//! Both produce the same index sequence whenever `Mask` is valid.

mod sealed {
    pub trait Sealed {}
}

/// Rule used to move a cursor one slot forward in a backing store of `N` slots.
///
/// Sealed: the ring relies on `advance` always returning a value in `0..N`.
pub trait Wrap: sealed::Sealed {
    /// Whether this strategy is only correct for power-of-two `N`.
    const REQUIRES_POWER_OF_TWO: bool;

    /// Short name used in benchmark and log labels.
    const NAME: &'static str;

    /// Returns the slot after `idx`, wrapping to 0 past the end.
    fn advance<const N: usize>(idx: usize) -> usize;

    /// Returns the slot `offset` positions after `idx`.
    ///
    /// `offset` must be less than `N`.
    #[inline]
    fn offset<const N: usize>(idx: usize, offset: usize) -> usize {
        let raw = idx + offset;
        if raw >= N {
            raw - N
        } else {
            raw
        }
    }
}

/// Compare-and-reset wrapping, valid for any `N ≥ 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulo {}

/// Bitmask wrapping, valid only when `N` is a power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mask {}

impl sealed::Sealed for Modulo {}
impl sealed::Sealed for Mask {}

impl Wrap for Modulo {
    const REQUIRES_POWER_OF_TWO: bool = false;
    const NAME: &'static str = "modulo";

    #[inline]
    fn advance<const N: usize>(idx: usize) -> usize {
        let next = idx + 1;
        if next == N {
            0
        } else {
            next
        }
    }
}

impl Wrap for Mask {
    const REQUIRES_POWER_OF_TWO: bool = true;
    const NAME: &'static str = "mask";

    #[inline]
    fn advance<const N: usize>(idx: usize) -> usize {
        (idx + 1) & (N - 1)
    }

    #[inline]
    fn offset<const N: usize>(idx: usize, offset: usize) -> usize {
        (idx + offset) & (N - 1)
    }
}
