//! Fixed-capacity FIFO ring buffer with inline storage.
//!
//! [`Ring<T, N, W, P>`] keeps `N` slots embedded directly in the struct and
//! never allocates. Two physical cursors track the live range:
//!
//! - `head`: slot of the oldest live element
//! - `tail`: slot the next `push_back` writes to
//!
//! One slot is always left free so that `head == tail` means empty and
//! `advance(tail) == head` means full, with no extra counter. The usable
//! capacity is therefore `N - 1`.
//!
//! ```text
//!          head             tail
//!           ↓                ↓
//! ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! │   │   │ a │ b │ c │ d │   │   │   N = 8, len = 4, capacity = 7
//! └───┴───┴───┴───┴───┴───┴───┴───┘
//! ```
//!
//! `W` picks how cursors wrap ([`Modulo`] or [`Mask`]), `P` picks what a push
//! into a full ring does ([`Discard`](crate::Discard) or
//! [`Evict`](crate::Evict)).

use crate::error::Full;
use crate::invariants::{
    debug_assert_bounded_len, debug_assert_index_in_bounds, debug_assert_live_slot,
};
use crate::iter::{Drain, IntoIter, Iter, IterMut};
use crate::policy::{DefaultPolicy, FullPolicy, Pushed};
use crate::wrap::{Mask, Modulo, Wrap};

use std::fmt;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ops::Range;

// =============================================================================
// RING BUFFER
// =============================================================================

/// A fixed-capacity ring buffer holding up to `N - 1` elements of `T`.
///
/// # Type Parameters
///
/// - `T`: The element type
/// - `N`: Number of backing slots (`N ≥ 2`; a power of two for [`Mask`])
/// - `W`: Index-advance strategy
/// - `P`: Full-policy applied by [`push_back`](Self::push_back)
///
/// An invalid `N` is rejected when `new()` is instantiated:
///
/// ```compile_fail
/// // Mask wrapping with a non-power-of-two slot count
/// let _ring = fixring::FastRing::<u32, 12>::new();
/// ```
///
/// ```compile_fail
/// // A single slot leaves no room for the reserved one
/// let _ring = fixring::GeneralRing::<u32, 1>::new();
/// ```
pub struct Ring<T, const N: usize, W: Wrap = Modulo, P: FullPolicy = DefaultPolicy> {
    /// Slot of the oldest live element (equal to `tail` when empty)
    head: usize,
    /// Slot the next push writes to
    tail: usize,
    /// Backing store. Slots in the logical range `[head, tail)` are initialized.
    buffer: [MaybeUninit<T>; N],
    _strategy: PhantomData<fn() -> (W, P)>,
}

/// Ring for any slot count `N ≥ 2`, wrapping by compare-and-reset.
pub type GeneralRing<T, const N: usize, P = DefaultPolicy> = Ring<T, N, Modulo, P>;

/// Ring for power-of-two slot counts, wrapping by bitmask.
pub type FastRing<T, const N: usize, P = DefaultPolicy> = Ring<T, N, Mask, P>;

impl<T, const N: usize, W: Wrap, P: FullPolicy> Ring<T, N, W, P> {
    /// Evaluated once per instantiation; a failing assert is a build error.
    const VALID_SLOTS: () = {
        assert!(N >= 2, "ring needs at least 2 slots (one is always reserved)");
        assert!(
            !W::REQUIRES_POWER_OF_TWO || N.is_power_of_two(),
            "mask wrapping requires the slot count to be a power of 2"
        );
    };

    /// Maximum number of live elements, `N - 1`.
    pub const CAPACITY: usize = N - 1;

    /// Creates an empty ring. Never allocates.
    ///
    /// # Example
    ///
    /// ```
    /// use fixring::GeneralRing;
    ///
    /// let ring: GeneralRing<u64, 11> = GeneralRing::new();
    /// assert_eq!(ring.capacity(), 10);
    /// assert!(ring.is_empty());
    /// ```
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_SLOTS;

        Self {
            head: 0,
            tail: 0,
            buffer: [const { MaybeUninit::uninit() }; N],
            _strategy: PhantomData,
        }
    }

    // =========================================================================
    // STATUS
    // =========================================================================

    /// Returns the maximum number of live elements, `N - 1`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        // `>=` so that head == tail reads as 0, not N
        if self.tail >= self.head {
            self.tail - self.head
        } else {
            N + self.tail - self.head
        }
    }

    /// Returns true if the ring holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns true if the next `push_back` would trigger the full-policy.
    #[inline]
    pub fn is_full(&self) -> bool {
        W::advance::<N>(self.tail) == self.head
    }

    /// Returns the physical `(head, tail)` slot indices.
    ///
    /// Two rings driven by the same operations report the same cursors,
    /// whichever wrap strategy they use.
    #[inline]
    pub fn cursors(&self) -> (usize, usize) {
        (self.head, self.tail)
    }

    // =========================================================================
    // ACCESS
    // =========================================================================

    /// Returns the oldest element, or `None` if the ring is empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the oldest element mutably, or `None` if the ring is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Returns the newest element, or `None` if the ring is empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: non-empty, so the slot before tail is the newest live one
        Some(unsafe { self.slot(self.last_slot()) })
    }

    /// Returns the newest element mutably, or `None` if the ring is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        let idx = self.last_slot();
        // SAFETY: as in `back`
        Some(unsafe { self.slot_mut(idx) })
    }

    /// Returns the element `index` positions after the oldest one.
    ///
    /// `get(0)` is the front, `get(len() - 1)` the back.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        // SAFETY: index < len, so the slot is live
        Some(unsafe { self.slot(W::offset::<N>(self.head, index)) })
    }

    /// Mutable counterpart of [`get`](Self::get).
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len() {
            return None;
        }
        let idx = W::offset::<N>(self.head, index);
        // SAFETY: index < len, so the slot is live
        Some(unsafe { self.slot_mut(idx) })
    }

    /// Returns the live elements as two slices, oldest first.
    ///
    /// The second slice is non-empty only when the live range wraps past the
    /// end of the backing store.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (first, second) = self.live_ranges();
        // SAFETY: both ranges cover live slots only
        unsafe {
            (
                assume_init_slice(&self.buffer[first]),
                assume_init_slice(&self.buffer[second]),
            )
        }
    }

    /// Mutable counterpart of [`as_slices`](Self::as_slices).
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (first, second) = self.live_ranges();
        // `second` always lies entirely before `first` when non-empty
        let (low, high) = self.buffer.split_at_mut(first.start);
        // SAFETY: both ranges cover live slots only, and do not overlap
        unsafe {
            (
                assume_init_slice_mut(&mut high[..first.len()]),
                assume_init_slice_mut(&mut low[second]),
            )
        }
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Appends `item` at the tail.
    ///
    /// When the ring is full the full-policy `P` decides:
    /// - [`Discard`](crate::Discard): the ring is untouched and `item` comes
    ///   back as [`Pushed::Discarded`].
    /// - [`Evict`](crate::Evict): the oldest element is removed and returned
    ///   as [`Pushed::Evicted`], then `item` is stored.
    ///
    /// # Example
    ///
    /// ```
    /// use fixring::{Discard, Evict, GeneralRing, Pushed};
    ///
    /// let mut keep: GeneralRing<u8, 3, Discard> = GeneralRing::new();
    /// keep.push_back(1);
    /// keep.push_back(2);
    /// assert_eq!(keep.push_back(3), Pushed::Discarded(3));
    ///
    /// let mut roll: GeneralRing<u8, 3, Evict> = GeneralRing::new();
    /// roll.push_back(1);
    /// roll.push_back(2);
    /// assert_eq!(roll.push_back(3), Pushed::Evicted(1));
    /// assert_eq!(roll.front(), Some(&2));
    /// ```
    #[inline]
    pub fn push_back(&mut self, item: T) -> Pushed<T> {
        let next = W::advance::<N>(self.tail);

        if next != self.head {
            self.write_tail(item, next);
            return Pushed::Stored;
        }

        if !P::EVICTS {
            return Pushed::Discarded(item);
        }

        // SAFETY: full implies non-empty
        let oldest = unsafe { self.take_front() };
        self.write_tail(item, next);
        Pushed::Evicted(oldest)
    }

    /// Appends `item` only if there is a free slot, regardless of policy.
    pub fn try_push_back(&mut self, item: T) -> Result<(), Full<T>> {
        let next = W::advance::<N>(self.tail);
        if next == self.head {
            return Err(Full(item));
        }
        self.write_tail(item, next);
        Ok(())
    }

    /// Removes and returns the oldest element, or `None` if the ring is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: non-empty
        Some(unsafe { self.take_front() })
    }

    /// Drops every live element and resets both cursors to slot 0.
    pub fn clear(&mut self) {
        self.drop_live();
        self.head = 0;
        self.tail = 0;
        self.check_invariants();
    }

    // =========================================================================
    // ITERATION
    // =========================================================================

    /// Iterates over the live elements, oldest to newest.
    ///
    /// The iterator borrows the ring, so the ring cannot be mutated while it
    /// is alive.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, N, W> {
        Iter::new(&self.buffer, self.head, self.len())
    }

    /// Iterates mutably over the live elements, oldest to newest.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (first, second) = self.as_mut_slices();
        IterMut::new(first, second)
    }

    /// Removes all live elements, yielding them oldest to newest.
    ///
    /// Elements not consumed are dropped when the `Drain` is dropped. The ring
    /// is empty afterwards.
    #[inline]
    pub fn drain(&mut self) -> Drain<'_, T, N, W, P> {
        Drain::new(self)
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    /// Raw access to a physical slot.
    ///
    /// # Safety
    ///
    /// `idx` must be a live slot, i.e. inside the logical range `[head, tail)`.
    #[inline]
    pub(crate) unsafe fn slot(&self, idx: usize) -> &T {
        debug_assert_live_slot!(self.logical_offset(idx), self.len());
        self.buffer.get_unchecked(idx).assume_init_ref()
    }

    /// # Safety
    ///
    /// Same as [`slot`](Self::slot).
    #[inline]
    unsafe fn slot_mut(&mut self, idx: usize) -> &mut T {
        debug_assert_live_slot!(self.logical_offset(idx), self.len());
        self.buffer.get_unchecked_mut(idx).assume_init_mut()
    }

    /// Moves the head element out and advances `head`.
    ///
    /// # Safety
    ///
    /// The ring must be non-empty.
    #[inline]
    unsafe fn take_front(&mut self) -> T {
        let idx = self.head;
        debug_assert_live_slot!(0, self.len());
        self.head = W::advance::<N>(idx);
        self.check_invariants();
        self.buffer.get_unchecked(idx).assume_init_read()
    }

    #[inline]
    fn write_tail(&mut self, item: T, next: usize) {
        self.buffer[self.tail].write(item);
        self.tail = next;
        self.check_invariants();
    }

    /// Slot of the newest live element. Only meaningful when non-empty.
    #[inline]
    fn last_slot(&self) -> usize {
        self.tail.checked_sub(1).unwrap_or(N - 1)
    }

    #[inline]
    fn logical_offset(&self, idx: usize) -> usize {
        if idx >= self.head {
            idx - self.head
        } else {
            N + idx - self.head
        }
    }

    fn live_ranges(&self) -> (Range<usize>, Range<usize>) {
        if self.tail >= self.head {
            (self.head..self.tail, 0..0)
        } else {
            (self.head..N, 0..self.tail)
        }
    }

    /// Drops live elements front to back, advancing `head` before each drop
    /// so a panicking destructor cannot cause a double drop.
    fn drop_live(&mut self) {
        while self.head != self.tail {
            let idx = self.head;
            self.head = W::advance::<N>(idx);
            // SAFETY: idx was the head of a non-empty ring
            unsafe { self.buffer[idx].assume_init_drop() };
        }
    }

    #[inline]
    fn check_invariants(&self) {
        debug_assert_index_in_bounds!("head", self.head, N);
        debug_assert_index_in_bounds!("tail", self.tail, N);
        debug_assert_bounded_len!(self.len(), N);
    }
}

// SAFETY helpers: caller guarantees every element of the slice is initialized.
#[inline]
unsafe fn assume_init_slice<T>(slice: &[MaybeUninit<T>]) -> &[T] {
    &*(slice as *const [MaybeUninit<T>] as *const [T])
}

#[inline]
unsafe fn assume_init_slice_mut<T>(slice: &mut [MaybeUninit<T>]) -> &mut [T] {
    &mut *(slice as *mut [MaybeUninit<T>] as *mut [T])
}

// =============================================================================
// TRAIT IMPLS
// =============================================================================

impl<T, const N: usize, W: Wrap, P: FullPolicy> Default for Ring<T, N, W, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize, W: Wrap, P: FullPolicy> Drop for Ring<T, N, W, P> {
    fn drop(&mut self) {
        self.drop_live();
    }
}

impl<T: Clone, const N: usize, W: Wrap, P: FullPolicy> Clone for Ring<T, N, W, P> {
    /// Clones the live elements into the same physical slots.
    fn clone(&self) -> Self {
        let mut out = Self::new();
        out.head = self.head;
        out.tail = self.head;
        for item in self {
            // `out.tail` only advances after a successful write
            let next = W::advance::<N>(out.tail);
            out.write_tail(item.clone(), next);
        }
        out
    }
}

impl<T: fmt::Debug, const N: usize, W: Wrap, P: FullPolicy> fmt::Debug for Ring<T, N, W, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize, W: Wrap, P: FullPolicy> PartialEq for Ring<T, N, W, P> {
    /// Rings compare by their live sequence, not by cursor positions.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const N: usize, W: Wrap, P: FullPolicy> Eq for Ring<T, N, W, P> {}

impl<T, const N: usize, W: Wrap, P: FullPolicy> Extend<T> for Ring<T, N, W, P> {
    /// Pushes each item through [`push_back`](Ring::push_back); displaced
    /// items are dropped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            let _ = self.push_back(item);
        }
    }
}

impl<'a, T, const N: usize, W: Wrap, P: FullPolicy> IntoIterator for &'a Ring<T, N, W, P> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize, W: Wrap, P: FullPolicy> IntoIterator for &'a mut Ring<T, N, W, P> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, const N: usize, W: Wrap, P: FullPolicy> IntoIterator for Ring<T, N, W, P> {
    type Item = T;
    type IntoIter = IntoIter<T, N, W, P>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Discard, Evict};

    #[test]
    fn test_new_ring_is_empty() {
        let ring: GeneralRing<u32, 11, Discard> = GeneralRing::new();
        assert_eq!(ring.capacity(), 10);
        assert_eq!(ring.len(), 0);
        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.front(), None);
        assert_eq!(ring.back(), None);
        assert_eq!(ring.iter().next(), None);
        assert_eq!(ring.cursors(), (0, 0));
    }

    #[test]
    fn test_len_reaches_capacity_before_full_policy() {
        let mut ring: GeneralRing<u32, 5, Discard> = GeneralRing::new();
        for i in 0..4 {
            assert!(!ring.is_full());
            assert_eq!(ring.push_back(i), Pushed::Stored);
        }
        // One push short of wrapping onto head: len must be N - 1, never N or 0
        assert!(ring.is_full());
        assert_eq!(ring.len(), ring.capacity());
        assert_eq!(ring.push_back(99), Pushed::Discarded(99));
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_len_at_capacity_across_wrap() {
        let mut ring: FastRing<u32, 8, Discard> = FastRing::new();
        for round in 0..20 {
            while !ring.is_full() {
                ring.push_back(round);
            }
            assert_eq!(ring.len(), 7);
            ring.pop_front();
            ring.pop_front();
            ring.pop_front();
            assert_eq!(ring.len(), 4);
        }
    }

    #[test]
    fn test_front_back_and_get() {
        let mut ring: GeneralRing<u32, 6, Discard> = GeneralRing::new();
        ring.extend([10, 20, 30]);
        assert_eq!(ring.front(), Some(&10));
        assert_eq!(ring.back(), Some(&30));
        assert_eq!(ring.get(1), Some(&20));
        assert_eq!(ring.get(3), None);

        *ring.front_mut().unwrap() += 1;
        *ring.back_mut().unwrap() += 2;
        *ring.get_mut(1).unwrap() += 3;
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![11, 23, 32]);
    }

    #[test]
    fn test_back_when_tail_wrapped_to_zero() {
        let mut ring: GeneralRing<u32, 4, Discard> = GeneralRing::new();
        ring.extend([1, 2, 3]);
        ring.pop_front();
        ring.push_back(4);
        assert_eq!(ring.cursors(), (1, 0));
        assert_eq!(ring.back(), Some(&4));
        assert_eq!(ring.front(), Some(&2));
    }

    #[test]
    fn test_pop_front_on_empty_is_none() {
        let mut ring: FastRing<u32, 4, Discard> = FastRing::new();
        assert_eq!(ring.pop_front(), None);
        assert_eq!(ring.cursors(), (0, 0));
    }

    #[test]
    fn test_evict_policy_keeps_len_at_capacity() {
        let mut ring: GeneralRing<u32, 4, Evict> = GeneralRing::new();
        ring.extend([1, 2, 3]);
        assert_eq!(ring.push_back(4), Pushed::Evicted(1));
        assert_eq!(ring.push_back(5), Pushed::Evicted(2));
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn test_try_push_back_ignores_policy() {
        let mut ring: GeneralRing<u32, 3, Evict> = GeneralRing::new();
        assert!(ring.try_push_back(1).is_ok());
        assert!(ring.try_push_back(2).is_ok());
        let err = ring.try_push_back(3).unwrap_err();
        assert_eq!(err.into_inner(), 3);
        assert_eq!(ring.front(), Some(&1));
    }

    #[test]
    fn test_clear_resets_cursors() {
        let mut ring: GeneralRing<String, 5, Discard> = GeneralRing::new();
        ring.extend(["a", "b", "c"].map(String::from));
        ring.pop_front();
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.cursors(), (0, 0));
        assert_eq!(ring.capacity(), 4);
        ring.push_back("d".into());
        assert_eq!(ring.front().map(String::as_str), Some("d"));
    }

    #[test]
    fn test_as_slices_split_on_wrap() {
        let mut ring: GeneralRing<u32, 5, Discard> = GeneralRing::new();
        ring.extend([1, 2, 3, 4]);
        ring.pop_front();
        ring.pop_front();
        ring.pop_front();
        ring.extend([5, 6, 7]);
        assert_eq!(ring.cursors(), (3, 2));
        assert_eq!(ring.as_slices(), (&[4, 5][..], &[6, 7][..]));

        let (a, b) = ring.as_mut_slices();
        assert_eq!((a.len(), b.len()), (2, 2));
        a[0] = 40;
        b[1] = 70;
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![40, 5, 6, 70]);
    }

    #[test]
    fn test_as_mut_slices_uneven_split() {
        let mut ring: GeneralRing<u32, 5, Discard> = GeneralRing::new();
        ring.extend([1, 2, 3, 4]);
        ring.pop_front();
        ring.pop_front();
        ring.extend([5, 6]);
        assert_eq!(ring.as_slices(), (&[3, 4, 5][..], &[6][..]));

        let (a, b) = ring.as_mut_slices();
        a[2] = 50;
        b[0] = 60;
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![3, 4, 50, 60]);
    }

    #[test]
    fn test_as_slices_contiguous() {
        let mut ring: FastRing<u32, 8, Discard> = FastRing::new();
        ring.extend([1, 2, 3]);
        assert_eq!(ring.as_slices(), (&[1, 2, 3][..], &[][..]));
    }

    #[test]
    fn test_clone_preserves_layout() {
        let mut ring: GeneralRing<String, 4, Discard> = GeneralRing::new();
        ring.extend(["x", "y", "z"].map(String::from));
        ring.pop_front();
        ring.push_back("w".into());

        let copy = ring.clone();
        assert_eq!(copy.cursors(), ring.cursors());
        assert_eq!(copy, ring);
        assert_eq!(format!("{:?}", copy), r#"["y", "z", "w"]"#);
    }

    #[test]
    fn test_eq_ignores_cursor_positions() {
        let mut a: GeneralRing<u32, 4, Discard> = GeneralRing::new();
        let mut b: GeneralRing<u32, 4, Discard> = GeneralRing::new();
        a.extend([7, 8]);
        b.extend([0, 7, 8]);
        b.pop_front();
        assert_ne!(a.cursors(), b.cursors());
        assert_eq!(a, b);
    }

    #[test]
    fn test_drop_releases_live_elements_once() {
        use std::rc::Rc;

        let marker = Rc::new(());
        {
            let mut ring: GeneralRing<Rc<()>, 4, Evict> = GeneralRing::new();
            for _ in 0..10 {
                ring.push_back(Rc::clone(&marker));
            }
            assert_eq!(Rc::strong_count(&marker), 4);
            ring.pop_front();
            assert_eq!(Rc::strong_count(&marker), 3);
        }
        assert_eq!(Rc::strong_count(&marker), 1);
    }
}
