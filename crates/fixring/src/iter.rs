//! Iterators over a [`Ring`].
//!
//! - [`Iter`]: shared borrow, walks slots from head following the ring's wrap rule
//! - [`IterMut`]: exclusive borrow over the two live slices
//! - [`IntoIter`]: consumes the ring
//! - [`Drain`]: empties the ring in place

use crate::invariants::debug_assert_index_in_bounds;
use crate::policy::FullPolicy;
use crate::ring::Ring;
use crate::wrap::Wrap;

use std::iter::{Chain, FusedIterator};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::slice;

// =============================================================================
// ITER
// =============================================================================

/// Borrowing iterator over the live elements, oldest to newest.
///
/// Holds a cursor into the backing store and advances it with the ring's own
/// wrap strategy. Because it borrows the ring, the ring cannot be mutated
/// until the iterator is dropped.
pub struct Iter<'a, T, const N: usize, W: Wrap> {
    buffer: &'a [MaybeUninit<T>; N],
    /// Physical slot of the next element from the front
    pos: usize,
    /// Live elements not yet yielded from either end
    remaining: usize,
    _strategy: PhantomData<fn() -> W>,
}

impl<'a, T, const N: usize, W: Wrap> Iter<'a, T, N, W> {
    /// `head` and `len` must describe the live range of `buffer`.
    pub(crate) fn new(buffer: &'a [MaybeUninit<T>; N], head: usize, len: usize) -> Self {
        Self {
            buffer,
            pos: head,
            remaining: len,
            _strategy: PhantomData,
        }
    }

    #[inline]
    fn read(&self, idx: usize) -> &'a T {
        debug_assert_index_in_bounds!("iter", idx, N);
        // SAFETY: idx is within the live range captured at construction, and
        // the shared borrow keeps the ring from mutating.
        unsafe { self.buffer[idx].assume_init_ref() }
    }
}

impl<'a, T, const N: usize, W: Wrap> Iterator for Iter<'a, T, N, W> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.read(self.pos);
        self.pos = W::advance::<N>(self.pos);
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const N: usize, W: Wrap> DoubleEndedIterator for Iter<'_, T, N, W> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.read(W::offset::<N>(self.pos, self.remaining)))
    }
}

impl<T, const N: usize, W: Wrap> ExactSizeIterator for Iter<'_, T, N, W> {}

impl<T, const N: usize, W: Wrap> FusedIterator for Iter<'_, T, N, W> {}

impl<T, const N: usize, W: Wrap> Clone for Iter<'_, T, N, W> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer,
            pos: self.pos,
            remaining: self.remaining,
            _strategy: PhantomData,
        }
    }
}

// =============================================================================
// ITER MUT
// =============================================================================

/// Mutable iterator over the live elements, oldest to newest.
pub struct IterMut<'a, T> {
    inner: Chain<slice::IterMut<'a, T>, slice::IterMut<'a, T>>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(first: &'a mut [T], second: &'a mut [T]) -> Self {
        Self {
            inner: first.iter_mut().chain(second.iter_mut()),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

// =============================================================================
// INTO ITER
// =============================================================================

/// Owning iterator returned by `Ring::into_iter`.
pub struct IntoIter<T, const N: usize, W: Wrap, P: FullPolicy> {
    ring: Ring<T, N, W, P>,
}

impl<T, const N: usize, W: Wrap, P: FullPolicy> IntoIter<T, N, W, P> {
    pub(crate) fn new(ring: Ring<T, N, W, P>) -> Self {
        Self { ring }
    }
}

impl<T, const N: usize, W: Wrap, P: FullPolicy> Iterator for IntoIter<T, N, W, P> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.ring.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.ring.len();
        (len, Some(len))
    }
}

impl<T, const N: usize, W: Wrap, P: FullPolicy> ExactSizeIterator for IntoIter<T, N, W, P> {}

impl<T, const N: usize, W: Wrap, P: FullPolicy> FusedIterator for IntoIter<T, N, W, P> {}

// =============================================================================
// DRAIN
// =============================================================================

/// Draining iterator returned by [`Ring::drain`].
///
/// Pops one element per step, so the ring stays consistent even if the
/// `Drain` is leaked; whatever is left is dropped when the `Drain` is.
pub struct Drain<'a, T, const N: usize, W: Wrap, P: FullPolicy> {
    ring: &'a mut Ring<T, N, W, P>,
}

impl<'a, T, const N: usize, W: Wrap, P: FullPolicy> Drain<'a, T, N, W, P> {
    pub(crate) fn new(ring: &'a mut Ring<T, N, W, P>) -> Self {
        Self { ring }
    }
}

impl<T, const N: usize, W: Wrap, P: FullPolicy> Iterator for Drain<'_, T, N, W, P> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.ring.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.ring.len();
        (len, Some(len))
    }
}

impl<T, const N: usize, W: Wrap, P: FullPolicy> ExactSizeIterator for Drain<'_, T, N, W, P> {}

impl<T, const N: usize, W: Wrap, P: FullPolicy> FusedIterator for Drain<'_, T, N, W, P> {}

impl<T, const N: usize, W: Wrap, P: FullPolicy> Drop for Drain<'_, T, N, W, P> {
    fn drop(&mut self) {
        self.ring.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Discard, FastRing, GeneralRing};

    #[test]
    fn test_iter_empty() {
        let ring: GeneralRing<u32, 11, Discard> = GeneralRing::new();
        assert_eq!(ring.iter().len(), 0);
        assert_eq!(ring.iter().next(), None);
    }

    #[test]
    fn test_iter_wraps_in_insertion_order() {
        let mut ring: FastRing<u32, 4, Discard> = FastRing::new();
        ring.extend([1, 2, 3]);
        ring.pop_front();
        ring.pop_front();
        ring.extend([4, 5]);
        assert_eq!(ring.cursors(), (2, 1));

        let mut it = ring.iter();
        assert_eq!(it.len(), 3);
        assert_eq!(it.next(), Some(&3));
        assert_eq!(it.len(), 2);
        assert_eq!(it.clone().collect::<Vec<_>>(), vec![&4, &5]);
        assert_eq!(it.next_back(), Some(&5));
        assert_eq!(it.next(), Some(&4));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn test_iter_rev() {
        let mut ring: GeneralRing<u32, 5, Discard> = GeneralRing::new();
        ring.extend([1, 2, 3, 4]);
        ring.pop_front();
        ring.push_back(5);
        assert_eq!(ring.iter().rev().copied().collect::<Vec<_>>(), vec![5, 4, 3, 2]);
    }

    #[test]
    fn test_iter_mut_updates_in_place() {
        let mut ring: GeneralRing<u32, 5, Discard> = GeneralRing::new();
        ring.extend([1, 2, 3, 4]);
        ring.pop_front();
        ring.push_back(5);
        for v in &mut ring {
            *v *= 10;
        }
        assert_eq!(ring.iter_mut().len(), 4);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![20, 30, 40, 50]);
    }

    #[test]
    fn test_into_iter_yields_owned() {
        let mut ring: GeneralRing<String, 4, Discard> = GeneralRing::new();
        ring.extend(["a", "b", "c"].map(String::from));
        let items: Vec<String> = ring.into_iter().collect();
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_drain_partial_empties_ring() {
        let mut ring: GeneralRing<String, 6, Discard> = GeneralRing::new();
        ring.extend(["a", "b", "c", "d"].map(String::from));
        {
            let mut drain = ring.drain();
            assert_eq!(drain.len(), 4);
            assert_eq!(drain.next().as_deref(), Some("a"));
        }
        assert!(ring.is_empty());
        assert_eq!(ring.cursors(), (0, 0));
    }
}
