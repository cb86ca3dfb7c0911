//! Debug assertion macros for ring buffer invariants.
//!
//! Only active in debug builds (`debug_assert!`), so release builds pay nothing.
//! Used by [`Ring`](crate::Ring) after every mutating call.

// =============================================================================
// INV-IDX: Cursor Bounds
// =============================================================================

/// Assert that a physical cursor stays inside the backing store.
///
/// **Invariant**: `0 ≤ head < N` and `0 ≤ tail < N`
macro_rules! debug_assert_index_in_bounds {
    ($name:literal, $idx:expr, $slots:expr) => {
        debug_assert!(
            $idx < $slots,
            "INV-IDX violated: {} cursor {} outside backing store of {} slots",
            $name,
            $idx,
            $slots
        )
    };
}

// =============================================================================
// INV-LEN: Bounded Length
// =============================================================================

/// Assert that the live element count never reaches the slot count.
///
/// **Invariant**: `len ≤ N - 1` (one slot is always reserved)
macro_rules! debug_assert_bounded_len {
    ($len:expr, $slots:expr) => {
        debug_assert!(
            $len < $slots,
            "INV-LEN violated: length {} does not leave the reserved slot free in {} slots",
            $len,
            $slots
        )
    };
}

// =============================================================================
// INV-LIVE: Initialized Slot Access
// =============================================================================

/// Assert that a logical offset addresses a live (initialized) slot.
///
/// **Invariant**: `slot(head + i) is initialized ⟺ i < len`
macro_rules! debug_assert_live_slot {
    ($offset:expr, $len:expr) => {
        debug_assert!(
            $offset < $len,
            "INV-LIVE violated: reading logical offset {} outside live range [0, {})",
            $offset,
            $len
        )
    };
}

pub(crate) use debug_assert_bounded_len;
pub(crate) use debug_assert_index_in_bounds;
pub(crate) use debug_assert_live_slot;
