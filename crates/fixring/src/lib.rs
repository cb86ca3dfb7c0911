//! fixring - Fixed-Capacity Inline Ring Buffers
//!
//! A bounded FIFO over `N` slots embedded in the struct. Storage is allocated
//! once, with the ring itself, and never grows; push at the tail and pop at
//! the head are O(1).
//!
//! # Key Features
//!
//! - No heap allocation, no `T: Default` requirement
//! - One reserved slot: `head == tail` is empty, `next(tail) == head` is full
//! - Type-level wrap strategy: [`GeneralRing`] (any `N ≥ 2`) or [`FastRing`]
//!   (power-of-two `N`, bitmask wrapping)
//! - Type-level full-policy: [`Discard`] the incoming item or [`Evict`] the
//!   oldest; the default is chosen at build time (`evict-oldest` feature)
//! - Checked access: `front`/`back`/`pop_front` return `Option`
//! - Invalid `N` is a compile error
//!
//! # Example
//!
//! ```
//! use fixring::{Discard, GeneralRing, Pushed};
//!
//! let mut ring: GeneralRing<i32, 11, Discard> = GeneralRing::new();
//! assert_eq!(ring.capacity(), 10);
//!
//! for i in 1..=10 {
//!     ring.push_back(i);
//! }
//! // Full: the new item is handed back and nothing changes
//! assert_eq!(ring.push_back(11), Pushed::Discarded(11));
//!
//! assert_eq!(ring.pop_front(), Some(1));
//! assert_eq!(ring.front(), Some(&2));
//! assert_eq!(ring.back(), Some(&10));
//!
//! let live: Vec<_> = ring.iter().copied().collect();
//! assert_eq!(live, (2..=10).collect::<Vec<_>>());
//! ```
//!
//! # Thread Safety
//!
//! Rings are plain single-owner values: every mutation takes `&mut self`, so
//! sharing one across threads needs an external lock such as `Mutex`.

mod error;
mod invariants;
mod iter;
mod policy;
mod ring;
pub mod timing;
mod wrap;

pub use error::Full;
pub use iter::{Drain, IntoIter, Iter, IterMut};
pub use policy::{DefaultPolicy, Discard, Evict, FullPolicy, Pushed};
pub use ring::{FastRing, GeneralRing, Ring};
pub use wrap::{Mask, Modulo, Wrap};
