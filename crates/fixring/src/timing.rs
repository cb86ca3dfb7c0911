//! Average execution time of a repeatedly invoked operation.
//!
//! Ring operations are O(1) and cost the same on every call, so timing a
//! million back-to-back `push_back`s on one instance and dividing gives a
//! meaningful per-call figure.
//!
//! ```
//! use fixring::{timing, FastRing};
//!
//! let mut ring: FastRing<i32, 8> = FastRing::new();
//! let avg = timing::measure_avg_on(1_000, &mut ring, |r| {
//!     let _ = r.push_back(1);
//! });
//! assert!(avg.as_secs() < 1);
//! ```

use std::hint::black_box;
use std::time::{Duration, Instant};

/// Calls `op` `calls` times and returns the mean wall-clock time per call.
///
/// Returns [`Duration::ZERO`] when `calls` is 0.
pub fn measure_avg<F, R>(calls: u32, mut op: F) -> Duration
where
    F: FnMut() -> R,
{
    if calls == 0 {
        return Duration::ZERO;
    }

    let start = Instant::now();
    for _ in 0..calls {
        black_box(op());
    }
    start.elapsed() / calls
}

/// Method form of [`measure_avg`]: calls `op(target)` `calls` times.
pub fn measure_avg_on<S, F, R>(calls: u32, target: &mut S, mut op: F) -> Duration
where
    S: ?Sized,
    F: FnMut(&mut S) -> R,
{
    measure_avg(calls, || op(&mut *target))
}
