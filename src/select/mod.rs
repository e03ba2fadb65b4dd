//! Uniform selection from sequences
//!
//! # Pick
//!
//! [`Randoms::pick`] returns a uniformly random element of any iterable. When
//! the iterator reports an exact length it draws one index and jumps straight
//! to it. Otherwise it makes a single pass with a one-slot reservoir: the
//! first element is the provisional pick, and the i-th element (i >= 2)
//! replaces it when a draw in `[0, i)` comes up 0. After `i` elements every one
//! of them has been the pick with probability `1/i`, so the survivor is uniform
//! over the whole sequence without knowing its length or buffering it.
//!
//! # Pluck
//!
//! [`Randoms::pluck`] selects the same way and also removes the winner from a
//! [`RemovableSequence`]. See [`pluck`] for the two-cursor walk used when the
//! length is unknown.
//!
//! # Example
//!
//! ```
//! use randoms::Randoms;
//!
//! let rand = Randoms::seeded(1);
//! let names = ["x", "y", "z"];
//!
//! // Exact-size source: one index draw
//! let picked = rand.pick(names, "none");
//! assert!(names.contains(&picked));
//!
//! // Filtered source has no exact length: single-pass walk
//! let long = rand.pick(names.iter().filter(|n| **n != "y"), &"none");
//! assert!(*long == "x" || *long == "z");
//!
//! // Empty source yields the default
//! assert_eq!(rand.pick(Vec::<&str>::new(), "none"), "none");
//! ```

use crate::draw::Randoms;
use crate::generator::Generator;

pub mod pluck;

pub use pluck::{RemovableSequence, UnknownLength};

impl<G: Generator> Randoms<G> {
    /// Uniformly random element of `source`, or `if_empty` if it has none
    ///
    /// Uses a single index draw when `size_hint` is exact, otherwise the
    /// streaming walk of [`pick_streaming`](Randoms::pick_streaming). An
    /// iterator whose exact `size_hint` overstates its length falls back to
    /// `if_empty` when the drawn index is past its end.
    pub fn pick<I>(&self, source: I, if_empty: I::Item) -> I::Item
    where
        I: IntoIterator,
    {
        let mut iter = source.into_iter();
        let (lower, upper) = iter.size_hint();
        if upper != Some(lower) {
            return self.pick_streaming(iter, if_empty);
        }

        if lower == 0 {
            return if_empty;
        }
        match self.generator().next_index(lower) {
            Ok(idx) => {
                tracing::trace!(len = lower, idx, "pick: sized fast path");
                iter.nth(idx).unwrap_or(if_empty)
            }
            Err(_) => self.pick_streaming(iter, if_empty),
        }
    }

    /// Uniformly random element of `source` using a single forward pass
    ///
    /// Never consults `size_hint`. Draws once per element after the first.
    pub fn pick_streaming<I>(&self, source: I, if_empty: I::Item) -> I::Item
    where
        I: IntoIterator,
    {
        let mut iter = source.into_iter();
        let Some(mut pick) = iter.next() else {
            return if_empty;
        };

        let mut count = 1usize;
        for next in iter {
            count += 1;
            if self.reservoir_replaces(count) {
                pick = next;
            }
        }
        tracing::trace!(count, "pick: streaming walk");
        pick
    }

    /// Whether the `count`-th element seen replaces the current pick
    ///
    /// Shared by the streaming pick and the dual-cursor pluck so both walks
    /// consume the generator identically. `count` is at least 2 and at most
    /// the number of elements walked, which stays far below `i64::MAX`, so
    /// `next_index` cannot reject it.
    pub(crate) fn reservoir_replaces(&self, count: usize) -> bool {
        debug_assert!(count >= 2);
        matches!(self.generator().next_index(count), Ok(0))
    }
}
