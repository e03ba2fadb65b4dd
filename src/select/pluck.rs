//! Select-and-remove ("pluck")
//!
//! A [`RemovableSequence`] is any structure that can hand out forward cursors
//! over *positions* (owned tokens naming its elements) and remove the element
//! at a position. That is all pluck needs, so it works with sets and maps as
//! well as vectors.
//!
//! # Paths
//!
//! - **Sized**: if the structure reports its length, draw one index in
//!   `[0, len)`, walk a single cursor that far and remove there. For `Vec` and
//!   `VecDeque` positions are indices, so this is O(1) plus the removal.
//! - **Dual cursor**: with the length unknown, the winner's position is only
//!   settled once the walk ends, and the walk cannot remove as it goes. A lead
//!   cursor runs the streaming selection while a lag cursor trails it. Each
//!   time the lead replaces the provisional pick, the lag cursor catches up by
//!   the number of steps taken since the previous replacement, so it always
//!   rests on the provisional pick. When the lead is exhausted, the lag cursor
//!   holds the winner's position and the element is removed there.
//!
//! Both cursors only read the structure; removal happens after both are dropped.

use crate::draw::Randoms;
use crate::error::{Error, Result};
use crate::generator::Generator;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::ops::Range;

/// A sequence supporting forward traversal and removal at a cursor position
pub trait RemovableSequence {
    /// Value handed back by [`remove_at`](RemovableSequence::remove_at)
    type Item;

    /// Owned token naming one element, valid until the structure is mutated
    type Position;

    /// Forward, read-only traversal yielding every position once
    type Cursor<'a>: Iterator<Item = Self::Position>
    where
        Self: 'a;

    /// Open a fresh cursor positioned before the first element
    fn cursor(&self) -> Self::Cursor<'_>;

    /// Exact element count, if the structure tracks it
    fn known_len(&self) -> Option<usize> {
        None
    }

    /// Whether [`remove_at`](RemovableSequence::remove_at) can succeed
    fn supports_removal(&self) -> bool {
        true
    }

    /// Remove and return the element at `position`
    fn remove_at(&mut self, position: Self::Position) -> Result<Self::Item>;
}

impl<G: Generator> Randoms<G> {
    /// Remove and return a uniformly random element of `seq`
    ///
    /// Returns `if_empty` if `seq` is empty. Fails with `UnsupportedOperation`
    /// before drawing anything if `seq` cannot remove elements.
    pub fn pluck<S>(&self, seq: &mut S, if_empty: S::Item) -> Result<S::Item>
    where
        S: RemovableSequence + ?Sized,
    {
        if !seq.supports_removal() {
            return Err(Error::unsupported("pluck from a sequence without removal"));
        }

        let winner = match seq.known_len() {
            Some(0) => return Ok(if_empty),
            Some(len) => {
                let idx = self.generator().next_index(len)?;
                tracing::trace!(len, idx, "pluck: sized fast path");
                seq.cursor().nth(idx)
            }
            None => {
                let mut lead = seq.cursor();
                let mut lag = seq.cursor();
                if lead.next().is_none() {
                    return Ok(if_empty);
                }

                let mut pick = lag.next();
                let mut count = 1usize;
                let mut lag_steps = 0usize;
                for _ in lead {
                    count += 1;
                    lag_steps += 1;
                    if self.reservoir_replaces(count) {
                        pick = lag.nth(lag_steps - 1);
                        lag_steps = 0;
                    }
                }
                tracing::trace!(count, "pluck: dual-cursor walk");
                pick
            }
        };

        let position =
            winner.ok_or_else(|| Error::invalid("sequence ended before the selected position"))?;
        seq.remove_at(position)
    }
}

fn out_of_bounds(position: usize, len: usize) -> Error {
    Error::invalid(format!("position {position} out of bounds for length {len}"))
}

impl<T> RemovableSequence for Vec<T> {
    type Item = T;
    type Position = usize;
    type Cursor<'a> = Range<usize> where Self: 'a;

    fn cursor(&self) -> Range<usize> {
        0..self.len()
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn remove_at(&mut self, position: usize) -> Result<T> {
        if position >= self.len() {
            return Err(out_of_bounds(position, self.len()));
        }
        Ok(self.remove(position))
    }
}

impl<T> RemovableSequence for VecDeque<T> {
    type Item = T;
    type Position = usize;
    type Cursor<'a> = Range<usize> where Self: 'a;

    fn cursor(&self) -> Range<usize> {
        0..self.len()
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn remove_at(&mut self, position: usize) -> Result<T> {
        let len = self.len();
        self.remove(position).ok_or_else(|| out_of_bounds(position, len))
    }
}

impl<T> RemovableSequence for LinkedList<T> {
    type Item = T;
    type Position = usize;
    type Cursor<'a> = Range<usize> where Self: 'a;

    fn cursor(&self) -> Range<usize> {
        0..self.len()
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn remove_at(&mut self, position: usize) -> Result<T> {
        if position >= self.len() {
            return Err(out_of_bounds(position, self.len()));
        }
        let mut tail = self.split_off(position);
        let item = tail.pop_front();
        self.append(&mut tail);
        item.ok_or_else(|| out_of_bounds(position, self.len()))
    }
}

impl<T: Ord + Clone> RemovableSequence for BTreeSet<T> {
    type Item = T;
    type Position = T;
    type Cursor<'a> = std::iter::Cloned<std::collections::btree_set::Iter<'a, T>> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.iter().cloned()
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn remove_at(&mut self, position: T) -> Result<T> {
        self.take(&position)
            .ok_or_else(|| Error::invalid("element no longer in set"))
    }
}

impl<T, S> RemovableSequence for HashSet<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher,
{
    type Item = T;
    type Position = T;
    type Cursor<'a> = std::iter::Cloned<std::collections::hash_set::Iter<'a, T>> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.iter().cloned()
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn remove_at(&mut self, position: T) -> Result<T> {
        self.take(&position)
            .ok_or_else(|| Error::invalid("element no longer in set"))
    }
}

impl<K: Ord + Clone, V> RemovableSequence for BTreeMap<K, V> {
    type Item = (K, V);
    type Position = K;
    type Cursor<'a> = std::iter::Cloned<std::collections::btree_map::Keys<'a, K, V>> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.keys().cloned()
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn remove_at(&mut self, position: K) -> Result<(K, V)> {
        self.remove_entry(&position)
            .ok_or_else(|| Error::invalid("key no longer in map"))
    }
}

impl<K, V, S> RemovableSequence for HashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    type Item = (K, V);
    type Position = K;
    type Cursor<'a> = std::iter::Cloned<std::collections::hash_map::Keys<'a, K, V>> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.keys().cloned()
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn remove_at(&mut self, position: K) -> Result<(K, V)> {
        self.remove_entry(&position)
            .ok_or_else(|| Error::invalid("key no longer in map"))
    }
}

/// Fixed-length slices can be traversed but not shrunk
impl<T> RemovableSequence for [T] {
    type Item = T;
    type Position = usize;
    type Cursor<'a> = Range<usize> where Self: 'a;

    fn cursor(&self) -> Range<usize> {
        0..self.len()
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn supports_removal(&self) -> bool {
        false
    }

    fn remove_at(&mut self, _position: usize) -> Result<T> {
        Err(Error::unsupported("slices cannot remove elements"))
    }
}

/// Adapter that hides a sequence's length
///
/// Forces pluck onto the dual-cursor walk, for structures whose length is
/// expensive to compute or for comparing the two paths.
#[derive(Debug, Clone, Default)]
pub struct UnknownLength<S>(pub S);

impl<S> UnknownLength<S> {
    pub fn new(inner: S) -> Self {
        Self(inner)
    }

    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<S: RemovableSequence> RemovableSequence for UnknownLength<S> {
    type Item = S::Item;
    type Position = S::Position;
    type Cursor<'a> = S::Cursor<'a> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.0.cursor()
    }

    fn supports_removal(&self) -> bool {
        self.0.supports_removal()
    }

    fn remove_at(&mut self, position: S::Position) -> Result<S::Item> {
        self.0.remove_at(position)
    }
}
