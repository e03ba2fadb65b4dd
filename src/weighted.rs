//! Weighted selection
//!
//! Picks one key from a finite distribution with probability proportional to
//! its weight. The sum `S` of all weights is computed first, a single index is
//! drawn uniformly in `[0, S)`, and the entries are walked in order subtracting
//! each weight until the index goes negative. Key `k` is therefore returned
//! with probability exactly `weight(k) / S`; zero-weight keys never win.
//!
//! Entry order is whatever the source iterates in. It only decides which key
//! owns which slice of `[0, S)`, not the odds.
//!
//! # Example
//!
//! ```
//! use randoms::{Randoms, WeightedDistribution};
//!
//! let loot: WeightedDistribution<&str> = [("common", 90), ("rare", 9), ("epic", 1)]
//!     .into_iter()
//!     .collect();
//!
//! let rand = Randoms::seeded(7);
//! let item = rand.get_weighted(&loot).unwrap();
//! assert!(["common", "rare", "epic"].contains(item));
//! ```

use crate::draw::Randoms;
use crate::error::{Error, Result};
use crate::generator::Generator;

/// Insertion-ordered mapping from keys to integer weights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedDistribution<K> {
    entries: Vec<(K, u32)>,
}

impl<K> WeightedDistribution<K> {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Set the weight of `key`, returning its previous weight
    ///
    /// Existing keys keep their position; new keys go to the end.
    pub fn insert(&mut self, key: K, weight: u32) -> Option<u32>
    where
        K: PartialEq,
    {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, w)) => Some(std::mem::replace(w, weight)),
            None => {
                self.entries.push((key, weight));
                None
            }
        }
    }

    /// Weight of `key`, if present
    pub fn weight(&self, key: &K) -> Option<u32>
    where
        K: PartialEq,
    {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, w)| *w)
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|(_, w)| u64::from(*w)).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

impl<K> Default for WeightedDistribution<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq> FromIterator<(K, u32)> for WeightedDistribution<K> {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        let mut dist = Self::new();
        for (key, weight) in iter {
            dist.insert(key, weight);
        }
        dist
    }
}

/// Borrowing iterator over a [`WeightedDistribution`]
#[derive(Debug)]
pub struct Iter<'a, K> {
    inner: std::slice::Iter<'a, (K, u32)>,
}

// Manual impl: cloning the iterator must not require `K: Clone`
impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, &'a u32);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, w)| (k, w))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K> IntoIterator for &'a WeightedDistribution<K> {
    type Item = (&'a K, &'a u32);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<G: Generator> Randoms<G> {
    /// Draw a key with probability proportional to its weight
    ///
    /// Accepts anything that iterates `(&key, &weight)` pairs and can be walked
    /// twice: a [`WeightedDistribution`], `&BTreeMap<K, u32>` or
    /// `&HashMap<K, u32>`. Fails with `InvalidArgument` if the weights sum to
    /// zero, without touching the generator.
    pub fn get_weighted<'a, K, D>(&self, distribution: D) -> Result<&'a K>
    where
        K: 'a,
        D: IntoIterator<Item = (&'a K, &'a u32)>,
        D::IntoIter: Clone,
    {
        let entries = distribution.into_iter();
        let total: u64 = entries.clone().map(|(_, w)| u64::from(*w)).sum();
        if total == 0 {
            return Err(Error::invalid("sum of weights must be positive"));
        }
        let total = i64::try_from(total)
            .map_err(|_| Error::invalid(format!("sum of weights too large: {total}")))?;

        let mut idx = self.generator().next_long_bounded(total)?;
        for (key, weight) in entries {
            idx -= i64::from(*weight);
            if idx < 0 {
                return Ok(key);
            }
        }
        Err(Error::invalid("distribution changed between passes"))
    }
}
