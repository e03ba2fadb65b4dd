//! Thread-safe LCG generator
//!
//! The state word lives in an `AtomicU64` and is advanced with a
//! compare-and-swap loop, so any number of threads may draw from one instance
//! concurrently without a lock. Each draw advances the state exactly once.
//!
//! # Example
//!
//! ```
//! use randoms::generator::{Generator, SharedGenerator};
//! use std::sync::Arc;
//!
//! let rng = Arc::new(SharedGenerator::new(42));
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let rng = Arc::clone(&rng);
//!         std::thread::spawn(move || rng.next_int(6).unwrap())
//!     })
//!     .collect();
//! for handle in handles {
//!     assert!(handle.join().unwrap() < 6);
//! }
//! ```

use super::{entropy_seed, lcg, Generator};
use crate::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};

/// Linear congruential generator with lock-free shared state
///
/// Seeding scrambles the seed with the multiplier, so seed 0 is not a degenerate state.
#[derive(Debug)]
pub struct SharedGenerator {
    state: AtomicU64,
}

impl SharedGenerator {
    /// Create a generator with a specific seed
    ///
    /// Useful for reproducible tests.
    pub fn new(seed: u64) -> Self {
        Self {
            state: AtomicU64::new(lcg::scramble(seed)),
        }
    }

    /// Create a generator seeded from entropy
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> u64 {
        self.state.load(Ordering::Acquire)
    }
}

impl Default for SharedGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Generator for SharedGenerator {
    #[inline]
    fn next_bits(&self, bits: u32) -> i32 {
        let prev = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| Some(lcg::step(s)))
            .unwrap_or_else(|s| s);
        lcg::extract(lcg::step(prev), bits)
    }

    fn set_seed(&self, seed: u64) -> Result<()> {
        self.state.store(lcg::scramble(seed), Ordering::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn test_reference_sequence() {
        // Reference stream for the 48-bit LCG with seed 42
        let rng = SharedGenerator::new(42);
        let draws: Vec<i32> = (0..10).map(|_| rng.next_int(10).unwrap()).collect();
        assert_eq!(draws, vec![0, 3, 8, 4, 0, 5, 5, 8, 9, 3]);

        let rng = SharedGenerator::new(42);
        let draws: Vec<i32> = (0..5).map(|_| rng.next_int(16).unwrap()).collect();
        assert_eq!(draws, vec![11, 0, 10, 0, 4]);

        let rng = SharedGenerator::new(42);
        assert_eq!(rng.next_long(), -5_025_562_857_975_149_833);

        let rng = SharedGenerator::new(0);
        let flips: Vec<bool> = (0..5).map(|_| rng.next_boolean()).collect();
        assert_eq!(flips, vec![true, true, false, true, true]);
    }

    #[test]
    fn test_seeded_generators_agree() {
        let a = SharedGenerator::new(12345);
        let b = SharedGenerator::new(12345);
        for _ in 0..10 {
            assert_eq!(a.next_int(1000).unwrap(), b.next_int(1000).unwrap());
        }
    }

    #[test]
    fn test_set_seed_restarts_stream() {
        let rng = SharedGenerator::new(7);
        let first = rng.next_bits(32);
        let _ = rng.next_bits(32);

        rng.set_seed(7).unwrap();
        assert_eq!(rng.next_bits(32), first);
    }

    #[test]
    fn test_concurrent_draws_are_not_lost() {
        const THREADS: usize = 8;
        const DRAWS: usize = 2_000;

        let reference = SharedGenerator::new(99);
        let mut expected: HashMap<i32, usize> = HashMap::new();
        for _ in 0..THREADS * DRAWS {
            *expected.entry(reference.next_bits(32)).or_default() += 1;
        }

        let rng = Arc::new(SharedGenerator::new(99));
        let mut actual: HashMap<i32, usize> = HashMap::new();
        crossbeam::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let rng = Arc::clone(&rng);
                    scope.spawn(move |_| (0..DRAWS).map(|_| rng.next_bits(32)).collect::<Vec<_>>())
                })
                .collect();
            for handle in handles {
                for value in handle.join().unwrap() {
                    *actual.entry(value).or_default() += 1;
                }
            }
        })
        .unwrap();

        assert_eq!(actual, expected);
    }
}
