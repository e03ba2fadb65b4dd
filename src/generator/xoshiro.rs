//! xoshiro256++ generator
//!
//! Wraps `Xoshiro256PlusPlus` from `rand_xoshiro`, a fast non-cryptographic PRNG
//! with a 256-bit state and better statistical properties than the 48-bit LCG.
//! The state sits behind a mutex so the generator can be shared like
//! [`SharedGenerator`](super::SharedGenerator).

use super::{entropy_seed, Generator};
use crate::error::Result;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::{Mutex, MutexGuard};

/// Shareable xoshiro256++ generator
#[derive(Debug)]
pub struct XoshiroGenerator {
    rng: Mutex<Xoshiro256PlusPlus>,
}

impl XoshiroGenerator {
    /// Create a generator with a specific seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(Xoshiro256PlusPlus::seed_from_u64(seed)),
        }
    }

    /// Create a generator seeded from entropy
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    fn lock(&self) -> MutexGuard<'_, Xoshiro256PlusPlus> {
        // The state is a plain word array, a panic mid-draw cannot corrupt it
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for XoshiroGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Generator for XoshiroGenerator {
    #[inline]
    fn next_bits(&self, bits: u32) -> i32 {
        debug_assert!((1..=32).contains(&bits));
        (self.lock().next_u64() >> (64 - bits)) as u32 as i32
    }

    fn set_seed(&self, seed: u64) -> Result<()> {
        *self.lock() = Xoshiro256PlusPlus::seed_from_u64(seed);
        Ok(())
    }
}
