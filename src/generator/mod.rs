//! Pseudorandom generators
//!
//! This module defines the [`Generator`] trait, the primitive source of
//! randomness every other part of the crate draws from, and its implementations.
//!
//! # Generators
//!
//! - **SharedGenerator**: 48-bit LCG with lock-free atomic state, safe to share
//!   between threads (the process-wide default)
//! - **XoshiroGenerator**: xoshiro256++ behind a mutex
//! - **LocalGenerator**: the same LCG with unsynchronized state, confined to one
//!   thread and reached through [`ThreadLocalGenerator`]
//!
//! # Thread Safety
//!
//! All methods take `&self`. Shared generators advance their state atomically,
//! so concurrent callers never lose or repeat a step; no ordering between
//! concurrent callers is promised. The thread-local handle is `!Send`, so the
//! compiler keeps it on the thread that created it.
//!
//! # Example
//!
//! ```
//! use randoms::generator::{Generator, SharedGenerator};
//!
//! let rng = SharedGenerator::new(42);
//! let value = rng.next_int(10).unwrap();
//! assert!((0..10).contains(&value));
//! ```

use crate::error::{Error, Result};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

mod lcg;
pub mod local;
pub mod shared;
pub mod xoshiro;

pub use local::{LocalGenerator, ThreadLocalGenerator};
pub use shared::SharedGenerator;
pub use xoshiro::XoshiroGenerator;

/// Scale for turning 24 random bits into an `f32` in `[0, 1)`
const FLOAT_UNIT: f32 = 1.0 / (1u32 << 24) as f32;

/// Scale for turning 53 random bits into an `f64` in `[0, 1)`
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// Source of pseudorandom bits
///
/// Implementors supply [`next_bits`](Generator::next_bits) and
/// [`set_seed`](Generator::set_seed); every other draw is derived from
/// `next_bits` by the provided methods, which reject invalid arguments before
/// consuming any bits.
pub trait Generator {
    /// Draw `bits` random bits (1..=32), advancing the state exactly once
    ///
    /// The bits occupy the low end of the result; a 32-bit draw uses the sign bit.
    fn next_bits(&self, bits: u32) -> i32;

    /// Replace the generator state with one derived from `seed`
    fn set_seed(&self, seed: u64) -> Result<()>;

    /// Uniform integer in `[0, bound)`
    ///
    /// Power-of-two bounds take the high bits of a single draw. Other bounds
    /// reject draws from the incomplete top bucket so every value is equally
    /// likely.
    fn next_int(&self, bound: i32) -> Result<i32> {
        if bound <= 0 {
            return Err(Error::invalid(format!("bound must be positive: {bound}")));
        }

        if bound & bound.wrapping_neg() == bound {
            let bits = i64::from(self.next_bits(31));
            return Ok(((i64::from(bound) * bits) >> 31) as i32);
        }

        loop {
            let bits = self.next_bits(31);
            let val = bits % bound;
            if bits.wrapping_sub(val).wrapping_add(bound - 1) >= 0 {
                return Ok(val);
            }
        }
    }

    /// Uniform 64-bit integer over the whole `i64` range
    fn next_long(&self) -> i64 {
        let high = i64::from(self.next_bits(32));
        let low = i64::from(self.next_bits(32));
        (high << 32).wrapping_add(low)
    }

    /// Uniform integer in `[0, bound)` for bounds wider than `i32`
    ///
    /// Halves the bound until it fits [`next_int`](Generator::next_int), using
    /// two bits per halving to pick the half and whether to keep the high offset.
    fn next_long_bounded(&self, bound: i64) -> Result<i64> {
        if bound <= 0 {
            return Err(Error::invalid(format!("bound must be positive: {bound}")));
        }

        let mut n = bound;
        let mut offset = 0i64;
        while n >= i64::from(i32::MAX) {
            let bits = self.next_bits(2);
            let half = n >> 1;
            let next_n = if bits & 2 == 0 { half } else { n - half };
            if bits & 1 == 0 {
                offset += n - next_n;
            }
            n = next_n;
        }
        Ok(offset + i64::from(self.next_int(n as i32)?))
    }

    /// Uniform integer in `[least, bound)`
    fn next_long_in_range(&self, least: i64, bound: i64) -> Result<i64> {
        if least >= bound {
            return Err(Error::invalid(format!("empty range: [{least}, {bound})")));
        }
        let span = bound
            .checked_sub(least)
            .ok_or_else(|| Error::invalid(format!("range too wide: [{least}, {bound})")))?;
        Ok(least + self.next_long_bounded(span)?)
    }

    /// Uniform index in `[0, bound)` for container lengths
    fn next_index(&self, bound: usize) -> Result<usize> {
        if bound == 0 {
            return Err(Error::invalid("bound must be positive: 0"));
        }
        match i32::try_from(bound) {
            Ok(small) => Ok(self.next_int(small)? as usize),
            Err(_) => {
                let wide = i64::try_from(bound)
                    .map_err(|_| Error::invalid(format!("bound too large: {bound}")))?;
                Ok(self.next_long_bounded(wide)? as usize)
            }
        }
    }

    /// Uniform `f32` in `[0, 1)` with 24 bits of precision
    fn next_float(&self) -> f32 {
        self.next_bits(24) as f32 * FLOAT_UNIT
    }

    /// Uniform `f64` in `[0, 1)` with 53 bits of precision
    fn next_double(&self) -> f64 {
        let high = i64::from(self.next_bits(26)) << 27;
        let low = i64::from(self.next_bits(27));
        (high + low) as f64 * DOUBLE_UNIT
    }

    /// Uniform `f64` in `[0, bound)`
    fn next_double_bounded(&self, bound: f64) -> Result<f64> {
        if !(bound > 0.0 && bound.is_finite()) {
            return Err(Error::invalid(format!("bound must be positive and finite: {bound}")));
        }
        Ok(self.next_double() * bound)
    }

    /// Uniform `f64` in `[least, bound)`
    fn next_double_in_range(&self, least: f64, bound: f64) -> Result<f64> {
        if !(least < bound && (bound - least).is_finite()) {
            return Err(Error::invalid(format!("empty or unbounded range: [{least}, {bound})")));
        }
        Ok(self.next_double() * (bound - least) + least)
    }

    /// Fair coin flip
    fn next_boolean(&self) -> bool {
        self.next_bits(1) != 0
    }
}

macro_rules! forward_generator {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<G: Generator + ?Sized> Generator for $ptr {
                #[inline]
                fn next_bits(&self, bits: u32) -> i32 {
                    (**self).next_bits(bits)
                }

                fn set_seed(&self, seed: u64) -> Result<()> {
                    (**self).set_seed(seed)
                }
            }
        )*
    };
}

forward_generator!(&G, Box<G>, Arc<G>, Rc<G>);

/// Process-wide counter that keeps entropy seeds distinct between generators
static SEED_UNIQUIFIER: AtomicU64 = AtomicU64::new(8_682_522_807_148_012);

/// Fresh seed for generators constructed without one
///
/// OS entropy mixed with a process-wide uniquifier, so two generators created
/// at the same instant (for example on two threads) still diverge.
pub(crate) fn entropy_seed() -> u64 {
    const STRIDE: u64 = 1_181_783_497_276_652_981;
    let prev = SEED_UNIQUIFIER
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |u| {
            Some(u.wrapping_mul(STRIDE))
        })
        .unwrap_or_else(|u| u);
    prev.wrapping_mul(STRIDE) ^ rand::random::<u64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_int_rejects_non_positive_bound() {
        let rng = SharedGenerator::new(1);
        let before = rng.state();

        assert!(matches!(rng.next_int(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(rng.next_int(-5), Err(Error::InvalidArgument(_))));
        assert_eq!(rng.state(), before, "rejected call must not advance state");
    }

    #[test]
    fn test_next_int_range() {
        let rng = SharedGenerator::new(7);
        for bound in [1, 2, 3, 10, 16, 1000, i32::MAX] {
            for _ in 0..200 {
                let v = rng.next_int(bound).unwrap();
                assert!((0..bound).contains(&v), "{v} outside [0, {bound})");
            }
        }
    }

    #[test]
    fn test_next_int_uniformity() {
        let rng = SharedGenerator::new(42);
        let n = 10;
        let mut buckets = vec![0u32; n as usize];

        for _ in 0..100_000 {
            buckets[rng.next_int(n).unwrap() as usize] += 1;
        }

        // 10000 expected per bucket, allow 5% deviation
        for count in buckets {
            assert!(count > 9500 && count < 10500, "Bucket count {} outside expected range", count);
        }
    }

    #[test]
    fn test_next_long_bounded_wide() {
        let rng = SharedGenerator::new(3);
        let bound = i64::MAX / 3;
        for _ in 0..500 {
            let v = rng.next_long_bounded(bound).unwrap();
            assert!((0..bound).contains(&v));
        }
        assert!(rng.next_long_bounded(0).is_err());
    }

    #[test]
    fn test_next_long_in_range() {
        let rng = SharedGenerator::new(11);
        for _ in 0..500 {
            let v = rng.next_long_in_range(-50, 50).unwrap();
            assert!((-50..50).contains(&v));
        }
        assert!(rng.next_long_in_range(5, 5).is_err());
        assert!(rng.next_long_in_range(i64::MIN, i64::MAX).is_err());
    }

    #[test]
    fn test_next_index() {
        let rng = SharedGenerator::new(5);
        for _ in 0..100 {
            assert!(rng.next_index(3).unwrap() < 3);
        }
        assert_eq!(rng.next_index(1).unwrap(), 0);
        assert!(rng.next_index(0).is_err());
    }

    #[test]
    fn test_float_and_double_unit_interval() {
        let rng = SharedGenerator::new(9);
        for _ in 0..10_000 {
            let f = rng.next_float();
            assert!((0.0..1.0).contains(&f));
            let d = rng.next_double();
            assert!((0.0..1.0).contains(&d));
        }
    }

    #[test]
    fn test_double_ranges() {
        let rng = SharedGenerator::new(9);
        for _ in 0..1000 {
            let d = rng.next_double_bounded(2.5).unwrap();
            assert!((0.0..2.5).contains(&d));
            let d = rng.next_double_in_range(-1.0, 1.0).unwrap();
            assert!((-1.0..1.0).contains(&d));
        }
        assert!(rng.next_double_bounded(0.0).is_err());
        assert!(rng.next_double_bounded(f64::NAN).is_err());
        assert!(rng.next_double_in_range(1.0, 1.0).is_err());
        assert!(rng.next_double_in_range(f64::MIN, f64::MAX).is_err());
    }

    #[test]
    fn test_boolean_balance() {
        let rng = SharedGenerator::new(21);
        let heads = (0..10_000).filter(|_| rng.next_boolean()).count();
        assert!(heads > 4700 && heads < 5300, "heads = {}", heads);
    }

    #[test]
    fn test_forwarding_through_pointers() {
        let boxed: Box<dyn Generator + Send + Sync> = Box::new(SharedGenerator::new(42));
        let direct = SharedGenerator::new(42);
        let shared = Arc::new(SharedGenerator::new(42));

        for _ in 0..10 {
            let expected = direct.next_int(100).unwrap();
            assert_eq!(boxed.next_int(100).unwrap(), expected);
            assert_eq!(shared.next_int(100).unwrap(), expected);
        }
    }

    #[test]
    fn test_entropy_seeds_differ() {
        let a = entropy_seed();
        let b = entropy_seed();
        assert_ne!(a, b);
    }
}
