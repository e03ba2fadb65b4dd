//! Draw facade
//!
//! [`Randoms`] wraps a [`Generator`] with the helpers callers actually want:
//! bounded integers and floats, ranges, one-in-n chances, probabilities and
//! coin flips. Weighted selection and pick/pluck are implemented on the same
//! type in [`crate::weighted`] and [`crate::select`].
//!
//! # Construction
//!
//! - [`Randoms::with`]: any generator the caller owns
//! - [`Randoms::seeded`] / [`Randoms::new`]: a fresh [`SharedGenerator`]
//! - [`Randoms::shared`]: the process-wide default, created once
//! - [`Randoms::thread_local`]: the calling thread's unsynchronized generator
//!
//! # Example
//!
//! ```
//! use randoms::Randoms;
//!
//! let rand = Randoms::seeded(42);
//! let roll = rand.get_in_range(1, 7).unwrap();
//! assert!((1..7).contains(&roll));
//!
//! // Use the thread-local facade immediately instead of storing it
//! let coin = Randoms::thread_local().get_boolean();
//! # let _ = coin;
//! ```

use crate::error::{Error, Result};
use crate::generator::{Generator, SharedGenerator, ThreadLocalGenerator};
use std::sync::{Arc, OnceLock};

static SHARED_GENERATOR: OnceLock<Arc<SharedGenerator>> = OnceLock::new();

/// Random draws and selections over a generator
#[derive(Debug, Clone, Default)]
pub struct Randoms<G> {
    rng: G,
}

impl<G: Generator> Randoms<G> {
    /// Build a facade over a caller-supplied generator
    pub fn with(rng: G) -> Self {
        Self { rng }
    }

    /// The underlying generator
    pub fn generator(&self) -> &G {
        &self.rng
    }

    /// Consume the facade, returning its generator
    pub fn into_generator(self) -> G {
        self.rng
    }

    /// Uniform integer in `[0, high)`
    pub fn get_int(&self, high: i32) -> Result<i32> {
        self.rng.next_int(high)
    }

    /// Uniform integer in `[low, high)`
    ///
    /// The width is taken in `i64`, so every `low < high` is accepted, up to
    /// `[i32::MIN, i32::MAX)`. Ranges narrower than `i32::MAX` draw exactly as
    /// `low + get_int(high - low)` would.
    pub fn get_in_range(&self, low: i32, high: i32) -> Result<i32> {
        if low >= high {
            return Err(Error::invalid(format!("empty range: [{low}, {high})")));
        }
        let span = i64::from(high) - i64::from(low);
        let value = i64::from(low) + self.rng.next_long_bounded(span)?;
        // low <= value < high, so the narrowing is lossless
        Ok(value as i32)
    }

    /// Uniform float in `[0, high)`
    pub fn get_float(&self, high: f32) -> Result<f32> {
        self.get_float_in_range(0.0, high)
    }

    /// Uniform float in `[low, high)`
    ///
    /// Bounds must be finite with `low < high`. The span is computed in `f64`,
    /// so ranges as wide as `[-f32::MAX, f32::MAX)` are accepted. Results that
    /// would round up to `high` are pulled back to the largest float below it.
    pub fn get_float_in_range(&self, low: f32, high: f32) -> Result<f32> {
        if !(low < high && low.is_finite() && high.is_finite()) {
            return Err(Error::invalid(format!("empty or unbounded range: [{low}, {high})")));
        }
        let (low_wide, high_wide) = (f64::from(low), f64::from(high));
        let value = (low_wide + f64::from(self.rng.next_float()) * (high_wide - low_wide)) as f32;
        Ok(if value < high { value } else { float_below(high) })
    }

    /// True approximately one in `n` times
    pub fn get_chance(&self, n: i32) -> Result<bool> {
        Ok(self.rng.next_int(n)? == 0)
    }

    /// True with probability `p`
    ///
    /// `p` is not range checked: `p <= 0` never succeeds, `p >= 1` always does.
    pub fn get_probability(&self, p: f32) -> bool {
        self.rng.next_float() < p
    }

    /// True or false with even odds
    pub fn get_boolean(&self) -> bool {
        self.rng.next_boolean()
    }
}

impl Randoms<SharedGenerator> {
    /// Facade over a new generator with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::with(SharedGenerator::new(seed))
    }

    /// Facade over a new entropy-seeded generator
    pub fn new() -> Self {
        Self::with(SharedGenerator::from_entropy())
    }
}

impl Randoms<Arc<SharedGenerator>> {
    /// Facade over the process-wide shared generator
    ///
    /// The generator is created on first use and shared by every caller; draws
    /// from different threads are serialized without locking.
    pub fn shared() -> Self {
        let rng = SHARED_GENERATOR.get_or_init(|| {
            tracing::debug!("creating process-wide shared generator");
            Arc::new(SharedGenerator::from_entropy())
        });
        Self::with(Arc::clone(rng))
    }
}

impl Randoms<ThreadLocalGenerator> {
    /// Facade over the calling thread's generator
    ///
    /// Cheaper than [`Randoms::shared`] for hot paths. The facade cannot leave
    /// the thread; prefer calling this at the point of use over storing it.
    pub fn thread_local() -> Self {
        Self::with(ThreadLocalGenerator::current())
    }
}

/// Largest finite `f32` strictly below `x`
fn float_below(x: f32) -> f32 {
    if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f32::from_bits(1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}
