//! Thread-confined LCG generator
//!
//! [`LocalGenerator`] runs the same 48-bit LCG step as
//! [`SharedGenerator`](super::SharedGenerator) but keeps its state in a plain
//! `Cell`: no atomics, no locks, no contention. Each thread gets its own
//! instance from a `thread_local!` registry the first time it asks for one.
//!
//! # Lifecycle
//!
//! - Created lazily on the first [`ThreadLocalGenerator::current`] call made by
//!   a thread
//! - Seeded once from entropy mixed with a process-wide uniquifier, so no two
//!   threads share a stream
//! - Lives until the thread exits and its thread-local storage is reclaimed
//! - Cannot be reseeded: [`Generator::set_seed`] always fails
//!
//! [`ThreadLocalGenerator`] is an `Rc` handle and therefore `!Send`; the
//! compiler rejects any attempt to move it to another thread.

use super::{entropy_seed, lcg, Generator};
use crate::error::{Error, Result};
use crossbeam::utils::CachePadded;
use std::cell::Cell;
use std::rc::Rc;

thread_local! {
    static LOCAL_GENERATOR: Rc<LocalGenerator> = {
        tracing::debug!(thread = ?std::thread::current().id(), "creating thread-local generator");
        Rc::new(LocalGenerator::new(entropy_seed()))
    };
}

/// Unsynchronized LCG owned by a single thread
///
/// The state is cache-padded so instances belonging to different threads
/// never share a cache line.
#[derive(Debug)]
pub struct LocalGenerator {
    state: CachePadded<Cell<u64>>,
}

impl LocalGenerator {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            state: CachePadded::new(Cell::new(lcg::scramble(seed))),
        }
    }
}

impl Generator for LocalGenerator {
    #[inline(always)]
    fn next_bits(&self, bits: u32) -> i32 {
        let next = lcg::step(self.state.get());
        self.state.set(next);
        lcg::extract(next, bits)
    }

    fn set_seed(&self, _seed: u64) -> Result<()> {
        Err(Error::unsupported("thread-local generators cannot be reseeded"))
    }
}

/// Handle to the calling thread's [`LocalGenerator`]
#[derive(Debug, Clone)]
pub struct ThreadLocalGenerator {
    inner: Rc<LocalGenerator>,
}

impl ThreadLocalGenerator {
    /// Get the calling thread's generator, creating it on first use
    pub fn current() -> Self {
        LOCAL_GENERATOR.with(|generator| Self {
            inner: Rc::clone(generator),
        })
    }

    /// True if both handles refer to the same thread's generator
    pub fn same_generator(&self, other: &ThreadLocalGenerator) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for ThreadLocalGenerator {
    fn default() -> Self {
        Self::current()
    }
}

impl Generator for ThreadLocalGenerator {
    #[inline(always)]
    fn next_bits(&self, bits: u32) -> i32 {
        self.inner.next_bits(bits)
    }

    fn set_seed(&self, seed: u64) -> Result<()> {
        self.inner.set_seed(seed)
    }
}
