//! Randoms - randomized selection helpers
//!
//! Draw uniform and weighted random values, and select a uniformly random
//! element from a sequence whose length may not be known in advance, with or
//! without removing it.
//!
//! # Architecture
//!
//! - **Generators**: shared lock-free LCG, xoshiro256++, and a thread-confined
//!   LCG with no synchronization at all
//! - **Draw facade**: [`Randoms`] adds ranges, chances and probabilities
//! - **Weighted selection**: [`Randoms::get_weighted`] over any weighted map
//! - **Pick**: single-pass reservoir selection with an O(1) path for sized sources
//! - **Pluck**: select-and-remove over any [`RemovableSequence`], using two
//!   cursors when the length is unknown
//! - **Configuration**: TOML-described generator choice and seed
//!
//! # Example
//!
//! ```
//! use randoms::Randoms;
//!
//! let rand = Randoms::thread_local();
//! let mut litter = vec!["rex", "fido", "spot"];
//!
//! let favourite = rand.pick(&litter, &"nobody");
//! assert_ne!(*favourite, "nobody");
//!
//! let adopted = rand.pluck(&mut litter, "nobody").unwrap();
//! assert_eq!(litter.len(), 2);
//! assert!(!litter.contains(&adopted));
//! ```

pub mod config;
pub mod draw;
pub mod error;
pub mod generator;
pub mod select;
pub mod weighted;

// Re-export commonly used types
pub use config::RandomsConfig;
pub use draw::Randoms;
pub use error::{Error, Result};
pub use generator::{Generator, SharedGenerator, ThreadLocalGenerator, XoshiroGenerator};
pub use select::{RemovableSequence, UnknownLength};
pub use weighted::WeightedDistribution;
