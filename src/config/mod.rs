//! Configuration module
//!
//! Describes which generator a [`Randoms`] facade should be built on, loaded
//! from TOML. Every field is optional:
//!
//! ```toml
//! generator = "xoshiro"   # "lcg" (default) or "xoshiro"
//! seed = 42               # omit for an entropy seed
//! ```
//!
//! The thread-local generator is not configurable here: it is confined to the
//! thread that creates it, while configured facades may be shared.

pub mod toml;

use crate::draw::Randoms;
use crate::generator::{Generator, SharedGenerator, XoshiroGenerator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boxed generator usable from any thread
pub type DynGenerator = Box<dyn Generator + Send + Sync>;

/// Generator algorithm
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// 48-bit LCG with lock-free shared state
    #[default]
    Lcg,
    /// xoshiro256++ behind a mutex
    Xoshiro,
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorKind::Lcg => write!(f, "lcg"),
            GeneratorKind::Xoshiro => write!(f, "xoshiro"),
        }
    }
}

/// Generator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RandomsConfig {
    /// Generator algorithm
    #[serde(default)]
    pub generator: GeneratorKind,
    /// Fixed seed for reproducible streams; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RandomsConfig {
    /// Build the configured generator
    pub fn build_generator(&self) -> DynGenerator {
        tracing::debug!(generator = %self.generator, seeded = self.seed.is_some(), "building generator from config");
        match (self.generator, self.seed) {
            (GeneratorKind::Lcg, Some(seed)) => Box::new(SharedGenerator::new(seed)),
            (GeneratorKind::Lcg, None) => Box::new(SharedGenerator::from_entropy()),
            (GeneratorKind::Xoshiro, Some(seed)) => Box::new(XoshiroGenerator::new(seed)),
            (GeneratorKind::Xoshiro, None) => Box::new(XoshiroGenerator::from_entropy()),
        }
    }
}

impl Randoms<DynGenerator> {
    /// Facade over the generator described by `config`
    pub fn from_config(config: &RandomsConfig) -> Self {
        Self::with(config.build_generator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RandomsConfig::default();
        assert_eq!(config.generator, GeneratorKind::Lcg);
        assert_eq!(config.seed, None);

        let rand = Randoms::from_config(&config);
        assert!((0..10).contains(&rand.get_int(10).unwrap()));
    }

    #[test]
    fn test_seeded_lcg_matches_direct_construction() {
        let config = RandomsConfig {
            generator: GeneratorKind::Lcg,
            seed: Some(42),
        };
        let configured = Randoms::from_config(&config);
        let direct = Randoms::seeded(42);

        for _ in 0..10 {
            assert_eq!(configured.get_int(100).unwrap(), direct.get_int(100).unwrap());
        }
    }

    #[test]
    fn test_seeded_xoshiro_reproducible() {
        let config = RandomsConfig {
            generator: GeneratorKind::Xoshiro,
            seed: Some(9),
        };
        let a = Randoms::from_config(&config);
        let b = Randoms::with(XoshiroGenerator::new(9));

        for _ in 0..10 {
            assert_eq!(a.get_int(1000).unwrap(), b.get_int(1000).unwrap());
        }
    }

    #[test]
    fn test_configured_facade_is_shareable() {
        let rand = std::sync::Arc::new(Randoms::from_config(&RandomsConfig::default()));
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let rand = std::sync::Arc::clone(&rand);
                std::thread::spawn(move || rand.get_boolean())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
