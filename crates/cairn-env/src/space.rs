//! Discrete observation and action spaces.

use rand::Rng;

/// The finite integer range `[0, n)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Discrete {
    n: u32,
}

impl Discrete {
    /// A space of `n` elements. Enumerations are never empty, so `n >= 1`
    /// for every space an environment exposes.
    pub fn new(n: u32) -> Self {
        Self { n }
    }

    /// Number of elements.
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Whether `x` lies in `[0, n)`.
    pub fn contains(&self, x: u32) -> bool {
        x < self.n
    }

    /// A uniformly random element, or `None` for an empty space.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<u32> {
        if self.n == 0 {
            return None;
        }
        Some(rng.random_range(0..self.n))
    }
}
