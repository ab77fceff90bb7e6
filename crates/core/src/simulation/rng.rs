//! Deterministic simulation RNG
//!
//! Wraps `ChaCha8Rng` so identical seeds replay identical runs on every platform.
//! Each [`crate::Simulation`] owns its own generator; nothing reads a thread-local or
//! global source.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable random source for all simulation draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimRng(pub ChaCha8Rng);

impl SimRng {
    /// Create a new `SimRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RngCore for SimRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.0.fill_bytes(dst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SimRng::from_seed_u64(9);
        let mut b = SimRng::from_seed_u64(9);
        for _ in 0..16 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = SimRng::from_seed_u64(1);
        let mut b = SimRng::from_seed_u64(2);
        let xs: Vec<u64> = (0..4).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..4).map(|_| b.random()).collect();
        assert_ne!(xs, ys);
    }
}
