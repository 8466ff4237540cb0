// src/rng.rs
//! Random Number Generation for Monte Carlo Simulations
//!
//! # Design
//!
//! Every Monte Carlo path owns its own random stream:
//! 1. **Reproducibility**: Same seed → same results
//! 2. **Parallel safety**: Paths never share a generator, so draw order cannot
//!    depend on how paths are scheduled across threads
//! 3. **Statistical quality**: Streams are seeded from a splitmix64 mix of
//!    `(base_seed, path_id)` so neighbouring path ids get unrelated seeds
//!
//! There is no global or static random state in this crate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Splitmix64 finaliser
///
/// ```text
/// z = (z ⊕ (z >> 30)) * 0xbf58476d1ce4e5b9
/// z = (z ⊕ (z >> 27)) * 0x94d049bb133111eb
/// output = z ⊕ (z >> 31)
/// ```
pub fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// RNG factory for reproducible parallel simulations
#[derive(Debug, Clone, Copy)]
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Seed of the stream owned by `path_id`
    pub fn path_seed(&self, path_id: u64) -> u64 {
        splitmix64(splitmix64(self.base_seed) ^ path_id)
    }

    /// Create the independent generator for a specific path
    pub fn path_rng(&self, path_id: u64) -> StdRng {
        StdRng::seed_from_u64(self.path_seed(path_id))
    }
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_rng_reproducibility() {
        let factory = RngFactory::new(42);

        let mut rng1 = factory.path_rng(0);
        let mut rng2 = factory.path_rng(0);

        for _ in 0..100 {
            assert_eq!(get_normal_draw(&mut rng1), get_normal_draw(&mut rng2));
        }
    }

    #[test]
    fn test_path_rng_different_paths() {
        let factory = RngFactory::new(42);

        let mut rng1 = factory.path_rng(0);
        let mut rng2 = factory.path_rng(1);

        let vals1: Vec<u64> = (0..10).map(|_| rng1.gen()).collect();
        let vals2: Vec<u64> = (0..10).map(|_| rng2.gen()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_different_base_seeds_give_different_streams() {
        let a = RngFactory::new(1);
        let b = RngFactory::new(2);
        assert_ne!(a.path_seed(0), b.path_seed(0));
        assert_ne!(a.path_seed(5), a.path_seed(6));
    }

    #[test]
    fn test_normal_distribution() {
        let factory = RngFactory::new(42);
        let mut rng = factory.path_rng(0);

        let samples: Vec<f64> = (0..10000).map(|_| get_normal_draw(&mut rng)).collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!(mean.abs() < 0.05, "Mean should be close to 0, got {}", mean);
        assert!(
            (variance - 1.0).abs() < 0.05,
            "Variance should be close to 1, got {}",
            variance
        );
    }
}
