//! Per-task random number source.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Uniform [0, 1) generator owned by exactly one unit of render work.
///
/// Each row band builds its own from a seed derived from the band and the
/// frame tick, so workers never share RNG state and a band's output is
/// reproducible for a given seed.
pub struct Sampler {
    rng: StdRng,
    dist: Uniform<f32>,
}

impl Sampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            dist: Uniform::new(0.0, 1.0),
        }
    }

    /// Next uniform sample in [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.dist.sample(&mut self.rng)
    }
}
