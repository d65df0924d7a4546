//! Laplace noise for the release step.

use rand::Rng;
use rand_distr::{Distribution, Exp};

/// A source of additive noise for histogram release.
///
/// The release step draws one sample per histogram entry through this trait,
/// so tests can substitute deterministic sequences. Production code uses
/// [`LaplaceNoise`]; anything predictable or replayable outside of tests
/// would void the privacy guarantee.
pub trait NoiseSource {
    /// Draw one noise sample for the given Laplace scale.
    fn sample(&mut self, scale: f64) -> f64;
}

/// Draw one Laplace(0, `scale`) sample.
///
/// Laplace noise is sampled as the difference of two exponential draws.
/// Degenerate scales (non-finite or <= 0) yield no noise.
pub fn laplace_noise<R: Rng>(scale: f64, rng: &mut R) -> f64 {
    if !scale.is_finite() || scale <= 0.0 {
        return 0.0;
    }
    let dist = match Exp::new(1.0 / scale) {
        Ok(d) => d,
        Err(_) => return 0.0,
    };
    dist.sample(rng) - dist.sample(rng)
}

/// Laplace noise backed by an injectable RNG.
#[derive(Clone, Debug)]
pub struct LaplaceNoise<R> {
    rng: R,
}

impl<R: Rng> LaplaceNoise<R> {
    /// Wrap an RNG as a Laplace noise source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NoiseSource for LaplaceNoise<R> {
    fn sample(&mut self, scale: f64) -> f64 {
        laplace_noise(scale, &mut self.rng)
    }
}
