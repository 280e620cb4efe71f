use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws for the sampler.
pub trait RandomSource {
    /// A value in `[0, upper)`. `upper` is always positive and finite.
    fn uniform(&mut self, upper: f64) -> f64;
}

/// Adapts any `rand` generator into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self, upper: f64) -> f64 {
        self.rng.gen_range(0.0..upper)
    }
}

/// Always returns the same fraction of `upper`. Useful for pinning draws
/// onto cumulative boundaries.
#[derive(Debug, Clone, Copy)]
pub struct FixedFraction(pub f64);

impl RandomSource for FixedFraction {
    fn uniform(&mut self, upper: f64) -> f64 {
        self.0 * upper
    }
}

/// Replays a fixed list of absolute draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    next: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn uniform(&mut self, _upper: f64) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next = self.next.wrapping_add(1);
        value
    }
}
