use std::sync::{PoisonError, RwLock};

use bon::Builder;
use log::debug;
use rand::rngs::ThreadRng;
use rand::{thread_rng, RngCore};

use crate::die::DieInner;
use crate::{Die, Map, Value, Weight, APPROX_MIN_SAMPLE_SIZE};

static APPROX_SAMPLE_SIZE: RwLock<u32> = RwLock::new(APPROX_MIN_SAMPLE_SIZE);

/// Monte-Carlo estimate of a distribution, as a reference for exact results.
///
/// ```
/// use rand::{rngs::StdRng, Rng, SeedableRng};
///
/// let die = dicebag::Approx::builder()
///     .sample_size(10_000)
///     .build(StdRng::seed_from_u64(1))
///     .eval(|rng| rng.gen_range(1..=6) + rng.gen_range(1..=6));
/// assert_eq!(die.values(), &(2..=12).collect::<Vec<_>>()[..]);
/// ```
#[derive(Debug, Builder)]
pub struct Approx<G = ThreadRng>
where
    G: RngCore,
{
    #[builder(finish_fn)]
    rng: G,
    /// Samples per [`Approx::eval`]. Defaults to the process-wide setting,
    /// which never goes below one million. An explicit value is taken as is,
    /// except that zero runs a single sample.
    #[builder(default = default_sample_size())]
    sample_size: u32,
}

impl<G> Approx<G>
where
    G: RngCore,
{
    /// Changes the sample size used by builders from now on. Values below
    /// the built-in minimum are raised to it.
    pub fn set_default_sample_size(value: u32) {
        let value = value.max(APPROX_MIN_SAMPLE_SIZE);
        let mut guard = APPROX_SAMPLE_SIZE
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = value;
    }

    #[must_use]
    pub fn sample_size(&self) -> u32 {
        self.sample_size
    }

    /// Runs `op` once per sample and counts how often each value came up.
    /// At least one sample is always drawn, so the result is never empty.
    #[must_use]
    pub fn eval<T, F>(&mut self, mut op: F) -> Die<T>
    where
        T: Value,
        F: FnMut(&mut G) -> T,
    {
        let samples = self.sample_size.max(1);
        let mut map = Map::new();

        for _ in 0..samples {
            let e = map.entry(op(&mut self.rng)).or_insert(Weight::ZERO);
            *e += 1u32;
        }

        debug!("approx samples: {samples}, distinct values: {}", map.len());
        Die::new(DieInner::new(map, Weight::from(samples)))
    }
}

impl Default for Approx<ThreadRng> {
    fn default() -> Self {
        Self::builder().build(thread_rng())
    }
}

fn default_sample_size() -> u32 {
    *APPROX_SAMPLE_SIZE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn default_sample_size_is_clamped() {
        Approx::<ThreadRng>::set_default_sample_size(10);
        assert_eq!(APPROX_MIN_SAMPLE_SIZE, Approx::default().sample_size());
    }

    #[test]
    fn estimate_close_to_exact() {
        let exact = Die::unordered(3, 6)
            .unwrap()
            .map(|roll| roll.iter().sum::<i32>());
        let approx = Approx::builder()
            .sample_size(200_000)
            .build(StdRng::seed_from_u64(42))
            .eval(|rng| (0..3).map(|_| rng.gen_range(1..=6)).sum::<i32>());

        assert_eq!(&Weight::from(200_000u32), approx.denom());
        assert_eq!(exact.values(), approx.values());
        assert!((exact.mean() - approx.mean()).abs() < 0.05);
        for (p, q) in exact.probabilities().iter().zip(approx.probabilities()) {
            assert!((p - q).abs() < 0.01);
        }
    }

    #[test]
    fn zero_sample_size_draws_one_sample() {
        let die = Approx::builder()
            .sample_size(0)
            .build(StdRng::seed_from_u64(3))
            .eval(|rng| rng.gen_range(5..=5));
        assert_eq!(&[5], die.values());
        assert_eq!(&Weight::from(1u32), die.denom());
    }
}
