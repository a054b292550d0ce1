//! Poisson law sampled by inverting the CDF through the probability
//! recurrence.

use rand::Rng;
use rand::distr::Distribution;

use crate::{Error, Result};

/// Iteration cap for the CDF walk. Well past the upper tail of any
/// accepted rate; reaching it means the cumulative has gone numerically
/// flat below the draw.
const MAX_STEPS: usize = 1024;

/// Rates at or past this underflow `e^-lambda` to zero, so the walk could
/// never leave its starting point.
const MAX_RATE: f64 = 700.0;

/// Poisson law with rate `lambda`, sampled via the recurrence
/// `p_0 = e^-lambda`, `p_{i+1} = p_i * lambda / (i + 1)`: the sample is the
/// smallest `i` whose cumulative probability exceeds the draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Poisson {
    lambda: f64,
}

impl Poisson {
    /// Create a Poisson generator with rate `0 < lambda < 700`.
    ///
    /// The upper bound keeps `e^-lambda` representable; past it the CDF
    /// walk could never terminate.
    pub fn new(lambda: f64) -> Result<Self> {
        if lambda.is_finite() && lambda > 0.0 && lambda < MAX_RATE {
            Ok(Self { lambda })
        } else {
            Err(Error::InvalidParameters {
                family: "poisson",
                reason: format!("expected lambda in (0, {MAX_RATE}), got {lambda}"),
            })
        }
    }

    /// The rate, which is also the mean and the variance of the law.
    pub fn mean(&self) -> f64 {
        self.lambda
    }

    /// Sample one value, reporting a stall instead of looping forever when
    /// the cumulative probability saturates below the draw.
    pub fn try_sample<G: Rng + ?Sized>(&self, rng: &mut G) -> Result<u64> {
        let u = rng.random::<f64>();

        let mut p = (-self.lambda).exp();
        let mut cumulative = p;
        let mut i = 0u64;
        while u >= cumulative {
            if i as usize >= MAX_STEPS {
                return Err(Error::SamplingStall {
                    family: "poisson",
                    cap: MAX_STEPS,
                });
            }
            p *= self.lambda / (i + 1) as f64;
            cumulative += p;
            i += 1;
        }
        Ok(i)
    }
}

impl Distribution<u64> for Poisson {
    /// # Panics
    ///
    /// Panics if the CDF walk stalls; use [`Poisson::try_sample`] to handle
    /// the stall as an error instead.
    fn sample<G: Rng + ?Sized>(&self, rng: &mut G) -> u64 {
        match self.try_sample(rng) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}
