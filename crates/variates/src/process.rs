//! Poisson point processes over a finite horizon: homogeneous via
//! exponential inter-arrival gaps, non-homogeneous via thinning.

use rand::Rng;

use crate::{Error, Result};

/// Cap on the number of candidate arrivals per path. The homogeneous clock
/// almost surely passes any finite horizon long before this; hitting the cap
/// means the clock stopped advancing.
const MAX_ARRIVALS: usize = 1 << 20;

/// One realization of a point process: the ordered event times inside the
/// horizon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathSample {
    events: Vec<f64>,
}

impl PathSample {
    /// Event times in increasing order, all within `[0, horizon]`.
    pub fn events(&self) -> &[f64] {
        &self.events
    }

    /// Number of events in the path.
    pub fn count(&self) -> usize {
        self.events.len()
    }

    pub fn into_events(self) -> Vec<f64> {
        self.events
    }
}

/// Homogeneous Poisson process with constant rate over `[0, horizon]`.
///
/// Arrival times accumulate exponential gaps `-ln(u) / rate`; the first
/// arrival past the horizon ends the path and is discarded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoissonProcess {
    horizon: f64,
    rate: f64,
}

impl PoissonProcess {
    /// Create a process over `[0, horizon]` with the given rate.
    ///
    /// The horizon must be finite and non-negative, the rate finite and
    /// positive.
    pub fn new(horizon: f64, rate: f64) -> Result<Self> {
        validate(horizon, rate, "poisson process")?;
        Ok(Self { horizon, rate })
    }

    /// Generate one path.
    pub fn sample_path<G: Rng + ?Sized>(&self, rng: &mut G) -> Result<PathSample> {
        let mut events = Vec::new();
        let mut t = exponential_gap(rng, self.rate);
        while t <= self.horizon {
            if events.len() >= MAX_ARRIVALS {
                return Err(Error::SamplingStall {
                    family: "poisson process",
                    cap: MAX_ARRIVALS,
                });
            }
            events.push(t);
            t += exponential_gap(rng, self.rate);
        }
        Ok(PathSample { events })
    }
}

/// Non-homogeneous Poisson process simulated by thinning.
///
/// Candidate arrivals come from a homogeneous process at the dominating
/// `rate`; a candidate at time `t` survives when a second independent draw
/// falls at or below `intensity(t) / rate`. Rejected candidates still advance
/// the clock. The intensity must stay at or below the dominating rate over
/// the whole horizon; a violation at a candidate time aborts the path.
#[derive(Clone, Debug)]
pub struct ThinnedPoissonProcess<F> {
    horizon: f64,
    rate: f64,
    intensity: F,
}

impl<F: Fn(f64) -> f64> ThinnedPoissonProcess<F> {
    /// Create a thinned process over `[0, horizon]` with the dominating
    /// `rate` and the target `intensity` function.
    pub fn new(horizon: f64, rate: f64, intensity: F) -> Result<Self> {
        validate(horizon, rate, "thinned poisson process")?;
        Ok(Self {
            horizon,
            rate,
            intensity,
        })
    }

    /// Generate one path of accepted arrivals.
    pub fn sample_path<G: Rng + ?Sized>(&self, rng: &mut G) -> Result<PathSample> {
        let mut events = Vec::new();
        let mut candidates = 0usize;
        let mut t = exponential_gap(rng, self.rate);
        while t <= self.horizon {
            if candidates >= MAX_ARRIVALS {
                return Err(Error::SamplingStall {
                    family: "thinned poisson process",
                    cap: MAX_ARRIVALS,
                });
            }
            candidates += 1;

            let intensity = (self.intensity)(t);
            if intensity > self.rate {
                return Err(Error::IntensityExceedsRate {
                    t,
                    intensity,
                    rate: self.rate,
                });
            }
            if rng.random::<f64>() <= intensity / self.rate {
                events.push(t);
            }

            t += exponential_gap(rng, self.rate);
        }
        Ok(PathSample { events })
    }
}

/// One exponential inter-arrival gap with the given rate.
///
/// A zero draw maps to an infinite gap, which simply ends the path.
fn exponential_gap<G: Rng + ?Sized>(rng: &mut G, rate: f64) -> f64 {
    -rng.random::<f64>().ln() / rate
}

fn validate(horizon: f64, rate: f64, family: &'static str) -> Result<()> {
    if !(horizon.is_finite() && horizon >= 0.0) {
        return Err(Error::InvalidParameters {
            family,
            reason: format!("expected finite horizon >= 0, got {horizon}"),
        });
    }
    if !(rate.is_finite() && rate > 0.0) {
        return Err(Error::InvalidParameters {
            family,
            reason: format!("expected finite rate > 0, got {rate}"),
        });
    }
    Ok(())
}
