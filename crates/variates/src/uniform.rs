//! Uniform laws: continuous over `[min, max)` and discrete over the integers
//! inside `[min, max]`.

use rand::Rng;
use rand::distr::Distribution;

use crate::{Error, Result};

/// Continuous uniform law over `[min, max)`, sampled by inverting the CDF:
/// one draw `u` maps to `min + (max - min) * u`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContinuousUniform {
    min: f64,
    max: f64,
}

impl ContinuousUniform {
    /// Create a continuous uniform generator over `[min, max)`.
    ///
    /// Both bounds must be finite and `min < max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_finite() && max.is_finite() && min < max {
            Ok(Self { min, max })
        } else {
            Err(Error::InvalidParameters {
                family: "continuous uniform",
                reason: format!("expected finite min < max, got min = {min}, max = {max}"),
            })
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Distribution<f64> for ContinuousUniform {
    fn sample<G: Rng + ?Sized>(&self, rng: &mut G) -> f64 {
        let u = rng.random::<f64>();
        self.min + (self.max - self.min) * u
    }
}

/// Discrete uniform law over the integers in `[ceil(min), floor(max)]`.
///
/// Sampling partitions `[0, 1)` into `edges_count` equal segments and scans
/// for the first segment whose right edge is at or past the draw. Each of the
/// `edges_count` outcomes has probability `1 / edges_count`.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscreteUniform {
    lo: i64,
    edges: Vec<f64>,
}

impl DiscreteUniform {
    /// Create a discrete uniform generator over the integers in
    /// `[ceil(min), floor(max)]`.
    ///
    /// The bounds must be finite and the clamped support non-empty.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidParameters {
            family: "discrete uniform",
            reason,
        };

        if !min.is_finite() || !max.is_finite() {
            return Err(invalid(format!(
                "expected finite bounds, got min = {min}, max = {max}"
            )));
        }

        let lo = min.ceil() as i64;
        let hi = max.floor() as i64;
        if lo > hi {
            return Err(invalid(format!(
                "no integers inside [{min}, {max}]"
            )));
        }

        let edges_count = (hi - lo + 1) as usize;
        let segment = 1.0 / edges_count as f64;
        let edges = (1..=edges_count).map(|i| i as f64 * segment).collect();

        Ok(Self { lo, edges })
    }

    /// Smallest value the generator can return.
    pub fn lo(&self) -> i64 {
        self.lo
    }

    /// Largest value the generator can return.
    pub fn hi(&self) -> i64 {
        self.lo + self.edges.len() as i64 - 1
    }

    /// Number of distinct outcomes.
    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }
}

impl Distribution<i64> for DiscreteUniform {
    fn sample<G: Rng + ?Sized>(&self, rng: &mut G) -> i64 {
        let u = rng.random::<f64>();
        // The last right edge may round below 1.0, so fall back to the last
        // segment rather than scan past the end.
        let segment = self
            .edges
            .iter()
            .position(|&edge| u <= edge)
            .unwrap_or(self.edges.len() - 1);
        self.lo + segment as i64
    }
}
