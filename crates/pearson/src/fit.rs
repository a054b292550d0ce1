//! Goodness-of-fit evaluation: one Pearson chi-square skeleton shared by
//! four family-specific strategies.
//!
//! Each family estimates its parameters from the frozen buckets, derives the
//! expected count per bucket, and the skeleton does the rest: degrees of
//! freedom, the chi-square statistic with the zero-expected guard, the
//! critical-value lookup, and the verdict.

use std::fmt;

use crate::critical::{ALPHA, critical_value};
use crate::table::FrequencyTable;
use crate::{Error, Result};

/// Parameter estimates and per-bucket expected counts for one family/table
/// pairing.
pub struct Estimate {
    /// Estimated parameters, by name. Empty when the family estimates none.
    pub params: Vec<(&'static str, f64)>,
    /// Expected count per bucket, aligned with the frozen bucket order.
    pub expected: Vec<f64>,
}

/// A distribution family the evaluator can fit against binned observations.
///
/// Buckets arrive as `(key, observed)` pairs in ascending key order, with
/// `n` the total number of draws.
pub trait FamilyFit {
    /// Family name used in reports and errors.
    fn family(&self) -> &'static str;

    /// Subtracted from the bucket count to obtain the degrees of freedom:
    /// one for the total-count constraint plus one per estimated parameter
    /// (where the family follows the textbook convention).
    fn dof_reduction(&self) -> usize;

    /// Estimate parameters and expected counts from the frozen buckets.
    fn estimate(&self, buckets: &[(i64, u64)], n: u64) -> Result<Estimate>;
}

/// Observed versus expected count for one bucket of a completed fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BucketFit {
    pub key: i64,
    pub observed: u64,
    pub expected: f64,
}

/// Outcome of one goodness-of-fit evaluation. Immutable once produced.
#[derive(Clone, Debug)]
pub struct FitReport {
    pub family: &'static str,
    pub n: u64,
    pub params: Vec<(&'static str, f64)>,
    pub buckets: Vec<BucketFit>,
    pub statistic: f64,
    pub dof: usize,
    pub critical: f64,
    pub fits: bool,
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} fit (N = {})", self.family, self.n)?;
        writeln!(f, "{:>10} {:>10} {:>12}", "bucket", "observed", "expected")?;
        for bucket in &self.buckets {
            writeln!(
                f,
                "{:>10} {:>10} {:>12.2}",
                bucket.key, bucket.observed, bucket.expected
            )?;
        }
        for (name, value) in &self.params {
            writeln!(f, "estimated {name} = {value:.4}")?;
        }
        writeln!(f, "degrees of freedom k = {}", self.dof)?;
        writeln!(f, "significance level alpha = {ALPHA}")?;
        writeln!(f, "chi-square observed = {:.4}", self.statistic)?;
        writeln!(f, "chi-square critical = {}", self.critical)?;
        write!(
            f,
            "the sample {} the {} law",
            if self.fits {
                "is consistent with"
            } else {
                "rejects"
            },
            self.family
        )
    }
}

/// Run the shared evaluation skeleton for `family` over a frozen table.
pub fn evaluate<F: FamilyFit>(family: &F, table: &FrequencyTable) -> Result<FitReport> {
    let buckets = table.buckets();
    let n = table.total();
    if buckets.is_empty() || n == 0 {
        return Err(Error::EmptyTable);
    }

    let dof = degrees_of_freedom(buckets.len(), family.dof_reduction())?;
    let critical = critical_value(dof)?;

    let Estimate { params, expected } = family.estimate(&buckets, n)?;
    debug_assert_eq!(expected.len(), buckets.len());

    let statistic = pearson_statistic(&buckets, &expected)?;

    Ok(FitReport {
        family: family.family(),
        n,
        params,
        buckets: buckets
            .iter()
            .zip(&expected)
            .map(|(&(key, observed), &expected)| BucketFit {
                key,
                observed,
                expected,
            })
            .collect(),
        statistic,
        dof,
        critical,
        fits: statistic < critical,
    })
}

fn degrees_of_freedom(buckets: usize, reduction: usize) -> Result<usize> {
    match buckets.checked_sub(reduction) {
        Some(dof) if dof >= 1 => Ok(dof),
        _ => Err(Error::UnsupportedDegreesOfFreedom {
            dof: buckets as i64 - reduction as i64,
        }),
    }
}

/// `sum((observed - expected)^2 / expected)` over all buckets.
///
/// A bucket with zero expected and zero observed count contributes nothing;
/// zero expected with a nonzero observed count aborts rather than divide by
/// zero.
fn pearson_statistic(buckets: &[(i64, u64)], expected: &[f64]) -> Result<f64> {
    let mut statistic = 0.0;
    for (&(key, observed), &expected) in buckets.iter().zip(expected) {
        if expected <= 0.0 {
            if observed == 0 {
                continue;
            }
            return Err(Error::DegenerateBucket { key, observed });
        }
        let diff = observed as f64 - expected;
        statistic += diff * diff / expected;
    }
    Ok(statistic)
}

/// Continuous uniform fit over unit-interval buckets `[key, key + 1)`.
///
/// Method of moments on the bucket midpoints estimates the support as
/// `a = mean - sqrt(3) * sd`, `b = mean + sqrt(3) * sd`; each bucket's
/// expected count is `N * density * width`, where the first and last buckets
/// are proportioned against the estimated bounds instead of a neighbouring
/// bucket edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContinuousUniformFit;

impl FamilyFit for ContinuousUniformFit {
    fn family(&self) -> &'static str {
        "continuous uniform"
    }

    // two estimated parameters plus the total-count constraint
    fn dof_reduction(&self) -> usize {
        3
    }

    fn estimate(&self, buckets: &[(i64, u64)], n: u64) -> Result<Estimate> {
        let degenerate = |reason: String| Error::DegenerateSample {
            family: self.family(),
            reason,
        };

        let s = buckets.len();
        if s < 2 {
            return Err(degenerate(format!(
                "need at least two buckets to fit interval bounds, got {s}"
            )));
        }

        let nf = n as f64;
        let midpoint = |key: i64| key as f64 + 0.5;

        let mean = buckets
            .iter()
            .map(|&(key, count)| midpoint(key) * count as f64)
            .sum::<f64>()
            / nf;
        let variance = buckets
            .iter()
            .map(|&(key, count)| {
                let offset = midpoint(key) - mean;
                count as f64 * offset * offset
            })
            .sum::<f64>()
            / nf;
        let sd = variance.sqrt();
        if sd == 0.0 {
            return Err(degenerate(
                "zero sample variance, the estimated support collapses".into(),
            ));
        }

        let a = mean - 3.0f64.sqrt() * sd;
        let b = mean + 3.0f64.sqrt() * sd;
        let density = 1.0 / (b - a);

        let mut expected = vec![0.0; s];
        expected[0] = nf * density * (buckets[1].0 as f64 - a);
        for i in 1..s - 1 {
            expected[i] = nf * density * (buckets[i].0 - buckets[i - 1].0) as f64;
        }
        expected[s - 1] = nf * density * (b - buckets[s - 1].0 as f64);

        Ok(Estimate {
            params: vec![("a", a), ("b", b)],
            expected,
        })
    }
}

/// Discrete uniform fit: every bucket of the known support expects `N / s`
/// draws, no parameters estimated.
///
/// The default degrees-of-freedom reduction is 3, matching the convention
/// this evaluator inherited even though the family estimates no parameters
/// (the textbook reduction would be 1, for the total-count constraint
/// alone). Use [`DiscreteUniformFit::with_dof_reduction`] to override.
#[derive(Clone, Copy, Debug)]
pub struct DiscreteUniformFit {
    dof_reduction: usize,
}

impl DiscreteUniformFit {
    pub fn new() -> Self {
        Self { dof_reduction: 3 }
    }

    /// Override the degrees-of-freedom reduction (e.g. 1 for the textbook
    /// convention).
    pub fn with_dof_reduction(reduction: usize) -> Self {
        Self {
            dof_reduction: reduction,
        }
    }
}

impl Default for DiscreteUniformFit {
    fn default() -> Self {
        Self::new()
    }
}

impl FamilyFit for DiscreteUniformFit {
    fn family(&self) -> &'static str {
        "discrete uniform"
    }

    fn dof_reduction(&self) -> usize {
        self.dof_reduction
    }

    fn estimate(&self, buckets: &[(i64, u64)], n: u64) -> Result<Estimate> {
        let expected = n as f64 / buckets.len() as f64;
        Ok(Estimate {
            params: Vec::new(),
            expected: vec![expected; buckets.len()],
        })
    }
}

/// Poisson fit: `lambda` is estimated as the sample mean and each bucket
/// keyed by outcome `v` expects `N * e^-lambda * lambda^v / v!`, computed by
/// walking the pmf recurrence up the sorted keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct PoissonFit;

impl FamilyFit for PoissonFit {
    fn family(&self) -> &'static str {
        "poisson"
    }

    // one estimated parameter plus the total-count constraint
    fn dof_reduction(&self) -> usize {
        2
    }

    fn estimate(&self, buckets: &[(i64, u64)], n: u64) -> Result<Estimate> {
        poisson_estimate(self.family(), buckets, n)
    }
}

/// Goodness of fit for the per-trial event counts of a Poisson point
/// process, which are themselves Poisson distributed (with mean
/// `rate * horizon` for the homogeneous process, the integrated intensity
/// for a thinned one). Identical computation to [`PoissonFit`] over the
/// distinct observed counts.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventCountFit;

impl FamilyFit for EventCountFit {
    fn family(&self) -> &'static str {
        "poisson event count"
    }

    fn dof_reduction(&self) -> usize {
        PoissonFit.dof_reduction()
    }

    fn estimate(&self, buckets: &[(i64, u64)], n: u64) -> Result<Estimate> {
        poisson_estimate(self.family(), buckets, n)
    }
}

fn poisson_estimate(family: &'static str, buckets: &[(i64, u64)], n: u64) -> Result<Estimate> {
    if let Some(&(key, _)) = buckets.iter().find(|&&(key, _)| key < 0) {
        return Err(Error::DegenerateSample {
            family,
            reason: format!("negative outcome {key} is outside the Poisson support"),
        });
    }

    let nf = n as f64;
    let lambda = buckets
        .iter()
        .map(|&(key, count)| key as f64 * count as f64)
        .sum::<f64>()
        / nf;

    // Walk p_v = e^-lambda * lambda^v / v! up the ascending keys; the
    // recurrence sidesteps factorial overflow.
    let mut expected = Vec::with_capacity(buckets.len());
    let mut p = (-lambda).exp();
    let mut v = 0i64;
    for &(key, _) in buckets {
        while v < key {
            v += 1;
            p *= lambda / v as f64;
        }
        expected.push(nf * p);
    }

    Ok(Estimate {
        params: vec![("lambda", lambda)],
        expected,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn dense_table(lo: i64, counts: &[u64]) -> FrequencyTable {
        let mut table = FrequencyTable::with_support(lo..=lo + counts.len() as i64 - 1);
        for (i, &count) in counts.iter().enumerate() {
            for _ in 0..count {
                table.record(lo + i as i64);
            }
        }
        table
    }

    #[test]
    fn test_discrete_uniform_perfect_fit() {
        let table = dense_table(2, &[100; 12]);
        let report = evaluate(&DiscreteUniformFit::new(), &table).unwrap();

        assert_eq!(report.dof, 9);
        assert_eq!(report.critical, 16.9);
        assert_eq!(report.statistic, 0.0);
        assert!(report.fits);
        assert!(report.params.is_empty());
    }

    #[test]
    fn test_discrete_uniform_dof_policy() {
        let table = dense_table(2, &[100; 12]);
        let report = evaluate(&DiscreteUniformFit::with_dof_reduction(1), &table).unwrap();

        assert_eq!(report.dof, 11);
        assert_eq!(report.critical, 19.7);
    }

    #[test]
    fn test_continuous_uniform_flat_sample() {
        // 12 unit intervals over [2, 14), 1000 draws each
        let table = dense_table(2, &[1000; 12]);
        let report = evaluate(&ContinuousUniformFit, &table).unwrap();

        assert_eq!(report.dof, 9);
        assert_eq!(report.critical, 16.9);
        assert!(report.statistic < 2.0);
        assert!(report.fits);

        let (name_a, a) = report.params[0];
        let (name_b, b) = report.params[1];
        assert_eq!((name_a, name_b), ("a", "b"));
        assert!((a - 2.0).abs() < 0.1);
        assert!((b - 14.0).abs() < 0.1);
    }

    #[test]
    fn test_continuous_uniform_zero_variance() {
        let mut table = FrequencyTable::with_support(0..=5);
        for _ in 0..100 {
            table.record(2);
        }

        let err = evaluate(&ContinuousUniformFit, &table).unwrap_err();
        assert!(matches!(err, Error::DegenerateSample { .. }));
    }

    #[test]
    fn test_poisson_fit_on_exact_pmf_counts() {
        // Counts proportional to the Poisson(2) pmf for outcomes 0..=8
        let table = dense_table(0, &[1353, 2707, 2707, 1804, 902, 361, 120, 34, 9]);
        let report = evaluate(&PoissonFit, &table).unwrap();

        assert_eq!(report.dof, 7);
        assert_eq!(report.critical, 14.1);
        let (name, lambda) = report.params[0];
        assert_eq!(name, "lambda");
        assert!((lambda - 2.0).abs() < 0.01);
        assert!(report.fits);
    }

    #[test]
    fn test_event_count_fit_delegates_to_poisson() {
        let table = dense_table(0, &[1353, 2707, 2707, 1804, 902, 361, 120, 34, 9]);
        let poisson = evaluate(&PoissonFit, &table).unwrap();
        let counts = evaluate(&EventCountFit, &table).unwrap();

        assert_eq!(counts.family, "poisson event count");
        assert_eq!(counts.statistic, poisson.statistic);
        assert_eq!(counts.dof, poisson.dof);
    }

    #[test]
    fn test_poisson_rejects_negative_outcomes() {
        let table: FrequencyTable = [-1i64, 0, 1, 1, 2].into_iter().collect();
        let err = evaluate(&PoissonFit, &table).unwrap_err();
        assert!(matches!(err, Error::DegenerateSample { .. }));
    }

    #[test]
    fn test_degenerate_bucket_on_underflowed_expected() {
        // The far outlier drags lambda to ~10.5; its own pmf underflows to
        // exactly zero while its observed count is nonzero.
        let mut table = FrequencyTable::new();
        for _ in 0..50 {
            table.record(0);
        }
        for _ in 0..49 {
            table.record(1);
        }
        table.record(1000);

        let err = evaluate(&PoissonFit, &table).unwrap_err();
        assert!(matches!(
            err,
            Error::DegenerateBucket {
                key: 1000,
                observed: 1
            }
        ));
    }

    #[test]
    fn test_zero_expected_zero_observed_contributes_nothing() {
        let statistic = pearson_statistic(&[(0, 5), (1, 0)], &[5.0, 0.0]).unwrap();
        assert_eq!(statistic, 0.0);

        let err = pearson_statistic(&[(1, 2)], &[0.0]).unwrap_err();
        assert!(matches!(err, Error::DegenerateBucket { key: 1, observed: 2 }));
    }

    #[test]
    fn test_dof_out_of_table_range() {
        let too_few = dense_table(0, &[10; 3]);
        assert!(matches!(
            evaluate(&DiscreteUniformFit::new(), &too_few),
            Err(Error::UnsupportedDegreesOfFreedom { dof: 0 })
        ));

        let too_many = dense_table(0, &[10; 24]);
        assert!(matches!(
            evaluate(&DiscreteUniformFit::new(), &too_many),
            Err(Error::UnsupportedDegreesOfFreedom { dof: 21 })
        ));
    }

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::new();
        assert!(matches!(
            evaluate(&PoissonFit, &table),
            Err(Error::EmptyTable)
        ));
    }

    #[test]
    fn test_report_display_mentions_verdict() {
        let table = dense_table(2, &[100; 12]);
        let report = evaluate(&DiscreteUniformFit::new(), &table).unwrap();
        let rendered = report.to_string();

        assert!(rendered.contains("degrees of freedom k = 9"));
        assert!(rendered.contains("alpha = 0.05"));
        assert!(rendered.contains("is consistent with"));
    }
}
