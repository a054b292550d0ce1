//! Frequency table: an ordered mapping from outcome bucket to observed
//! count.
//!
//! Buckets are keyed by `i64`. Discrete families record the outcome itself;
//! the continuous-uniform binning records the integer lower bound of the
//! unit interval `[i, i + 1)` a draw falls in (i.e. `floor` of the draw);
//! process fits record the per-trial event count.

use std::collections::HashMap;
use std::iter::repeat_n;
use std::ops::RangeInclusive;

use nohash_hasher::BuildNoHashHasher;

type SparseCounts = HashMap<i64, u64, BuildNoHashHasher<i64>>;

/// Accumulates draws into observed counts per bucket.
///
/// Two storage modes:
/// - **dense** for bounded supports ([`FrequencyTable::with_support`]):
///   pre-seeded with zero-count buckets over the known support, so every
///   bucket of the support contributes to the fit even when no draw lands
///   in it;
/// - **sparse** for unbounded supports ([`FrequencyTable::new`]): only
///   observed outcomes become buckets.
///
/// The sum of observed counts always equals the number of recorded draws.
#[derive(Clone, Debug)]
pub struct FrequencyTable {
    storage: Storage,
    total: u64,
}

#[derive(Clone, Debug)]
enum Storage {
    Dense { lo: i64, counts: Vec<u64> },
    Sparse(SparseCounts),
}

impl FrequencyTable {
    /// Empty sparse table for laws with unbounded support (Poisson, process
    /// event counts).
    pub fn new() -> Self {
        Self {
            storage: Storage::Sparse(SparseCounts::default()),
            total: 0,
        }
    }

    /// Dense table pre-seeded with zero-count buckets over `support`.
    pub fn with_support(support: RangeInclusive<i64>) -> Self {
        let lo = *support.start();
        let len = support.end().saturating_sub(lo).max(0) as usize + 1;
        Self {
            storage: Storage::Dense {
                lo,
                counts: vec![0; len],
            },
            total: 0,
        }
    }

    pub(crate) fn from_dense(lo: i64, counts: Vec<u64>) -> Self {
        let total = counts.iter().sum();
        Self {
            storage: Storage::Dense { lo, counts },
            total,
        }
    }

    /// Record one draw in the bucket keyed by `key`.
    ///
    /// A dense table grows its window when the key lands outside the seeded
    /// support, so the count invariant holds for every recorded draw.
    pub fn record(&mut self, key: i64) {
        match &mut self.storage {
            Storage::Dense { lo, counts } => {
                if key < *lo {
                    let pad = (*lo - key) as usize;
                    counts.splice(0..0, repeat_n(0, pad));
                    *lo = key;
                }
                let index = (key - *lo) as usize;
                if index >= counts.len() {
                    counts.resize(index + 1, 0);
                }
                counts[index] += 1;
            }
            Storage::Sparse(map) => {
                *map.entry(key).or_insert(0) += 1;
            }
        }
        self.total += 1;
    }

    /// Record every draw of an iterator.
    pub fn record_all(&mut self, keys: impl IntoIterator<Item = i64>) {
        for key in keys {
            self.record(key);
        }
    }

    /// Number of recorded draws.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of buckets: the seeded support size for dense tables, the
    /// number of distinct observed outcomes for sparse ones.
    pub fn num_buckets(&self) -> usize {
        match &self.storage {
            Storage::Dense { counts, .. } => counts.len(),
            Storage::Sparse(map) => map.len(),
        }
    }

    /// Frozen view for evaluation: `(key, observed)` pairs in ascending key
    /// order.
    pub fn buckets(&self) -> Vec<(i64, u64)> {
        match &self.storage {
            Storage::Dense { lo, counts } => counts
                .iter()
                .enumerate()
                .map(|(i, &count)| (lo + i as i64, count))
                .collect(),
            Storage::Sparse(map) => {
                let mut buckets: Vec<_> = map.iter().map(|(&key, &count)| (key, count)).collect();
                buckets.sort_unstable_by_key(|&(key, _)| key);
                buckets
            }
        }
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<i64> for FrequencyTable {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, keys: I) {
        self.record_all(keys);
    }
}

impl FromIterator<i64> for FrequencyTable {
    /// Collect draws into a sparse table.
    fn from_iter<I: IntoIterator<Item = i64>>(keys: I) -> Self {
        let mut table = Self::new();
        table.record_all(keys);
        table
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_dense_preseeded_support() {
        let table = FrequencyTable::with_support(2..=13);
        assert_eq!(table.num_buckets(), 12);
        assert_eq!(table.total(), 0);
        assert!(table.buckets().iter().all(|&(_, count)| count == 0));
    }

    #[test]
    fn test_dense_record_and_total() {
        let mut table = FrequencyTable::with_support(0..=3);
        table.record_all([0, 1, 1, 3, 3, 3]);

        assert_eq!(table.total(), 6);
        assert_eq!(table.buckets(), vec![(0, 1), (1, 2), (2, 0), (3, 3)]);
    }

    #[test]
    fn test_dense_grows_outside_support() {
        let mut table = FrequencyTable::with_support(0..=2);
        table.record_all([-2, 0, 4]);

        assert_eq!(table.total(), 3);
        assert_eq!(
            table.buckets(),
            vec![(-2, 1), (-1, 0), (0, 1), (1, 0), (2, 0), (3, 0), (4, 1)]
        );
    }

    #[test]
    fn test_sparse_ordering() {
        let table: FrequencyTable = [5i64, -1, 3, 5, 5, -1].into_iter().collect();

        assert_eq!(table.total(), 6);
        assert_eq!(table.num_buckets(), 3);
        assert_eq!(table.buckets(), vec![(-1, 2), (3, 1), (5, 3)]);
    }

    #[test]
    fn test_extend_matches_record_all() {
        let mut a = FrequencyTable::new();
        let mut b = FrequencyTable::new();
        a.extend([1i64, 2, 2]);
        b.record_all([1, 2, 2]);
        assert_eq!(a.buckets(), b.buckets());
    }
}
