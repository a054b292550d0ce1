//! Parallel dense binning of large samples via rayon fold/reduce.

use std::ops::RangeInclusive;

use rayon::prelude::*;

use crate::table::FrequencyTable;

impl FrequencyTable {
    /// Bin a parallel iterator of draws into a dense table over `support`.
    ///
    /// Each worker folds into its own count vector; the vectors are then
    /// merged pairwise.
    ///
    /// # Panics
    ///
    /// Panics if a draw falls outside `support`.
    pub fn from_par_draws(
        support: RangeInclusive<i64>,
        draws: impl IntoParallelIterator<Item = i64>,
    ) -> Self {
        let lo = *support.start();
        let len = support.end().saturating_sub(lo).max(0) as usize + 1;

        let counts = draws
            .into_par_iter()
            .fold(
                || vec![0u64; len],
                |mut acc, key| {
                    acc[(key - lo) as usize] += 1;
                    acc
                },
            )
            .reduce(
                || vec![0u64; len],
                |mut counts1, counts2| {
                    for (a1, a2) in counts1.iter_mut().zip(counts2) {
                        *a1 += a2;
                    }
                    counts1
                },
            );

        Self::from_dense(lo, counts)
    }
}
