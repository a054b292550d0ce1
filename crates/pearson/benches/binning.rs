//! Binning and evaluation throughput

use divan::Bencher;
use pearson::prelude::*;
use rand::{SeedableRng, distr::Distribution, rngs::SmallRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use variates::prelude::*;

fn main() {
    divan::main();
}

const N: usize = 1 << 20;

fn unit_interval_keys() -> Vec<i64> {
    let dist = ContinuousUniform::new(2.0, 14.0).unwrap();
    let mut rng = SmallRng::seed_from_u64(42);
    (0..N).map(|_| dist.sample(&mut rng).floor() as i64).collect()
}

#[divan::bench]
fn dense_record(bencher: Bencher) {
    let keys = unit_interval_keys();
    bencher.bench_local(|| {
        let mut table = FrequencyTable::with_support(2..=13);
        table.record_all(keys.iter().copied());
        table.total()
    });
}

#[divan::bench]
fn sparse_record(bencher: Bencher) {
    let keys = unit_interval_keys();
    bencher.bench_local(|| keys.iter().copied().collect::<FrequencyTable>().total());
}

#[cfg(feature = "parallel")]
#[divan::bench]
fn parallel_record(bencher: Bencher) {
    let keys = unit_interval_keys();
    bencher.bench_local(|| FrequencyTable::from_par_draws(2..=13, keys.par_iter().copied()).total());
}

#[divan::bench]
fn evaluate_continuous_uniform(bencher: Bencher) {
    let mut table = FrequencyTable::with_support(2..=13);
    table.record_all(unit_interval_keys());
    bencher.bench_local(|| evaluate(&ContinuousUniformFit, &table).unwrap().statistic);
}
