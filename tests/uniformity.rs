use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use tabulated_collections::tabulation::{
    DoubleTabulationHash, SimpleTabulationHash, TabulationHash, TwistedTabulationHash,
};

const BUCKET_COUNT: usize = 64;
const SAMPLE_SIZE: usize = BUCKET_COUNT * 200;
const TRIAL_COUNT: usize = 5;

/// Pearson's chi-squared statistic of `SAMPLE_SIZE` random keys hashed into `BUCKET_COUNT` buckets.
fn chi_squared(hasher: &impl TabulationHash, rng: &mut XorShiftRng) -> f64 {
    let mut buckets = [0usize; BUCKET_COUNT];
    for _ in 0..SAMPLE_SIZE {
        let key: u32 = rng.gen();
        buckets[hasher.hash(&key) as usize % BUCKET_COUNT] += 1;
    }

    let expected = SAMPLE_SIZE as f64 / BUCKET_COUNT as f64;
    buckets
        .iter()
        .map(|observed| {
            let delta = *observed as f64 - expected;
            delta * delta / expected
        })
        .sum()
}

fn assert_uniform(hasher: impl TabulationHash) {
    let degrees_of_freedom = (BUCKET_COUNT - 1) as f64;
    let mut rng = XorShiftRng::seed_from_u64(2024);

    let statistics: Vec<f64> = (0..TRIAL_COUNT)
        .map(|_| chi_squared(&hasher, &mut rng))
        .collect();
    let mean = statistics.iter().sum::<f64>() / TRIAL_COUNT as f64;

    assert!(
        statistics.iter().all(|statistic| *statistic < 2.0 * degrees_of_freedom),
        "statistics {:?}",
        statistics,
    );
    assert!(
        mean > 0.6 * degrees_of_freedom && mean < 1.4 * degrees_of_freedom,
        "mean statistic {}",
        mean,
    );
}

#[test]
fn simple_tabulation_is_uniform() {
    assert_uniform(SimpleTabulationHash::with_seed(42));
}

#[test]
fn twisted_tabulation_is_uniform() {
    assert_uniform(TwistedTabulationHash::with_seed(42));
}

#[test]
fn double_tabulation_is_uniform() {
    assert_uniform(DoubleTabulationHash::with_seed(42));
}
