use anyhow::{ensure, Result};
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TEST_RATIO: f64 = 0.2;
pub const DEFAULT_DEV_RATIO: f64 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct SplitConfig {
    pub test_ratio: f64,
    pub dev_ratio: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            test_ratio: DEFAULT_TEST_RATIO,
            dev_ratio: DEFAULT_DEV_RATIO,
            seed: DEFAULT_SEED,
        }
    }
}

impl SplitConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, ratio) in [("test", self.test_ratio), ("dev", self.dev_ratio)] {
            ensure!(
                (0.0..1.0).contains(&ratio),
                "{name} ratio must be in [0, 1), got {ratio}"
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Splits<T> {
    pub train: Vec<T>,
    pub dev: Vec<T>,
    pub test: Vec<T>,
}

impl<T: Clone> Splits<T> {
    /// Train rows followed by dev rows: everything the model may see.
    pub fn known(&self) -> Vec<T> {
        self.train.iter().chain(&self.dev).cloned().collect()
    }
}

/// Shuffles `rows` with a generator seeded by `seed` and moves the first
/// `ceil(ratio * n)` of them into the held-out half. Returns `(kept, held_out)`.
pub fn holdout_split<T>(mut rows: Vec<T>, ratio: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let n_held = ((rows.len() as f64) * ratio).ceil() as usize;
    let n_held = n_held.min(rows.len());

    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);

    let kept = rows.split_off(n_held);
    (kept, rows)
}

/// Test rows are carved off first, then dev rows out of what remains.
pub fn split_train_dev_test<T>(rows: Vec<T>, config: &SplitConfig) -> Result<Splits<T>> {
    config.validate()?;
    let total = rows.len();

    let (rest, test) = holdout_split(rows, config.test_ratio, config.seed);
    let (train, dev) = holdout_split(rest, config.dev_ratio, config.seed);

    info!(
        "Split {} rows: train={} dev={} test={}",
        total,
        train.len(),
        dev.len(),
        test.len()
    );
    Ok(Splits { train, dev, test })
}
