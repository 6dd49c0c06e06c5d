//! Seeded train/test partitioning.

use data_spi::{DataError, Dataset, Result, SplitIndices};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Shuffle `0..n` with a seeded RNG and cut it into test and train indices.
///
/// The test partition takes `ceil(n * test_ratio)` rows from the front of the
/// permutation and the train partition takes the rest.
pub fn train_test_split(n: usize, test_ratio: f64, seed: u64) -> Result<SplitIndices> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(DataError::InvalidParameter {
            name: "test_ratio".to_string(),
            reason: format!("must be in (0, 1), got {}", test_ratio),
        });
    }

    let n_test = (n as f64 * test_ratio).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(DataError::InvalidParameter {
            name: "test_ratio".to_string(),
            reason: format!("{} rows cannot be split at ratio {}", n, test_ratio),
        });
    }

    let mut permutation: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    permutation.shuffle(&mut rng);

    let train = permutation.split_off(n_test);
    Ok(SplitIndices {
        train,
        test: permutation,
    })
}

/// Split a dataset into `(train, test)` partitions.
pub fn split_dataset(dataset: &Dataset, test_ratio: f64, seed: u64) -> Result<(Dataset, Dataset)> {
    let indices = train_test_split(dataset.len(), test_ratio, seed)?;
    Ok((dataset.subset(&indices.train), dataset.subset(&indices.test)))
}
