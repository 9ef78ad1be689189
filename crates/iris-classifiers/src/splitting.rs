//! Random train/test partitioning of a feature/label pair.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data_handling::{FeatureSet, LabelSet, SplitResult};
use crate::error::{IrisError, Result};

/// Default share of rows held out for testing.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Number of test rows for `n` rows at `test_fraction`: `round(n * f)`.
pub fn test_size(n: usize, test_fraction: f64) -> usize {
    ((n as f64) * test_fraction).round() as usize
}

/// Shuffle row indices uniformly and split into (train, test).
///
/// The test subset receives `round(N * test_fraction)` rows and the training
/// subset the rest. Features and labels are indexed with the same
/// permutation so rows stay aligned. With `seed = Some(_)` the split is
/// reproducible; `None` draws a fresh seed from the OS.
pub fn train_test_split(
    features: &FeatureSet,
    labels: &LabelSet,
    test_fraction: f64,
    seed: Option<u64>,
) -> Result<SplitResult> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(IrisError::InvalidParameter(format!(
            "test fraction must lie in (0, 1), got {}",
            test_fraction
        )));
    }
    if features.nrows() != labels.len() {
        return Err(IrisError::Format(format!(
            "{} feature rows but {} labels",
            features.nrows(),
            labels.len()
        )));
    }

    let total = features.nrows();
    let mut indices: Vec<usize> = (0..total).collect();
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    indices.shuffle(&mut rng);

    let n_test = test_size(total, test_fraction).min(total);
    let (test_idx, train_idx) = indices.split_at(n_test);

    log::debug!(
        "Dataset split: {} training, {} test (test fraction {})",
        train_idx.len(),
        test_idx.len(),
        test_fraction
    );

    Ok(SplitResult {
        train_features: features.select_rows(train_idx),
        train_labels: labels.select_rows(train_idx),
        test_features: features.select_rows(test_idx),
        test_labels: labels.select_rows(test_idx),
    })
}
