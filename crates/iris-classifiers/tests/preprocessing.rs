//! Integration tests for z-score normalization.

use iris_classifiers::data_handling::FeatureSet;
use iris_classifiers::error::IrisError;
use iris_classifiers::preprocessing::{denormalize, fit_stats, normalize, transform};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_features(seed: u64, rows: usize) -> FeatureSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..rows * 4).map(|_| rng.gen_range(0.1..8.0)).collect();
    FeatureSet::new(
        vec![
            "SepalLength".to_string(),
            "SepalWidth".to_string(),
            "PetalLength".to_string(),
            "PetalWidth".to_string(),
        ],
        Array2::from_shape_vec((rows, 4), data).unwrap(),
    )
    .unwrap()
}

#[test]
fn normalized_columns_have_zero_mean_unit_std() {
    let x = random_features(42, 80);
    let (normed, _) = normalize(&x).unwrap();
    let n = normed.nrows() as f64;

    for c in 0..normed.ncols() {
        let col = normed.values.column(c);
        let mean = col.sum() / n;
        let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        assert!(mean.abs() < 1e-9, "col {} mean = {}", c, mean);
        assert!((var.sqrt() - 1.0).abs() < 1e-9, "col {} std = {}", c, var.sqrt());
    }
}

#[test]
fn denormalize_recovers_input() {
    let x = random_features(7, 25);
    let (normed, stats) = normalize(&x).unwrap();
    let back = denormalize(&normed, &stats).unwrap();
    for (a, b) in back.values.iter().zip(x.values.iter()) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }
}

#[test]
fn train_and_test_are_scaled_independently() {
    let train = random_features(1, 80);
    let test = random_features(2, 20);
    let (_, train_stats) = normalize(&train).unwrap();
    let (test_normed, test_stats) = normalize(&test).unwrap();

    assert_ne!(train_stats.mean, test_stats.mean);
    // the test subset is standardized with its own statistics
    assert_eq!(test_normed, transform(&test, &fit_stats(&test).unwrap()).unwrap());
}

#[test]
fn constant_column_raises_degenerate_error() {
    let mut x = random_features(3, 10);
    x.values.column_mut(2).fill(4.2);
    let err = normalize(&x).unwrap_err();
    match err {
        IrisError::DegenerateColumn { column } => assert_eq!(column, "PetalLength"),
        other => panic!("expected DegenerateColumn, got {:?}", other),
    }
}
